//! Gravitational force evaluation for the n-body engine
//!
//! [`NewtonianGravity`] evaluates the law of universal gravitation between
//! pairs of bodies and accumulates the all-pairs sum for every body into a
//! [`NetForces`] buffer. The buffer is built from start-of-step positions
//! only; the integrator consumes it by value, so a step can never mix
//! forces from old and new positions.

use nalgebra::SVector;
use rayon::prelude::*;

use super::error::{Result, SimError};
use super::params::CoincidencePolicy;
use super::states::Body;
use super::units;

/// Net force on each body (N), indexed like the body list it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct NetForces<const D: usize> {
    forces: Vec<SVector<f64, D>>,
}

impl<const D: usize> NetForces<D> {
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SVector<f64, D>> {
        self.forces.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SVector<f64, D>> + '_ {
        self.forces.iter()
    }

    /// Vector sum of all net forces. Zero up to rounding for a closed system.
    pub fn total(&self) -> SVector<f64, D> {
        self.forces.iter().fold(SVector::zeros(), |acc, f| acc + f)
    }

    pub(crate) fn into_vec(self) -> Vec<SVector<f64, D>> {
        self.forces
    }
}

/// Direct O(n^2) Newtonian gravity without softening
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub gravitation: f64, // gravitational constant (N m^2 / kg^2)
    pub coincidence: CoincidencePolicy,
}

impl NewtonianGravity {
    /// Force on `a` due to `b` in Newtons, or `None` if they coincide.
    ///
    /// Magnitude `G * m_a * m_b / d^2`, direction from `a` toward `b`, with
    /// `d` measured in meters.
    pub fn pairwise<const D: usize>(&self, a: &Body<D>, b: &Body<D>) -> Option<SVector<f64, D>> {
        let ra = units::megameters_to_meters(a.position());
        let rb = units::megameters_to_meters(b.position());

        // r points from a to b, so a is pulled along +r
        let r = rb - ra;
        let distance = r.norm();
        if distance == 0.0 {
            return None;
        }

        // m_a * m_b grouped first so that F(a, b) == -F(b, a) exactly
        let magnitude = self.gravitation * (a.mass() * b.mass()) / (distance * distance);
        Some(r / distance * magnitude)
    }

    /// Net force on `bodies[i]` from every other body, summed in index order
    pub fn net_force_on<const D: usize>(&self, bodies: &[Body<D>], i: usize) -> Result<SVector<f64, D>> {
        let bi = &bodies[i];
        let mut total = SVector::<f64, D>::zeros();

        for (j, bj) in bodies.iter().enumerate() {
            if j == i {
                continue;
            }
            match self.pairwise(bi, bj) {
                Some(f) => total += f,
                None => match self.coincidence {
                    CoincidencePolicy::Fail => return Err(SimError::DegenerateGeometry { a: i, b: j }),
                    CoincidencePolicy::ZeroForce => {
                        log::warn!(
                            "bodies {} and {} coincide, skipping their interaction",
                            bi.label(i),
                            bj.label(j)
                        );
                    }
                },
            }
        }

        // Catches overflow from near-coincident pairs
        if let Some(j) = (0..D).position(|k| !total[k].is_finite()) {
            log::error!("non-finite force on {} (axis {})", bi.label(i), j);
            let other = Self::nearest(bodies, i);
            return Err(SimError::DegenerateGeometry { a: i, b: other });
        }

        Ok(total)
    }

    /// Sequential all-pairs accumulation
    pub fn accumulate<const D: usize>(&self, bodies: &[Body<D>]) -> Result<NetForces<D>> {
        let forces = (0..bodies.len())
            .map(|i| self.net_force_on(bodies, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(NetForces { forces })
    }

    /// All-pairs accumulation with one rayon task per body.
    ///
    /// Each body's sum runs in the same order as [`Self::accumulate`], so the
    /// result is bit-identical. On failure the lowest failing body index is
    /// reported, again matching the sequential pass.
    pub fn accumulate_par<const D: usize>(&self, bodies: &[Body<D>]) -> Result<NetForces<D>> {
        let results: Vec<Result<SVector<f64, D>>> = (0..bodies.len())
            .into_par_iter()
            .map(|i| self.net_force_on(bodies, i))
            .collect();
        let forces = results.into_iter().collect::<Result<Vec<_>>>()?;
        Ok(NetForces { forces })
    }

    /// Gravitational potential energy of the whole system (J)
    pub fn potential_energy<const D: usize>(&self, bodies: &[Body<D>]) -> f64 {
        let mut energy = 0.0;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let d = units::megameters_to_meters(&(bodies[j].position() - bodies[i].position())).norm();
                if d > 0.0 {
                    energy -= self.gravitation * bodies[i].mass() * bodies[j].mass() / d;
                }
            }
        }
        energy
    }

    fn nearest<const D: usize>(bodies: &[Body<D>], i: usize) -> usize {
        let xi = bodies[i].position();
        bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .min_by(|(_, a), (_, b)| {
                let da = (a.position() - xi).norm_squared();
                let db = (b.position() - xi).norm_squared();
                da.total_cmp(&db)
            })
            .map(|(j, _)| j)
            .unwrap_or(i)
    }
}
