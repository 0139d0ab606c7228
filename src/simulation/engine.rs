//! Runtime engine that owns the bodies and advances them in time
//!
//! A [`Simulator`] is built once from a non-empty list of bodies and then
//! stepped. Each step is two-phase: forces for every body are accumulated
//! from the current positions into a [`NetForces`] buffer, and only then is
//! every body integrated. A step either completes for all bodies or fails
//! before anything is mutated.

use nalgebra::SVector;

use super::error::{Result, SimError};
use super::forces::{NetForces, NewtonianGravity};
use super::integrator::euler_step;
use super::params::{CoincidencePolicy, Parameters};
use super::states::Body;
use super::units;

pub type Simulator2 = Simulator<2>;
pub type Simulator3 = Simulator<3>;

#[derive(Debug, Clone)]
pub struct Simulator<const D: usize> {
    bodies: Vec<Body<D>>,
    gravity: NewtonianGravity,
    parallel: bool, // accumulate forces on the rayon pool
    time: f64, // elapsed simulated time (s)
    steps: usize, // completed steps
}

impl<const D: usize> Simulator<D> {
    /// Simulator with default constants (G = 6.674e-11, fail on coincidence)
    pub fn new(bodies: Vec<Body<D>>) -> Result<Self> {
        Self::with_parameters(bodies, &Parameters::default())
    }

    pub fn with_parameters(bodies: Vec<Body<D>>, params: &Parameters) -> Result<Self> {
        if bodies.is_empty() {
            return Err(SimError::invalid(None, "simulator needs at least one body"));
        }
        if !(params.gravitation.is_finite() && params.gravitation > 0.0) {
            return Err(SimError::invalid(
                None,
                format!("gravitational constant must be positive, got {}", params.gravitation),
            ));
        }

        Ok(Self {
            bodies,
            gravity: NewtonianGravity {
                gravitation: params.gravitation,
                coincidence: params.coincidence,
            },
            parallel: params.parallel,
            time: 0.0,
            steps: 0,
        })
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn set_coincidence_policy(&mut self, policy: CoincidencePolicy) {
        self.gravity.coincidence = policy;
    }

    pub fn set_gravitation(&mut self, gravitation: f64) -> Result<()> {
        if !(gravitation.is_finite() && gravitation > 0.0) {
            return Err(SimError::invalid(
                None,
                format!("gravitational constant must be positive, got {}", gravitation),
            ));
        }
        self.gravity.gravitation = gravitation;
        Ok(())
    }

    pub fn gravitation(&self) -> f64 {
        self.gravity.gravitation
    }

    /// Force on `bodies[a]` due to `bodies[b]` (N)
    pub fn compute_pairwise_force(&self, a: usize, b: usize) -> Result<SVector<f64, D>> {
        let (ba, bb) = (self.checked(a)?, self.checked(b)?);
        if a == b {
            return Err(SimError::invalid(Some(ba.label(a).as_str()), "a body exerts no force on itself"));
        }
        self.gravity
            .pairwise(ba, bb)
            .ok_or(SimError::DegenerateGeometry { a, b })
    }

    /// Net force on every body from the current positions
    pub fn accumulate_forces(&self) -> Result<NetForces<D>> {
        if self.parallel {
            self.gravity.accumulate_par(&self.bodies)
        } else {
            self.gravity.accumulate(&self.bodies)
        }
    }

    /// Advance every body by `dt` seconds
    pub fn step(&mut self, dt: f64) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::invalid(None, format!("time step must be positive, got {}", dt)));
        }

        let forces = self.accumulate_forces()?;
        euler_step(&mut self.bodies, forces, dt)?;

        self.time += dt;
        self.steps += 1;
        Ok(())
    }

    /// `steps` calls to [`Self::step`]; stops at the first failing step
    pub fn run(&mut self, steps: usize, dt: f64) -> Result<()> {
        for _ in 0..steps {
            self.step(dt)?;
        }
        log::debug!(
            "ran {} steps of {} s, t = {} s, {} bodies",
            steps,
            dt,
            self.time,
            self.bodies.len()
        );
        Ok(())
    }

    /// Speed (km/s) `bodies[a]` would need for a circular orbit around
    /// `bodies[b]` at their current separation: v = sqrt(F r / m_a)
    pub fn estimate_circular_orbital_speed(&self, a: usize, b: usize) -> Result<f64> {
        let force = self.compute_pairwise_force(a, b)?;
        let weight = units::newtons_to_kg_km(force.norm());
        let r = units::megameters_to_kilometers((self.bodies[a].position() - self.bodies[b].position()).norm());

        let speed = (weight * r / self.bodies[a].mass()).sqrt();
        log::info!(
            "circular orbital speed of {} around {}: {} km/s",
            self.bodies[a].label(a),
            self.bodies[b].label(b),
            speed
        );
        Ok(speed)
    }

    /// Reset every body from `(position, velocity)` pairs and rewind time
    pub fn reset(&mut self, states: &[(Vec<f64>, Vec<f64>)]) -> Result<()> {
        if states.len() != self.bodies.len() {
            return Err(SimError::invalid(
                None,
                format!("reset needs {} states, got {}", self.bodies.len(), states.len()),
            ));
        }
        // Validate everything before touching any body
        let mut staged = self.bodies.clone();
        for (b, (x, v)) in staged.iter_mut().zip(states) {
            b.reset(x, v)?;
        }
        self.bodies = staged;
        self.time = 0.0;
        self.steps = 0;
        Ok(())
    }

    /// Put every body back at its first trajectory entry with the given velocities
    pub fn rewind(&mut self, velocities: &[SVector<f64, D>]) -> Result<()> {
        let states: Vec<(Vec<f64>, Vec<f64>)> = self
            .bodies
            .iter()
            .zip(velocities)
            .map(|(b, v)| (b.initial_position().as_slice().to_vec(), v.as_slice().to_vec()))
            .collect();
        self.reset(&states)
    }

    pub fn bodies(&self) -> &[Body<D>] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body<D>> {
        self.bodies.get(index)
    }

    /// Index of the first body named `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name() == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Sum of m v over all bodies (kg km/s)
    pub fn total_momentum(&self) -> SVector<f64, D> {
        self.bodies.iter().fold(SVector::zeros(), |acc, b| acc + b.momentum())
    }

    /// Mass-weighted mean position (Mm)
    pub fn center_of_mass(&self) -> SVector<f64, D> {
        let total_mass: f64 = self.bodies.iter().map(|b| b.mass()).sum();
        let weighted = self
            .bodies
            .iter()
            .fold(SVector::zeros(), |acc: SVector<f64, D>, b| acc + b.position() * b.mass());
        weighted / total_mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.gravity.potential_energy(&self.bodies)
    }

    /// Kinetic plus potential energy (J). Drifts under forward Euler.
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Frame table of sampled positions.
    ///
    /// One row per sampled step (every `stride`-th trajectory entry): the
    /// frame number starting at 1, then each body's position components in
    /// body order. This is the layout used for exporting runs.
    pub fn frames(&self, stride: usize) -> Vec<(usize, Vec<f64>)> {
        let stride = stride.max(1);
        let rows = self.bodies.iter().map(|b| b.trajectory().len()).min().unwrap_or(0);

        (0..rows)
            .step_by(stride)
            .enumerate()
            .map(|(frame, k)| {
                let row = self
                    .bodies
                    .iter()
                    .flat_map(|b| b.trajectory()[k].iter().copied())
                    .collect();
                (frame + 1, row)
            })
            .collect()
    }

    /// Column names matching [`Self::frames`], e.g. `Sun_x`, `Sun_y`
    pub fn frame_columns(&self) -> Vec<String> {
        static AXES: [&str; 3] = ["x", "y", "z"];
        self.bodies
            .iter()
            .enumerate()
            .flat_map(|(i, b)| {
                let label = b.label(i);
                AXES[..D].iter().map(move |axis| format!("{}_{}", label, axis))
            })
            .collect()
    }

    fn checked(&self, index: usize) -> Result<&Body<D>> {
        self.bodies.get(index).ok_or_else(|| {
            SimError::invalid(
                None,
                format!("body index {} out of range ({} bodies)", index, self.bodies.len()),
            )
        })
    }
}
