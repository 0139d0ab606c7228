//! Core state types for the N-body simulation.
//!
//! A [`Body`] is a gravitating point mass generic over its dimension `D`
//! (2 or 3). Aliases `Body2` / `Body3` and `NVec2` / `NVec3` cover the two
//! supported cases.
//!
//! State is stored in demo units (kg, Mm, km/s, N); see [`super::units`].

use nalgebra::{SVector, Vector2, Vector3};

use super::error::{Result, SimError};
use super::units;

pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

pub type Body2 = Body<2>;
pub type Body3 = Body<3>;

#[derive(Debug, Clone)]
pub struct Body<const D: usize> {
    name: String,
    mass: f64, // kg
    position: SVector<f64, D>, // Mm
    velocity: SVector<f64, D>, // km/s
    net_force: SVector<f64, D>, // N, written by the simulator each step
    acceleration: SVector<f64, D>, // km/s^2
    trajectory: Vec<SVector<f64, D>>, // Mm, starts with the initial position
}

/// Slice -> fixed vector, rejecting wrong lengths and non-finite components
fn to_vector<const D: usize>(name: &str, what: &str, xs: &[f64]) -> Result<SVector<f64, D>> {
    if xs.len() != D {
        return Err(SimError::invalid(
            Some(name),
            format!("{} has {} components, expected {}", what, xs.len(), D),
        ));
    }
    if xs.iter().any(|x| !x.is_finite()) {
        return Err(SimError::invalid(Some(name), format!("{} is not finite", what)));
    }
    Ok(SVector::<f64, D>::from_column_slice(xs))
}

impl<const D: usize> Body<D> {
    /// Create a body from mass (kg), position (Mm) and velocity (km/s).
    ///
    /// Fails with [`SimError::InvalidParameter`] if the mass is not a positive
    /// finite number, `D` is not 2 or 3, or either vector has the wrong
    /// number of components.
    pub fn new(mass: f64, position: &[f64], velocity: &[f64], name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if D != 2 && D != 3 {
            return Err(SimError::invalid(
                Some(name.as_str()),
                format!("unsupported dimension {}, expected 2 or 3", D),
            ));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::invalid(Some(name.as_str()), format!("mass must be positive, got {}", mass)));
        }
        let position = to_vector::<D>(&name, "position", position)?;
        let velocity = to_vector::<D>(&name, "velocity", velocity)?;

        Ok(Self {
            name,
            mass,
            position,
            velocity,
            net_force: SVector::zeros(),
            acceleration: SVector::zeros(),
            trajectory: vec![position],
        })
    }

    /// Overwrite position and velocity and truncate the trajectory to the
    /// new initial position. Mass and name are kept.
    pub fn reset(&mut self, position: &[f64], velocity: &[f64]) -> Result<()> {
        let position = to_vector::<D>(&self.name, "position", position)?;
        let velocity = to_vector::<D>(&self.name, "velocity", velocity)?;

        self.position = position;
        self.velocity = velocity;
        self.net_force = SVector::zeros();
        self.acceleration = SVector::zeros();
        self.trajectory.clear();
        self.trajectory.push(position);
        Ok(())
    }

    /// Newton's second law: a = F / m, in km/s^2
    pub fn update_acceleration(&mut self) {
        self.acceleration = units::si_acceleration_to_km(&(self.net_force / self.mass));
    }

    /// Forward Euler velocity update: v = v + a * dt
    pub fn update_velocity(&mut self, dt: f64) {
        self.update_acceleration();
        self.velocity += self.acceleration * dt;
    }

    /// Forward Euler position update: r = r + v * dt, then record the new
    /// position. The velocity is advanced first from the force captured at
    /// the start of the step.
    pub fn update_position(&mut self, dt: f64) {
        self.update_velocity(dt);
        self.position += units::kilometers_to_megameters(&(self.velocity * dt));
        self.trajectory.push(self.position);
    }

    /// Velocity and position one Euler step ahead under `force`, without
    /// touching the body. Same arithmetic as [`Self::update_position`].
    pub(crate) fn advanced(&self, force: &SVector<f64, D>, dt: f64) -> (SVector<f64, D>, SVector<f64, D>) {
        let acceleration = units::si_acceleration_to_km(&(force / self.mass));
        let velocity = self.velocity + acceleration * dt;
        let position = self.position + units::kilometers_to_megameters(&(velocity * dt));
        (velocity, position)
    }

    pub(crate) fn set_net_force(&mut self, force: SVector<f64, D>) {
        self.net_force = force;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name, or `#index` for anonymous bodies
    pub fn label(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("#{}", index)
        } else {
            self.name.clone()
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> &SVector<f64, D> {
        &self.position
    }

    pub fn velocity(&self) -> &SVector<f64, D> {
        &self.velocity
    }

    pub fn net_force(&self) -> &SVector<f64, D> {
        &self.net_force
    }

    pub fn acceleration(&self) -> &SVector<f64, D> {
        &self.acceleration
    }

    /// Every recorded position, oldest first
    pub fn trajectory(&self) -> &[SVector<f64, D>] {
        &self.trajectory
    }

    pub fn initial_position(&self) -> &SVector<f64, D> {
        &self.trajectory[0]
    }

    /// Every `stride`-th trajectory entry starting with the initial position.
    /// A stride of 0 is treated as 1.
    pub fn sampled(&self, stride: usize) -> impl Iterator<Item = &SVector<f64, D>> + '_ {
        self.trajectory.iter().step_by(stride.max(1))
    }

    /// Linear momentum m * v (kg km/s)
    pub fn momentum(&self) -> SVector<f64, D> {
        self.velocity * self.mass
    }

    /// Kinetic energy 1/2 m v^2 (J)
    pub fn kinetic_energy(&self) -> f64 {
        let v = units::km_per_s_to_m_per_s(&self.velocity);
        0.5 * self.mass * v.norm_squared()
    }
}
