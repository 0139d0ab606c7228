//! Unit conversion layer for the simulation
//!
//! Bodies store their state in "demo" units that keep numbers readable for
//! stellar and planetary systems:
//! - mass in kilograms (kg)
//! - position in megameters (Mm, 1000 km)
//! - velocity in kilometers per second (km/s)
//! - force in Newtons (N)
//! - time in seconds (s)
//!
//! The law of universal gravitation is evaluated in SI, so every conversion
//! between the two unit systems goes through the helpers below. Nothing else
//! in the crate multiplies by a bare power of ten.

use nalgebra::SVector;

/// Newtonian gravitational constant (N m^2 / kg^2)
pub const GRAVITATION: f64 = 6.674e-11;

/// Meters per megameter
pub const METERS_PER_MEGAMETER: f64 = 1.0e6;

/// Kilometers per megameter
pub const KILOMETERS_PER_MEGAMETER: f64 = 1.0e3;

/// Meters per kilometer
pub const METERS_PER_KILOMETER: f64 = 1.0e3;

/// Position (Mm) -> SI position (m)
pub fn megameters_to_meters<const D: usize>(x: &SVector<f64, D>) -> SVector<f64, D> {
    x * METERS_PER_MEGAMETER
}

/// Scalar distance (Mm) -> (km)
pub fn megameters_to_kilometers(d: f64) -> f64 {
    d * KILOMETERS_PER_MEGAMETER
}

/// Displacement (km) -> (Mm)
pub fn kilometers_to_megameters<const D: usize>(x: &SVector<f64, D>) -> SVector<f64, D> {
    x / KILOMETERS_PER_MEGAMETER
}

/// Acceleration in m/s^2 -> km/s^2
///
/// A force in N divided by a mass in kg gives m/s^2; velocities are kept in
/// km/s, so the result is scaled down by 1000.
pub fn si_acceleration_to_km<const D: usize>(a: &SVector<f64, D>) -> SVector<f64, D> {
    a / METERS_PER_KILOMETER
}

/// Force magnitude N (kg m/s^2) -> kg km/s^2
pub fn newtons_to_kg_km(f: f64) -> f64 {
    f / METERS_PER_KILOMETER
}

/// Velocity km/s -> m/s
pub fn km_per_s_to_m_per_s<const D: usize>(v: &SVector<f64, D>) -> SVector<f64, D> {
    v * METERS_PER_KILOMETER
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Vector2, Vector3};

    #[test]
    fn megameter_position_in_meters() {
        let x = Vector3::new(384.0, 0.0, -1.5);
        let m = megameters_to_meters(&x);
        assert_eq!(m, Vector3::new(384.0e6, 0.0, -1.5e6));
    }

    #[test]
    fn kilometer_step_in_megameters() {
        // 51.66 km/s over 20 s moves 1033.2 km = 1.0332 Mm
        let dx = Vector2::new(51.66 * 20.0, 0.0);
        let mm = kilometers_to_megameters(&dx);
        assert!((mm.x - 1.0332).abs() < 1e-12);
    }

    #[test]
    fn newton_per_kg_is_thousandth_km() {
        let a = Vector2::new(9.81, -9.81);
        let km = si_acceleration_to_km(&a);
        assert!((km.x - 0.00981).abs() < 1e-15);
        assert!((km.y + 0.00981).abs() < 1e-15);
        assert!((newtons_to_kg_km(1000.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn distance_scales_are_consistent() {
        assert_eq!(METERS_PER_MEGAMETER, KILOMETERS_PER_MEGAMETER * METERS_PER_KILOMETER);
        assert_eq!(megameters_to_kilometers(384.0), 384_000.0);
    }
}
