//! Fixed-step time integration for the N-body system
//!
//! Explicit (forward) Euler, matching the behavior of the reference demos:
//! each body takes `v += a dt` from the frozen start-of-step force, then
//! `x += v dt` with the updated velocity.

use super::error::{Result, SimError};
use super::forces::NetForces;
use super::states::Body;

/// Apply one Euler step to every body using forces computed beforehand.
///
/// Taking `forces` by value is what makes the step two-phase: the buffer has
/// to be fully built (from unmodified positions) before any body can move,
/// and it cannot be reused for a second step.
///
/// If any body would end up with a non-finite velocity or position the step
/// is rejected with `InvalidParameter` naming that body, and no body is
/// modified.
pub fn euler_step<const D: usize>(bodies: &mut [Body<D>], forces: NetForces<D>, dt: f64) -> Result<()> {
    debug_assert_eq!(bodies.len(), forces.len());

    // Check: every body's next state must be finite before anything is written
    for (i, (b, f)) in bodies.iter().zip(forces.iter()).enumerate() {
        let (v, x) = b.advanced(f, dt);
        if v.iter().chain(x.iter()).any(|c| !c.is_finite()) {
            log::error!("step of {} s overflows the state of {}", dt, b.label(i));
            return Err(SimError::invalid(
                Some(b.label(i).as_str()),
                format!("step of {} s gives a non-finite velocity or position", dt),
            ));
        }
    }

    // Write phase: hand each body its force for this step
    for (b, f) in bodies.iter_mut().zip(forces.into_vec()) {
        b.set_net_force(f);
    }

    // Integrate: v_n+1 = v_n + a_n dt, x_n+1 = x_n + v_n+1 dt
    for b in bodies.iter_mut() {
        b.update_position(dt);
    }
    Ok(())
}
