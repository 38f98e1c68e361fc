//! Fixed-step semi-implicit Euler integrator
//!
//! Runs single-threaded after the force step has joined, so positions never
//! move while any worker is still reading them

use super::states::{NVec2, SimulationState};

/// Advance every body by one step of size `dt`
///
/// Velocities are kicked with the current accelerations first, then
/// positions drift with the new velocities. Updates `sys.t`.
pub fn semi_implicit_euler(sys: &mut SimulationState, dt: f64) {
    let SimulationState { positions, velocities, accelerations, t, .. } = sys;
    kick_drift(positions, velocities, accelerations, dt);
    *t += dt;
}

/// Slice form of the update, used on per-partition chunks by the worker pool
pub fn kick_drift(positions: &mut [NVec2], velocities: &mut [NVec2], accelerations: &[NVec2], dt: f64) {
    // v_n+1 = v_n + dt * a_n
    for (v, a) in velocities.iter_mut().zip(accelerations) {
        *v += a * dt;
    }

    // x_n+1 = x_n + dt * v_n+1
    for (x, v) in positions.iter_mut().zip(velocities.iter()) {
        *x += v * dt;
    }
}
