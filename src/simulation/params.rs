//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the run-wide settings:
//! - gravitational constant `G`,
//! - fixed step size `dt` and number of steps,
//! - cubed-distance floor `eps`

use crate::error::{Result, SimError};

/// Step size used when the scenario does not set one
pub const DEFAULT_DT: f64 = 0.05;

/// Cubed-distance floor used when the scenario does not set one
pub const DEFAULT_EPS: f64 = 0.0001;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub dt: f64, // step size
    pub eps: f64, // floor for |r|^3
    pub steps: usize, // number of steps to run
}

impl Parameters {
    /// Reject values that would make every step meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.G.is_finite() {
            return Err(SimError::InvalidConfiguration(format!(
                "gravitational constant must be finite, got {}",
                self.G
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "step size must be positive, got {}",
                self.dt
            )));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "distance floor must be positive, got {}",
                self.eps
            )));
        }
        Ok(())
    }
}
