//! Configuration types for loading simulation scenarios
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants and step settings
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! Scenarios come either from the plain whitespace-separated format
//!
//! ```text
//! G N K
//! m x y vx vy      (N records)
//! ```
//!
//! or from YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   G: 1.0          # gravitational constant
//!   steps: 100      # number of fixed steps
//!   dt: 0.05        # optional, step size
//!   eps: 1.0e-4     # optional, floor for the cubed distance
//!
//! bodies:
//!   - m: 1.0
//!     x: [ -0.5, 0.0 ]
//!     v: [  0.0, 1.0 ]
//!   - m: 1.0
//!     x: [  0.5, 0.0 ]
//!     v: [  0.0, -1.0 ]
//! ```
//!
//! The plain format has no `dt`/`eps`; the defaults from
//! [`crate::simulation::params`] apply unless the command line overrides them.

use serde::Deserialize;

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub steps: usize, // number of steps
    #[serde(default)]
    pub dt: Option<f64>, // step size
    #[serde(default)]
    pub eps: Option<f64>, // floor for |r|^3
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub m: f64, // mass
    pub x: Vec<f64>, // initial position, two components
    pub v: Vec<f64>, // initial velocity, two components
}

/// Top-level scenario configuration
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}
