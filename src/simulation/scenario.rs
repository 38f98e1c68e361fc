//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (file-facing) and produces the runtime bundle
//! consumed by the driver:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`SimulationState` with bodies at t = 0)
//! - force law (`PairwiseGravity`)

use log::warn;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::Engine;
use crate::simulation::forces::PairwiseGravity;
use crate::simulation::params::{Parameters, DEFAULT_DT, DEFAULT_EPS};
use crate::simulation::states::{Body, NVec2, SimulationState};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: SimulationState,
    pub gravity: PairwiseGravity,
}

impl Scenario {
    /// Validate the configuration and allocate the state for the whole run
    pub fn build_scenario(cfg: ScenarioConfig, engine: Engine) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            dt: p_cfg.dt.unwrap_or(DEFAULT_DT),
            eps: p_cfg.eps.unwrap_or(DEFAULT_EPS),
            steps: p_cfg.steps,
        };
        parameters.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| to_body(i, bc))
            .collect::<Result<Vec<Body>>>()?;

        if engine.workers.get() > bodies.len() {
            warn!(
                "{} workers for {} bodies: all but the last partition will be empty",
                engine.workers,
                bodies.len()
            );
        }

        let gravity = PairwiseGravity {
            G: parameters.G,
            eps: parameters.eps,
        };

        Ok(Self {
            engine,
            parameters,
            system: SimulationState::from_bodies(&bodies)?,
            gravity,
        })
    }
}

fn to_body(i: usize, bc: &BodyConfig) -> Result<Body> {
    let (x, v) = match (bc.x.as_slice(), bc.v.as_slice()) {
        ([x0, x1], [v0, v1]) => (NVec2::new(*x0, *x1), NVec2::new(*v0, *v1)),
        _ => {
            return Err(SimError::InvalidConfiguration(format!(
                "body {} needs 2D position and velocity",
                i + 1
            )))
        }
    };

    let finite = bc.m.is_finite() && x.iter().chain(v.iter()).all(|c| c.is_finite());
    if !finite {
        return Err(SimError::InvalidConfiguration(format!(
            "body {} has a non-finite mass, position or velocity",
            i + 1
        )));
    }

    Ok(Body { x, v, m: bc.m })
}
