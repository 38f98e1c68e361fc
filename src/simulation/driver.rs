//! Time-step driver
//!
//! Repeats force computation followed by integration for the configured
//! number of steps. Steps never overlap: the integrator only runs after
//! every worker of the step has finished.

use std::time::{Duration, Instant};

use log::{debug, info};

use super::engine::ExecutionMode;
use super::forces::compute_accelerations;
use super::integrator::semi_implicit_euler;
use super::pool::run_pooled;
use super::scenario::Scenario;

/// What a finished run reports besides the final state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub steps: usize,
    pub elapsed: Duration,
}

/// Advance the scenario by exactly one step with freshly spawned workers
pub fn step(scenario: &mut Scenario) {
    compute_accelerations(&scenario.gravity, &scenario.engine, &mut scenario.system);
    semi_implicit_euler(&mut scenario.system, scenario.parameters.dt);
}

/// Run every configured step and time the loop
pub fn run(scenario: &mut Scenario) -> RunReport {
    let steps = scenario.parameters.steps;
    let p0 = scenario.system.total_momentum();
    let e0 = scenario.system.kinetic_energy();
    info!(
        "running {} steps of {} bodies on {} workers ({:?})",
        steps,
        scenario.system.len(),
        scenario.engine.workers,
        scenario.engine.mode
    );

    let begin = Instant::now();
    match scenario.engine.mode {
        ExecutionMode::SpawnPerStep => {
            for i in 0..steps {
                step(scenario);
                debug!("step {} done, t = {}", i + 1, scenario.system.t);
            }
        }
        ExecutionMode::PersistentPool => {
            let Scenario { engine, parameters, system, gravity } = scenario;
            run_pooled(gravity, engine, system, parameters.dt, steps);
        }
    }
    let elapsed = begin.elapsed();

    info!(
        "momentum ({:.6e}, {:.6e}) -> ({:.6e}, {:.6e}), kinetic energy {:.6e} -> {:.6e}",
        p0.x,
        p0.y,
        scenario.system.total_momentum().x,
        scenario.system.total_momentum().y,
        e0,
        scenario.system.kinetic_energy()
    );

    RunReport { steps, elapsed }
}
