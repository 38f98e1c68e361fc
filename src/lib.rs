pub mod simulation;
pub mod configuration;
pub mod error;
pub mod report;

pub use simulation::states::{Body, SimulationState, ForceCache, NVec2};
pub use simulation::params::{Parameters, DEFAULT_DT, DEFAULT_EPS};
pub use simulation::engine::{Engine, ExecutionMode};
pub use simulation::partition::{partition, Partition};
pub use simulation::forces::{compute_accelerations, PairwiseGravity, WorkerContext};
pub use simulation::pool::run_pooled;
pub use simulation::integrator::{semi_implicit_euler, kick_drift};
pub use simulation::scenario::Scenario;
pub use simulation::driver::{run, step, RunReport};

pub use configuration::config::{ParametersConfig, BodyConfig, ScenarioConfig};
pub use configuration::loader::{load_scenario, parse_text};

pub use error::{Result, SimError};
pub use report::write_report;
