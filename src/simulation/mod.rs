pub mod vector;
pub mod states;
pub mod params;
pub mod engine;
pub mod partition;
pub mod forces;
pub mod pool;
pub mod integrator;
pub mod scenario;
pub mod driver;
