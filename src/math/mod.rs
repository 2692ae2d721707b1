// src/math/mod.rs

pub mod integrator;
pub mod statistics;
pub mod error;

pub use integrator::lotka_volterra_euler;
pub use integrator::StepOutcome;
pub use statistics::summarize;
pub use statistics::Statistics;
pub use error::SimulationError;
