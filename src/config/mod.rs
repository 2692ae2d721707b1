// src/config/mod.rs

pub mod parameters;
pub mod scenario;

pub use parameters::{Parameters, SimulationSettings};
pub use scenario::{Scenario, SimulationInstance};
