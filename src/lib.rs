// src/lib.rs

//! Lotka-Volterra 方程式による捕食者-被食者系のシミュレーション

pub mod config;
pub mod math;
pub mod models;
pub mod simulation;

pub use config::{Parameters, SimulationSettings};
pub use math::{SimulationError, Statistics};
pub use models::{RelativeState, State};
pub use simulation::{Simulation, Termination};
