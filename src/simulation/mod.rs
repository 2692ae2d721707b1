// src/simulation/mod.rs

pub mod load_parameters;
pub mod csv;
pub mod framework;

pub use framework::{coerce_iterations, Simulation, Termination};
pub use load_parameters::LoadError;
pub use csv::{ExportError, ResultSink, TextExporter, TsvExporter};
