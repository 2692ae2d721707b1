// src/models/mod.rs

pub mod state;

pub use state::{conserved_quantity, to_absolute, to_relative, RelativeState, State};
