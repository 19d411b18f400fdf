//! Compute module - Grid, transition rule and engine.

mod engine;
mod error;
mod grid;
mod observer;
mod rules;
mod stats;

pub use engine::*;
pub use error::*;
pub use grid::*;
pub use observer::*;
pub use rules::*;
pub use stats::*;
