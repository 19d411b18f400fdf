//! Life Engine - Conway's Game of Life on a toroidal grid.
//!
//! This crate provides the simulation engine behind a Game of Life UI:
//! grid state, wrap-around neighbor counting, the B3/S23 rule and a
//! start/stop/reset lifecycle driven by a periodic tick.
//!
//! # Architecture
//!
//! - `schema`: Configuration and seeding types
//! - `compute`: Grid, transition rule and the [`LifeEngine`] state machine
//! - `driver`: A single engine thread that serializes commands and steps on a timer
//!
//! # Example
//!
//! ```rust
//! use life_engine::{
//!     compute::{Generation, LifeEngine},
//!     schema::{Seed, Shape},
//! };
//!
//! // Horizontal blinker on a 5x5 torus
//! let seed = Seed::shape(5, 5, Shape::Blinker, 2, 1);
//! let mut engine = LifeEngine::from_seed(&seed).unwrap();
//!
//! engine.subscribe(|generation: &Generation| {
//!     println!("generation {}:\n{}", generation.index, generation.grid);
//! });
//!
//! engine.step();
//! assert!(engine.get_cell(1, 2).unwrap());
//! ```

pub mod compute;
pub mod driver;
pub mod schema;

// Re-export commonly used types
pub use compute::{EngineError, Generation, GenerationObserver, Grid, GridStats, LifeEngine};
pub use driver::EngineHandle;
pub use schema::{EngineConfig, Pattern, Seed, Shape};
