//! Driver module - Owns the engine on one thread and steps it on a timer.

mod commands;
mod handle;
mod ticker;

pub use commands::{DriverState, EngineCommand};
pub use handle::EngineHandle;
pub use ticker::Ticker;
