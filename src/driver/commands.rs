//! Commands for controlling the engine thread.

use std::sync::mpsc::Sender;

use crate::compute::{EngineError, Generation};

/// Commands sent from the UI side to the engine thread.
#[derive(Debug)]
pub enum EngineCommand {
    /// Begin periodic stepping
    Start,
    /// Halt periodic stepping
    Stop,
    /// Execute a single step
    Step,
    /// Override one cell
    SetCell {
        row: usize,
        col: usize,
        alive: bool,
        reply: Sender<Result<(), EngineError>>,
    },
    /// Flip one cell, replying with its new state
    Toggle {
        row: usize,
        col: usize,
        reply: Sender<Result<bool, EngineError>>,
    },
    /// Kill every cell
    Reset,
    /// Request a copy of the current grid
    Snapshot { reply: Sender<Generation> },
    /// Shutdown the engine thread
    Shutdown,
}

/// Driver state as last requested through the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Paused,
    Stopped,
}
