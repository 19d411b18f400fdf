//! Generation-complete notifications.

use std::sync::mpsc::{SyncSender, TrySendError};

use serde::Serialize;

use super::Grid;

/// Owned snapshot of a committed generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    /// Number of steps committed so far.
    pub index: u64,
    /// Full copy of the grid after the step.
    pub grid: Grid,
}

/// Receives one notification per committed generation.
pub trait GenerationObserver: Send {
    fn on_generation(&mut self, generation: &Generation);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&Generation) + Send,
{
    fn on_generation(&mut self, generation: &Generation) {
        self(generation)
    }
}

/// Forwards generations into a bounded `mpsc` channel.
///
/// Never blocks the engine: when the channel is full the generation is
/// discarded, so a slow consumer sees gaps instead of growing a backlog.
/// A dropped receiver is not an error either.
pub struct ChannelObserver {
    sender: SyncSender<Generation>,
}

impl ChannelObserver {
    pub fn new(sender: SyncSender<Generation>) -> Self {
        Self { sender }
    }
}

impl GenerationObserver for ChannelObserver {
    fn on_generation(&mut self, generation: &Generation) {
        match self.sender.try_send(generation.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                log::debug!("generation {} dropped: receiver behind", generation.index);
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!(
                    "generation {} dropped: receiver disconnected",
                    generation.index
                );
            }
        }
    }
}
