//! Fixed-interval tick scheduling.

use std::time::{Duration, Instant};

/// Decides when the next generation is due.
///
/// Only one deadline exists at a time, so arming an already armed ticker
/// cannot increase the tick rate.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedule the first tick one interval from `now`. No-op if already armed.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Cancel the pending tick. Returns false if none was pending.
    pub fn disarm(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Time left until the next tick, or `None` when disarmed.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Consume a due tick.
    ///
    /// Fires at most once per call. When the caller has fallen more than one
    /// interval behind, the schedule restarts from `now` instead of bursting.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.interval;
                self.next_due = Some(if next <= now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }
}
