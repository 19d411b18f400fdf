//! Configuration types for engine construction and the tick driver.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Seed;
use crate::compute::{EngineError, cell_count};

/// Probability used when the configured one is 100 or above.
pub const DEFAULT_PROBABILITY_OF_LIFE: u32 = 25;

/// Interval between generations while the engine is running.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

fn default_width() -> usize {
    100
}

fn default_height() -> usize {
    100
}

fn default_probability() -> u32 {
    DEFAULT_PROBABILITY_OF_LIFE
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

/// Clamp a requested probability of life to the supported range.
///
/// Values of 100 or more fall back to [`DEFAULT_PROBABILITY_OF_LIFE`].
pub fn effective_probability(probability_of_life: u32) -> u32 {
    if probability_of_life < 100 {
        probability_of_life
    } else {
        log::warn!(
            "probability of life {}% out of range, using {}%",
            probability_of_life,
            DEFAULT_PROBABILITY_OF_LIFE
        );
        DEFAULT_PROBABILITY_OF_LIFE
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid width in cells (columns).
    #[serde(default = "default_width")]
    pub width: usize,
    /// Grid height in cells (rows).
    #[serde(default = "default_height")]
    pub height: usize,
    /// Percent chance (0-99) that a cell starts alive.
    #[serde(default = "default_probability")]
    pub probability_of_life: u32,
    /// Milliseconds between generations while running.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible starting grids.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            probability_of_life: default_probability(),
            tick_interval_ms: default_tick_interval(),
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Random seed described by this configuration.
    pub fn seed(&self) -> Seed {
        Seed::random(
            self.width,
            self.height,
            self.probability_of_life,
            self.rng_seed,
        )
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        cell_count(self.height, self.width)?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(())
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Tick interval must be non-zero")]
    InvalidTickInterval,
    #[error(transparent)]
    Invalid(#[from] EngineError),
}
