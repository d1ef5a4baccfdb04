//! # Simulation Configuration
//!
//! Timing ranges and pool size for a run. Every delay is a `[min, max]` millisecond range
//! sampled uniformly, so tests can pin them to zero and the demo can use the classic
//! multi-second timings.
//!
//! Configuration is read from JSON; missing fields fall back to [`SimulationConfig::default`]:
//!
//! ```json
//! {
//!   "tracks": 2,
//!   "occupancy": { "min_ms": 500, "max_ms": 1500 },
//!   "seed": 42
//! }
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {name} range: min {min_ms}ms > max {max_ms}ms")]
    InvalidRange {
        name: &'static str,
        min_ms: u64,
        max_ms: u64,
    },

    #[error("Mailbox capacity must be at least 1")]
    ZeroMailbox,
}

/// An inclusive `[min_ms, max_ms]` delay range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const ZERO: DelayRange = DelayRange {
        min_ms: 0,
        max_ms: 0,
    };

    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that always yields the same delay.
    pub fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    /// Draws a delay uniformly from the range.
    ///
    /// An inverted range is clamped to `min_ms`; [`SimulationConfig::validate`] rejects
    /// such ranges before a run starts.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidRange {
                name,
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }
}

/// Top-level configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Display name of the facility.
    pub airport_name: String,

    /// Number of landing tracks in the pool.
    pub tracks: usize,

    /// Delay before a vehicle's first request to the tower.
    pub approach: DelayRange,

    /// How long a vehicle holds its track before releasing it.
    pub occupancy: DelayRange,

    /// Wait between a refused request and the next attempt.
    pub backoff: DelayRange,

    /// Capacity of the control tower's request mailbox.
    pub mailbox_capacity: usize,

    /// Seed for fleet generation and for every vehicle's delay RNG; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            airport_name: "Miami International airport".to_string(),
            tracks: 4,
            approach: DelayRange::new(2000, 4000),
            occupancy: DelayRange::new(2000, 5000),
            backoff: DelayRange::new(2000, 4000),
            mailbox_capacity: 32,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// All delays zero; handy for tests.
    pub fn instant(tracks: usize) -> Self {
        Self {
            tracks,
            approach: DelayRange::ZERO,
            occupancy: DelayRange::ZERO,
            backoff: DelayRange::ZERO,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.approach.check("approach")?;
        self.occupancy.check("occupancy")?;
        self.backoff.check("backoff")?;
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::ZeroMailbox);
        }
        Ok(())
    }
}
