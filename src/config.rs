//! Directory configuration.

use crate::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Inclusive range a simulated latency is drawn from, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl LatencyConfig {
    /// Always the same delay.
    pub fn fixed(ms: u64) -> Self {
        Self {
            min_ms: ms,
            max_ms: ms,
        }
    }

    /// Zero delay. Completion is still delivered asynchronously.
    pub fn immediate() -> Self {
        Self::fixed(0)
    }

    pub fn range(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Draw a delay uniformly from the range.
    pub fn sample(&self, rng: &mut impl rand::Rng) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min_ms > self.max_ms {
            return Err(DirectoryError::Config(format!(
                "{name}: min_ms ({}) exceeds max_ms ({})",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}

/// Query service configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Latency for `get_all`.
    /// Default: 1000ms
    pub get_all_latency: LatencyConfig,

    /// Latency for `get_by_id` and `filter`.
    /// Default: 500..=4000ms
    pub lookup_latency: LatencyConfig,
}

impl ServiceConfig {
    /// No simulated latency anywhere.
    pub fn immediate() -> Self {
        Self {
            get_all_latency: LatencyConfig::immediate(),
            lookup_latency: LatencyConfig::immediate(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            get_all_latency: LatencyConfig::fixed(1000),
            lookup_latency: LatencyConfig::range(500, 4000),
        }
    }
}

/// Top-level configuration for a [`Directory`](crate::Directory).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub service: ServiceConfig,
}

impl DirectoryConfig {
    /// Configuration for tests and scripted runs.
    pub fn immediate() -> Self {
        Self {
            service: ServiceConfig::immediate(),
        }
    }

    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.service.get_all_latency.validate("get_all_latency")?;
        self.service.lookup_latency.validate("lookup_latency")?;
        Ok(())
    }
}
