//! Session configuration.

use data_pipeline::HistoryConfig;
use earth_core::SimulationParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Tunables for one interactive session. Every field has a default, so an
/// empty document is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Milliseconds between automatic rotations.
    pub rotation_period_ms: u64,
    /// Select the first catalog entry at startup.
    pub auto_select_first: bool,
    /// Seed for the historical jitter; random when absent.
    pub rng_seed: Option<u64>,
    pub history: HistoryConfig,
    /// Initial simulation parameters.
    pub parameters: SimulationParameters,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            rotation_period_ms: 5_000,
            auto_select_first: true,
            rng_seed: None,
            history: HistoryConfig::default(),
            parameters: SimulationParameters::default(),
        }
    }
}

impl SessionConfig {
    /// Rotation period, never shorter than one millisecond.
    pub fn rotation_period(&self) -> Duration {
        Duration::from_millis(self.rotation_period_ms.max(1))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(SessionConfig::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        SessionConfig::from_yaml_str(&text)
    }
}
