//! Batch loader tuning

use std::time::Duration;

use crate::{parse_env, ConfigError, ConfigResult};

/// Per-request batch loader settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// How long a batch window stays open, in milliseconds
    pub batch_window_ms: u64,

    /// Number of distinct keys that dispatches a batch before the window closes
    pub max_batch_size: usize,
}

impl LoaderConfig {
    /// Load batch loader settings from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let config = Self {
            batch_window_ms: parse_env("LOADER_BATCH_WINDOW_MS", 16)?,
            max_batch_size: parse_env("LOADER_MAX_BATCH_SIZE", 1000)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would stall or disable batching
    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_window_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "LOADER_BATCH_WINDOW_MS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidValue(
                "LOADER_MAX_BATCH_SIZE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Batch window as a duration
    pub fn batch_window(&self) -> Duration {
        Duration::from_millis(self.batch_window_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_window_ms: 16,
            max_batch_size: 1000,
        }
    }
}
