//! Batch window configuration

use std::time::Duration;

/// Default collection window, matching the 16ms wait the API has always used
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(16);

/// Default number of distinct keys that closes a window early
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Tuning for a [`BatchLoader`](crate::BatchLoader)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// How long a window stays open after its first request
    pub window: Duration,

    /// Number of distinct pending keys that dispatches the batch immediately
    pub max_batch_size: usize,
}

impl BatchConfig {
    /// Create a configuration with the given window and the default batch size
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    /// Set the max batch size (clamped to at least one key)
    pub fn max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.max(1);
        self
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}
