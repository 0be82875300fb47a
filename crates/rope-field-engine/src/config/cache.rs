//! Encoding cache configuration.

use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, EncodingResult};

fn default_enabled() -> bool {
    true
}

fn default_max_entries() -> usize {
    50
}

/// Configuration for the FIFO batch cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether computed batches are memoized at all. Disabling turns every
    /// call into a fresh computation.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Entry capacity. At capacity the earliest-inserted entry is evicted
    /// before a new insert; insertion order is the only eviction signal.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Validate capacity.
    ///
    /// # Errors
    /// `EncodingError::ConfigError` if `max_entries` is zero.
    pub fn validate(&self) -> EncodingResult<()> {
        if self.max_entries == 0 {
            return Err(EncodingError::ConfigError {
                message: "max_entries must be > 0".to_string(),
            });
        }
        Ok(())
    }
}
