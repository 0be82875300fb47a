//! Root configuration for the encoding engine.
//!
//! This module defines `EngineConfig`, the top-level configuration struct
//! aggregating the axis split policy, the level-of-detail target policy,
//! and the cache settings.
//!
//! # Loading Configuration
//!
//! ```rust,ignore
//! use rope_field_engine::EngineConfig;
//!
//! // Load from file
//! let config = EngineConfig::from_file("rope-field.toml")?;
//!
//! // Or use defaults
//! let config = EngineConfig::default();
//! config.validate()?;
//! ```
//!
//! # TOML Structure
//!
//! ```toml
//! [axes]
//! mode = "even"
//!
//! [lod]
//! full_detail_limit = 1000
//! default_target = 500
//! min_axis_samples = 2
//!
//! [[lod.tiers]]
//! max_points = 5000
//! target = 2000
//!
//! [[lod.tiers]]
//! max_points = 20000
//! target = 1000
//!
//! [cache]
//! enabled = true
//! max_entries = 50
//! ```
//!
//! # Design Principles
//!
//! - **NO FALLBACKS**: invalid config returns an error, never a silent
//!   default
//! - **FAIL FAST**: file-read and parse errors return immediately
//! - **VALIDATION**: all sections are validated together

mod axes;
mod cache;
mod lod;


pub use axes::{AxisDims, AxisSplit};
pub use cache::CacheConfig;
pub use lod::{LodConfig, LodTier};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, EncodingResult};

// ============================================================================
// ROOT ENGINE CONFIG
// ============================================================================

/// Root configuration for the encoding engine.
///
/// Load from a TOML file or use `Default::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Axis embedding-width split policy.
    #[serde(default)]
    pub axes: AxisSplit,

    /// Level-of-detail target policy.
    #[serde(default)]
    pub lod: LodConfig,

    /// Batch cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// `EncodingError::ConfigError` if the file cannot be read or the TOML
    /// does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> EncodingResult<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| EncodingError::ConfigError {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        toml::from_str(&contents).map_err(|e| EncodingError::ConfigError {
            message: format!("Failed to parse TOML in '{}': {}", path.display(), e),
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// `EncodingError::ConfigError` if parsing fails.
    pub fn from_toml_str(toml: &str) -> EncodingResult<Self> {
        toml::from_str(toml).map_err(|e| EncodingError::ConfigError {
            message: format!("Failed to parse TOML: {}", e),
        })
    }

    /// Serialize configuration to a TOML string.
    ///
    /// # Errors
    /// `EncodingError::ConfigError` if serialization fails.
    pub fn to_toml_string(&self) -> EncodingResult<String> {
        toml::to_string_pretty(self).map_err(|e| EncodingError::ConfigError {
            message: format!("Failed to serialize to TOML: {}", e),
        })
    }

    /// Validate all sections, returning the first error found.
    ///
    /// # Errors
    /// `EncodingError::ConfigError` with a `[section]`-prefixed message.
    pub fn validate(&self) -> EncodingResult<()> {
        self.axes.validate().map_err(|e| EncodingError::ConfigError {
            message: format!("[axes] {}", e),
        })?;

        self.lod.validate().map_err(|e| EncodingError::ConfigError {
            message: format!("[lod] {}", e),
        })?;

        self.cache
            .validate()
            .map_err(|e| EncodingError::ConfigError {
                message: format!("[cache] {}", e),
            })?;

        Ok(())
    }
}
