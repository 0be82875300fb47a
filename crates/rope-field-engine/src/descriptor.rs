//! Tensor descriptor: the immutable parameter set for one encoding call.

use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, EncodingResult};

// ============================================================================
// DEFAULT FUNCTIONS
// ============================================================================

fn default_t_len() -> usize {
    16
}

fn default_h_len() -> usize {
    30
}

fn default_w_len() -> usize {
    60
}

fn default_embedding_dim() -> usize {
    128
}

fn default_base() -> f64 {
    10_000.0
}

// ============================================================================
// TENSOR DESCRIPTOR
// ============================================================================

/// Parameters for one 3D encoding computation.
///
/// A descriptor is immutable for the duration of a call; descriptors with
/// equal parameters are interchangeable and hit the same cache entry.
/// Defaults describe the standard demonstration tensor: a 16x30x60 grid
/// encoded with a 128-dimensional embedding at base 10000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorDescriptor {
    /// Temporal extent (outermost, slowest-varying enumeration axis).
    #[serde(default = "default_t_len")]
    pub t_len: usize,

    /// Height extent (middle enumeration axis).
    #[serde(default = "default_h_len")]
    pub h_len: usize,

    /// Width extent (innermost, fastest-varying enumeration axis).
    #[serde(default = "default_w_len")]
    pub w_len: usize,

    /// Total embedding dimension, split across the three axes by the
    /// configured axis policy. Must be a positive even integer.
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    /// Frequency base: band frequencies decay as `base^-scale`.
    /// Must be finite and strictly greater than 1.
    #[serde(default = "default_base")]
    pub base: f64,

    /// Offset added to the time coordinate before rotation. Height and
    /// width always rotate by the raw coordinate.
    #[serde(default)]
    pub time_offset: f64,
}

impl Default for TensorDescriptor {
    fn default() -> Self {
        Self {
            t_len: default_t_len(),
            h_len: default_h_len(),
            w_len: default_w_len(),
            embedding_dim: default_embedding_dim(),
            base: default_base(),
            time_offset: 0.0,
        }
    }
}

impl TensorDescriptor {
    /// Validate the descriptor before any computation.
    ///
    /// # Errors
    /// - `EncodingError::ConfigError` if any grid extent is zero or the
    ///   time offset is not finite
    /// - `EncodingError::InvalidDimension` if `embedding_dim` is zero or odd
    /// - `EncodingError::InvalidBase` if `base` is not finite or `<= 1`
    pub fn validate(&self) -> EncodingResult<()> {
        if self.t_len == 0 || self.h_len == 0 || self.w_len == 0 {
            return Err(EncodingError::ConfigError {
                message: format!(
                    "grid extents must be positive, got {}x{}x{}",
                    self.t_len, self.h_len, self.w_len
                ),
            });
        }

        if self.embedding_dim == 0 || self.embedding_dim % 2 != 0 {
            return Err(EncodingError::InvalidDimension {
                dim: self.embedding_dim,
            });
        }

        if !self.base.is_finite() || self.base <= 1.0 {
            return Err(EncodingError::InvalidBase { base: self.base });
        }

        if !self.time_offset.is_finite() {
            return Err(EncodingError::ConfigError {
                message: format!("time_offset must be finite, got {}", self.time_offset),
            });
        }

        Ok(())
    }

    /// Total number of grid points before any sampling.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.t_len * self.h_len * self.w_len
    }
}
