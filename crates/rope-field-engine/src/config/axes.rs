//! Axis embedding-width configuration.
//!
//! The mapping from the total embedding dimension to the three per-axis
//! widths is an explicit configuration input. Three policies exist:
//!
//! - `even`: equal even shares of `embedding_dim`, remainder to time.
//! - `scaled`: widths grow with the axis extent, capped by the even share.
//! - `explicit`: fully manual widths.
//!
//! Resolution happens once per `compute_encoding` call; the resolved widths
//! travel with the output batch and are part of the cache key.

use serde::{Deserialize, Serialize};

use crate::descriptor::TensorDescriptor;
use crate::error::{EncodingError, EncodingResult};

// ============================================================================
// RESOLVED AXIS WIDTHS
// ============================================================================

/// Resolved per-axis embedding widths, order time/height/width.
///
/// Every width is a positive even integer; an axis's frequency band has
/// `width / 2` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisDims {
    pub time: usize,
    pub height: usize,
    pub width: usize,
}

impl AxisDims {
    /// Widths as an array in enumeration-axis order.
    #[must_use]
    pub fn as_array(&self) -> [usize; 3] {
        [self.time, self.height, self.width]
    }

    /// Number of rotation matrices in one embedding: the sum of the three
    /// half-widths. Invariant across all positions of a descriptor.
    #[must_use]
    pub fn matrix_count(&self) -> usize {
        self.time / 2 + self.height / 2 + self.width / 2
    }

    fn validate(&self) -> EncodingResult<()> {
        for dim in self.as_array() {
            if dim == 0 || dim % 2 != 0 {
                return Err(EncodingError::InvalidDimension { dim });
            }
        }
        Ok(())
    }
}

// ============================================================================
// SPLIT POLICY
// ============================================================================

fn default_min_width() -> usize {
    4
}

/// Policy mapping `embedding_dim` to per-axis widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AxisSplit {
    /// Equal shares: `embedding_dim / 3` floored to even per axis, with the
    /// remainder added to the time axis. 128 resolves to `[44, 42, 42]`.
    #[default]
    Even,

    /// Extent-scaled: each axis gets `2 * extent` components, at least
    /// `min_width`, capped at `embedding_dim / 3`, floored to even. Widths
    /// need not sum to `embedding_dim`.
    Scaled {
        #[serde(default = "default_min_width")]
        min_width: usize,
    },

    /// Fully manual widths. Each must be a positive even integer; widths
    /// need not sum to `embedding_dim`.
    Explicit {
        time: usize,
        height: usize,
        width: usize,
    },
}

fn floor_to_even(value: usize) -> usize {
    value - value % 2
}

impl AxisSplit {
    /// Resolve per-axis widths for a descriptor.
    ///
    /// # Errors
    /// `EncodingError::InvalidDimension` when the policy produces a width
    /// that is zero or odd (for `even`/`scaled` this means `embedding_dim`
    /// is too small to cover three axes).
    pub fn resolve(&self, descriptor: &TensorDescriptor) -> EncodingResult<AxisDims> {
        let dims = match *self {
            AxisSplit::Even => {
                let share = floor_to_even(descriptor.embedding_dim / 3);
                let remainder = descriptor.embedding_dim.saturating_sub(3 * share);
                AxisDims {
                    time: share + remainder,
                    height: share,
                    width: share,
                }
            }
            AxisSplit::Scaled { min_width } => {
                let cap = descriptor.embedding_dim / 3;
                let scaled = |extent: usize| {
                    floor_to_even(cap.min(min_width.max(2 * extent)))
                };
                AxisDims {
                    time: scaled(descriptor.t_len),
                    height: scaled(descriptor.h_len),
                    width: scaled(descriptor.w_len),
                }
            }
            AxisSplit::Explicit {
                time,
                height,
                width,
            } => AxisDims {
                time,
                height,
                width,
            },
        };

        dims.validate()?;
        Ok(dims)
    }

    /// Validate the policy independent of any descriptor.
    ///
    /// # Errors
    /// - `EncodingError::InvalidDimension` for explicit widths that are
    ///   zero or odd
    /// - `EncodingError::ConfigError` for a scaled `min_width` below 2
    pub fn validate(&self) -> EncodingResult<()> {
        match *self {
            AxisSplit::Even => Ok(()),
            AxisSplit::Scaled { min_width } => {
                if min_width < 2 {
                    return Err(EncodingError::ConfigError {
                        message: format!("min_width must be >= 2, got {}", min_width),
                    });
                }
                Ok(())
            }
            AxisSplit::Explicit {
                time,
                height,
                width,
            } => AxisDims {
                time,
                height,
                width,
            }
            .validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor_with_dim(embedding_dim: usize) -> TensorDescriptor {
        TensorDescriptor {
            embedding_dim,
            ..TensorDescriptor::default()
        }
    }

    #[test]
    fn even_split_of_128_gives_44_42_42() {
        let dims = AxisSplit::Even.resolve(&descriptor_with_dim(128)).unwrap();
        assert_eq!(dims.as_array(), [44, 42, 42]);
        assert_eq!(dims.matrix_count(), 22 + 21 + 21);
    }

    #[test]
    fn even_split_remainder_lands_on_time_axis() {
        // 10 -> even share 2, remainder 4 -> time gets 6
        let dims = AxisSplit::Even.resolve(&descriptor_with_dim(10)).unwrap();
        assert_eq!(dims.as_array(), [6, 2, 2]);
    }

    #[test]
    fn even_split_rejects_dimension_too_small_for_three_axes() {
        let err = AxisSplit::Even.resolve(&descriptor_with_dim(4)).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidDimension { dim: 0 }));
    }

    #[test]
    fn scaled_split_matches_extent_derivation() {
        // 16x30x60 at dim 128: cap 42; time 2*16=32, height/width capped
        let descriptor = descriptor_with_dim(128);
        let dims = AxisSplit::Scaled { min_width: 4 }
            .resolve(&descriptor)
            .unwrap();
        assert_eq!(dims.as_array(), [32, 42, 42]);
    }

    #[test]
    fn scaled_split_applies_min_width_on_tiny_extents() {
        let descriptor = TensorDescriptor {
            t_len: 1,
            h_len: 1,
            w_len: 1,
            embedding_dim: 128,
            ..TensorDescriptor::default()
        };
        let dims = AxisSplit::Scaled { min_width: 4 }
            .resolve(&descriptor)
            .unwrap();
        assert_eq!(dims.as_array(), [4, 4, 4]);
    }

    #[test]
    fn explicit_split_passes_widths_through() {
        let dims = AxisSplit::Explicit {
            time: 4,
            height: 4,
            width: 4,
        }
        .resolve(&descriptor_with_dim(12))
        .unwrap();
        assert_eq!(dims.as_array(), [4, 4, 4]);
        assert_eq!(dims.matrix_count(), 6);
    }

    #[test]
    fn explicit_split_rejects_odd_width() {
        let split = AxisSplit::Explicit {
            time: 4,
            height: 5,
            width: 4,
        };
        assert!(matches!(
            split.validate(),
            Err(EncodingError::InvalidDimension { dim: 5 })
        ));
        assert!(split.resolve(&descriptor_with_dim(128)).is_err());
    }

    #[test]
    fn scaled_split_rejects_min_width_below_two() {
        let split = AxisSplit::Scaled { min_width: 1 };
        assert!(matches!(
            split.validate(),
            Err(EncodingError::ConfigError { .. })
        ));
    }

    #[test]
    fn default_split_is_even() {
        assert_eq!(AxisSplit::default(), AxisSplit::Even);
    }

    #[test]
    fn split_round_trips_through_serde_tag() {
        let split = AxisSplit::Scaled { min_width: 6 };
        let json = serde_json::to_string(&split).unwrap();
        assert!(json.contains(r#""mode":"scaled""#));
        let back: AxisSplit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, split);
    }
}
