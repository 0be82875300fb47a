//! Level-of-detail target policy.
//!
//! The thresholds trade visual fidelity for frame rate and are plain
//! configuration, never hardcoded at call sites.

use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, EncodingResult};

// ============================================================================
// DEFAULT FUNCTIONS
// ============================================================================

fn default_full_detail_limit() -> usize {
    1000
}

fn default_tiers() -> Vec<LodTier> {
    vec![
        LodTier {
            max_points: 5000,
            target: 2000,
        },
        LodTier {
            max_points: 20_000,
            target: 1000,
        },
    ]
}

fn default_coarse_target() -> usize {
    500
}

fn default_min_axis_samples() -> usize {
    2
}

// ============================================================================
// LOD CONFIG
// ============================================================================

/// One policy tier: grids up to `max_points` sample down to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LodTier {
    /// Upper grid size (inclusive) this tier covers.
    pub max_points: usize,
    /// Target sample size for grids in this tier.
    pub target: usize,
}

/// Target-count policy for grid sampling.
///
/// Defaults reproduce the standard rendering policy: up to 1000 points pass
/// through untouched, then 2000 / 1000 / 500 targets as grids grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodConfig {
    /// Grids with at most this many points are returned without sampling.
    #[serde(default = "default_full_detail_limit")]
    pub full_detail_limit: usize,

    /// Ordered tiers; the first tier whose `max_points` covers the grid
    /// picks the target.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<LodTier>,

    /// Target for grids beyond the last tier.
    #[serde(default = "default_coarse_target")]
    pub default_target: usize,

    /// Lower bound on per-axis kept-coordinate counts.
    #[serde(default = "default_min_axis_samples")]
    pub min_axis_samples: usize,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            full_detail_limit: default_full_detail_limit(),
            tiers: default_tiers(),
            default_target: default_coarse_target(),
            min_axis_samples: default_min_axis_samples(),
        }
    }
}

impl LodConfig {
    /// Target count for a grid of `total_points`, or `None` to keep every
    /// point.
    #[must_use]
    pub fn target_for(&self, total_points: usize) -> Option<usize> {
        if total_points <= self.full_detail_limit {
            return None;
        }
        for tier in &self.tiers {
            if total_points <= tier.max_points {
                return Some(tier.target);
            }
        }
        Some(self.default_target)
    }

    /// Validate tier ordering and counts.
    ///
    /// # Errors
    /// `EncodingError::ConfigError` for zero targets, a zero
    /// `min_axis_samples`, or tiers that do not strictly increase beyond
    /// the full-detail limit.
    pub fn validate(&self) -> EncodingResult<()> {
        if self.default_target == 0 {
            return Err(EncodingError::ConfigError {
                message: "default_target must be > 0".to_string(),
            });
        }

        if self.min_axis_samples == 0 {
            return Err(EncodingError::ConfigError {
                message: "min_axis_samples must be > 0".to_string(),
            });
        }

        let mut previous = self.full_detail_limit;
        for tier in &self.tiers {
            if tier.target == 0 {
                return Err(EncodingError::ConfigError {
                    message: format!("tier at {} points has zero target", tier.max_points),
                });
            }
            if tier.max_points <= previous {
                return Err(EncodingError::ConfigError {
                    message: format!(
                        "tier bounds must strictly increase: {} follows {}",
                        tier.max_points, previous
                    ),
                });
            }
            previous = tier.max_points;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_rendering_thresholds() {
        let lod = LodConfig::default();
        assert_eq!(lod.target_for(1), None);
        assert_eq!(lod.target_for(1000), None);
        assert_eq!(lod.target_for(1001), Some(2000));
        assert_eq!(lod.target_for(5000), Some(2000));
        assert_eq!(lod.target_for(5001), Some(1000));
        assert_eq!(lod.target_for(20_000), Some(1000));
        assert_eq!(lod.target_for(20_001), Some(500));
        assert_eq!(lod.target_for(1_000_000), Some(500));
    }

    #[test]
    fn default_policy_validates() {
        assert!(LodConfig::default().validate().is_ok());
    }

    #[test]
    fn unordered_tiers_are_rejected() {
        let lod = LodConfig {
            tiers: vec![
                LodTier {
                    max_points: 20_000,
                    target: 1000,
                },
                LodTier {
                    max_points: 5000,
                    target: 2000,
                },
            ],
            ..LodConfig::default()
        };
        assert!(lod.validate().is_err());
    }

    #[test]
    fn tier_overlapping_full_detail_limit_is_rejected() {
        let lod = LodConfig {
            full_detail_limit: 5000,
            tiers: vec![LodTier {
                max_points: 5000,
                target: 2000,
            }],
            ..LodConfig::default()
        };
        assert!(lod.validate().is_err());
    }

    #[test]
    fn zero_targets_are_rejected() {
        let lod = LodConfig {
            default_target: 0,
            ..LodConfig::default()
        };
        assert!(lod.validate().is_err());

        let lod = LodConfig {
            tiers: vec![LodTier {
                max_points: 5000,
                target: 0,
            }],
            ..LodConfig::default()
        };
        assert!(lod.validate().is_err());
    }

    #[test]
    fn empty_tiers_fall_through_to_default_target() {
        let lod = LodConfig {
            tiers: Vec::new(),
            ..LodConfig::default()
        };
        assert!(lod.validate().is_ok());
        assert_eq!(lod.target_for(2000), Some(500));
    }
}
