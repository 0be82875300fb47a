//! Structured level-of-detail sampling over the coordinate grid.
//!
//! Reduction preserves the grid's axis proportions: a shared cube-root
//! ratio scales each axis's kept count, and a position survives when every
//! coordinate is divisible by its axis step. A flat stride over the
//! enumeration order would bias the fastest axis; the modulo lattice
//! thins all three axes evenly.
//!
//! The lattice can overshoot the target by a partial block (per-axis kept
//! count is `ceil(extent / step)`), so the output is truncated to the
//! target in enumeration order; the size cap is strict.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LodConfig;
use crate::grid::{Axis, Position, PositionGrid};

/// The per-axis reduction plan applied to one grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePlan {
    /// Shared cube-root reduction ratio `(target / total)^(1/3)`.
    pub ratio: f64,
    /// Kept-coordinate counts per axis (time, height, width).
    pub sample_counts: [usize; 3],
    /// Coordinate steps per axis (time, height, width).
    pub steps: [usize; 3],
    /// Hard output cap.
    pub target: usize,
}

/// Grid sampler driven by a [`LodConfig`].
#[derive(Debug, Clone)]
pub struct GridSampler {
    config: LodConfig,
}

impl GridSampler {
    #[must_use]
    pub fn new(config: LodConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LodConfig {
        &self.config
    }

    /// Reduction plan for a grid, or `None` when every point is kept
    /// (grid under the full-detail limit, or already within its target).
    #[must_use]
    pub fn plan(&self, grid: &PositionGrid) -> Option<SamplePlan> {
        let total = grid.len();
        let target = self.config.target_for(total)?;
        if total <= target {
            return None;
        }

        let ratio = (target as f64 / total as f64).cbrt();
        let mut sample_counts = [0usize; 3];
        let mut steps = [0usize; 3];
        for (i, axis) in Axis::ALL.iter().enumerate() {
            let extent = grid.extent(*axis);
            let count = ((extent as f64 * ratio).floor() as usize).max(self.config.min_axis_samples);
            let step = ((extent as f64 / count as f64).round() as usize).max(1);
            sample_counts[i] = count;
            steps[i] = step;
        }

        Some(SamplePlan {
            ratio,
            sample_counts,
            steps,
            target,
        })
    }

    /// Sampled positions in enumeration order, with the plan applied (or
    /// `None` when the grid was kept whole).
    #[must_use]
    pub fn sample(&self, grid: &PositionGrid) -> (Vec<Position>, Option<SamplePlan>) {
        let Some(plan) = self.plan(grid) else {
            return (grid.iter().collect(), None);
        };

        let picked = apply_plan(grid, &plan);
        debug!(
            "structured sampling: total={} kept={} ratio={:.4} steps=({},{},{})",
            grid.len(),
            picked.len(),
            plan.ratio,
            plan.steps[0],
            plan.steps[1],
            plan.steps[2]
        );

        if picked.is_empty() {
            // The lattice always retains the origin, so this only fires if
            // the plan formulas change; the recovery is part of the
            // contract regardless.
            warn!(
                "degenerate sample for {} points, truncating enumeration to {}",
                grid.len(),
                plan.target
            );
            return (truncate_grid(grid, plan.target), Some(plan));
        }

        (picked, Some(plan))
    }
}

/// Keep positions whose coordinates are all divisible by the axis steps,
/// stopping at the plan target.
fn apply_plan(grid: &PositionGrid, plan: &SamplePlan) -> Vec<Position> {
    let [t_step, h_step, w_step] = plan.steps;
    let mut picked = Vec::with_capacity(plan.target);
    for position in grid.iter() {
        if position.t % t_step == 0 && position.h % h_step == 0 && position.w % w_step == 0 {
            picked.push(position);
            if picked.len() == plan.target {
                break;
            }
        }
    }
    picked
}

/// First `target` positions in enumeration order.
fn truncate_grid(grid: &PositionGrid, target: usize) -> Vec<Position> {
    grid.iter().take(target).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn sampler() -> GridSampler {
        GridSampler::new(LodConfig::default())
    }

    /// Distinct coordinates along one axis of a sample.
    fn axis_coordinates(positions: &[Position], axis: Axis) -> Vec<usize> {
        let set: BTreeSet<usize> = positions.iter().map(|p| p.along(axis)).collect();
        set.into_iter().collect()
    }

    fn assert_arithmetic_progression(coords: &[usize], step: usize) {
        assert_eq!(coords[0], 0);
        for pair in coords.windows(2) {
            assert_eq!(pair[1] - pair[0], step);
        }
    }

    #[test]
    fn small_grid_passes_through_whole() {
        let grid = PositionGrid::new(5, 5, 5);
        let (positions, plan) = sampler().sample(&grid);
        assert_eq!(positions.len(), 125);
        assert!(plan.is_none());
        // Enumeration order preserved
        assert_eq!(positions[0], Position::new(0, 0, 0));
        assert_eq!(positions[124], Position::new(4, 4, 4));
    }

    #[test]
    fn grid_within_tier_target_passes_through_whole() {
        // 1728 points, tier target 2000: nothing to reduce
        let grid = PositionGrid::new(12, 12, 12);
        let (positions, plan) = sampler().sample(&grid);
        assert_eq!(positions.len(), 1728);
        assert!(plan.is_none());
    }

    #[test]
    fn million_point_grid_plans_reference_ratio_and_steps() {
        let grid = PositionGrid::new(100, 100, 100);
        let plan = sampler().plan(&grid).unwrap();
        assert_eq!(plan.target, 500);
        assert!((plan.ratio - 0.0794).abs() < 1e-3);
        assert_eq!(plan.sample_counts, [7, 7, 7]);
        assert_eq!(plan.steps, [14, 14, 14]);
        // Per axis, sample_count * step lands within one step of the extent
        for i in 0..3 {
            let covered = plan.sample_counts[i] * plan.steps[i];
            assert!(covered.abs_diff(100) <= plan.steps[i]);
        }
    }

    #[test]
    fn million_point_sample_is_capped_at_target() {
        let grid = PositionGrid::new(100, 100, 100);
        let (positions, plan) = sampler().sample(&grid);
        let plan = plan.unwrap();
        // The 8x8x8 lattice overshoots to 512; the cap truncates the tail
        assert_eq!(positions.len(), 500);
        // Axis coordinate sets stay full arithmetic progressions
        for axis in Axis::ALL {
            let coords = axis_coordinates(&positions, axis);
            assert_eq!(coords, vec![0, 14, 28, 42, 56, 70, 84, 98]);
        }
        assert_eq!(plan.steps, [14, 14, 14]);
    }

    #[test]
    fn exact_lattice_fit_needs_no_truncation() {
        // 8000 points, target 1000: steps of 2 keep exactly 10^3
        let grid = PositionGrid::new(20, 20, 20);
        let (positions, plan) = sampler().sample(&grid);
        let plan = plan.unwrap();
        assert_eq!(plan.steps, [2, 2, 2]);
        assert_eq!(positions.len(), 1000);
        for axis in Axis::ALL {
            let coords = axis_coordinates(&positions, axis);
            assert_eq!(coords.len(), 10);
            assert_arithmetic_progression(&coords, 2);
        }
    }

    #[test]
    fn default_descriptor_grid_thins_proportionally() {
        // 16x30x60 = 28800 points, target 500
        let grid = PositionGrid::new(16, 30, 60);
        let (positions, plan) = sampler().sample(&grid);
        let plan = plan.unwrap();
        assert_eq!(plan.steps, [4, 4, 4]);
        assert_eq!(positions.len(), 4 * 8 * 15);
        assert!(positions.len() <= 500);
        for axis in Axis::ALL {
            assert_arithmetic_progression(&axis_coordinates(&positions, axis), 4);
        }
    }

    #[test]
    fn tiny_axis_floors_to_min_samples() {
        // t extent 2 cannot thin below the configured minimum of 2, which
        // drives its step to 1: the axis keeps every coordinate and the
        // whole lattice degenerates to the enumeration prefix at the cap.
        let grid = PositionGrid::new(2, 50, 50);
        let plan = sampler().plan(&grid).unwrap();
        assert_eq!(plan.sample_counts, [2, 36, 36]);
        assert_eq!(plan.steps, [1, 1, 1]);
        assert_eq!(plan.target, 2000);

        let (positions, _) = sampler().sample(&grid);
        let expected: Vec<Position> = grid.iter().take(2000).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn sampled_output_is_in_enumeration_order() {
        let grid = PositionGrid::new(30, 30, 30);
        let (positions, _) = sampler().sample(&grid);
        let mut last_index = 0;
        for position in &positions {
            let index = (position.t * 30 + position.h) * 30 + position.w;
            assert!(index >= last_index);
            last_index = index;
        }
    }

    #[test]
    fn degenerate_fallback_truncates_in_enumeration_order() {
        let grid = PositionGrid::new(4, 4, 4);
        let truncated = truncate_grid(&grid, 5);
        assert_eq!(truncated.len(), 5);
        assert_eq!(truncated[0], Position::new(0, 0, 0));
        assert_eq!(truncated[4], Position::new(0, 1, 0));
    }

    #[test]
    fn lattice_always_retains_the_origin() {
        let grid = PositionGrid::new(100, 100, 100);
        let plan = sampler().plan(&grid).unwrap();
        let picked = apply_plan(&grid, &plan);
        assert_eq!(picked[0], Position::new(0, 0, 0));
        assert!(!picked.is_empty());
    }

    #[test]
    fn custom_policy_drives_the_plan() {
        let config = LodConfig {
            full_detail_limit: 10,
            tiers: Vec::new(),
            default_target: 64,
            min_axis_samples: 2,
        };
        let grid = PositionGrid::new(16, 16, 16);
        let (positions, plan) = GridSampler::new(config).sample(&grid);
        assert_eq!(plan.unwrap().target, 64);
        assert!(positions.len() <= 64);
    }
}
