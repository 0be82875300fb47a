//! Integer coordinate grid enumeration.
//!
//! Enumeration order is load-bearing: time is the outermost axis, width
//! the fastest. Every index-to-position correspondence in the engine
//! assumes this order.

use serde::{Deserialize, Serialize};

/// One coordinate axis of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Time,
    Height,
    Width,
}

impl Axis {
    /// All axes in enumeration order (outermost first).
    pub const ALL: [Axis; 3] = [Axis::Time, Axis::Height, Axis::Width];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Time => "time",
            Axis::Height => "height",
            Axis::Width => "width",
        }
    }
}

/// Integer coordinate triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub t: usize,
    pub h: usize,
    pub w: usize,
}

impl Position {
    #[must_use]
    pub fn new(t: usize, h: usize, w: usize) -> Self {
        Self { t, h, w }
    }

    /// Coordinate along one axis.
    #[must_use]
    pub fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Time => self.t,
            Axis::Height => self.h,
            Axis::Width => self.w,
        }
    }
}

/// The full cartesian grid `[0, t_len) x [0, h_len) x [0, w_len)`.
///
/// Holds no upper bound on its own size; bounding happens downstream in
/// the sampler. Positions are produced lazily, never materialized here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionGrid {
    t_len: usize,
    h_len: usize,
    w_len: usize,
}

impl PositionGrid {
    #[must_use]
    pub fn new(t_len: usize, h_len: usize, w_len: usize) -> Self {
        Self {
            t_len,
            h_len,
            w_len,
        }
    }

    /// Total number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.t_len * self.h_len * self.w_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent along one axis.
    #[must_use]
    pub fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::Time => self.t_len,
            Axis::Height => self.h_len,
            Axis::Width => self.w_len,
        }
    }

    /// Position at a flat enumeration index (width fastest).
    ///
    /// `index` must be below `len()`.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Position {
        debug_assert!(index < self.len());
        Position {
            t: index / (self.w_len * self.h_len),
            h: (index / self.w_len) % self.h_len,
            w: index % self.w_len,
        }
    }

    /// Iterate every position in enumeration order.
    #[must_use]
    pub fn iter(&self) -> GridIter {
        GridIter {
            grid: *self,
            index: 0,
        }
    }
}

impl IntoIterator for &PositionGrid {
    type Item = Position;
    type IntoIter = GridIter;

    fn into_iter(self) -> GridIter {
        self.iter()
    }
}

/// Width-fastest iterator over every grid position.
#[derive(Debug, Clone)]
pub struct GridIter {
    grid: PositionGrid,
    index: usize,
}

impl Iterator for GridIter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.index >= self.grid.len() {
            return None;
        }
        let position = self.grid.position_at(self.index);
        self.index += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter {}
