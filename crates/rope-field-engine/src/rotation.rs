//! 2x2 rotation matrices and rotary encoding of a frequency band.

use serde::{Deserialize, Serialize};

use crate::freq::FrequencyBand;

/// Rotation by angle theta: `[[cos, -sin], [sin, cos]]`.
///
/// Stores the cosine/sine pair; the full matrix and derived quantities are
/// reconstructed on demand. Orthonormal with determinant 1 for any angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix {
    cos: f64,
    sin: f64,
}

impl RotationMatrix {
    /// Rotation by `angle` radians. Angles are unbounded; no periodic
    /// normalization is applied.
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        Self {
            cos: angle.cos(),
            sin: angle.sin(),
        }
    }

    /// The zero-angle rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self { cos: 1.0, sin: 0.0 }
    }

    #[inline]
    #[must_use]
    pub fn cos(&self) -> f64 {
        self.cos
    }

    #[inline]
    #[must_use]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    /// Row-major components `[m00, m01, m10, m11]`.
    #[inline]
    #[must_use]
    pub fn components(&self) -> [f64; 4] {
        [self.cos, -self.sin, self.sin, self.cos]
    }

    /// Recover the rotation angle, reduced into `(-pi, pi]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.sin.atan2(self.cos)
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.cos * self.cos + self.sin * self.sin
    }

    /// Rotate a 2-vector.
    #[must_use]
    pub fn apply(&self, v: [f64; 2]) -> [f64; 2] {
        [
            self.cos * v[0] - self.sin * v[1],
            self.sin * v[0] + self.cos * v[1],
        ]
    }

    /// Squared Frobenius norm: the sum of the four squared components.
    #[inline]
    #[must_use]
    pub fn norm_sq(&self) -> f64 {
        self.components().iter().map(|c| c * c).sum()
    }
}

/// One rotation matrix per band frequency: `angle = position * omega`.
///
/// Pure function of its inputs; `position` may carry a fractional offset.
#[must_use]
pub fn rotate_band(position: f64, band: &FrequencyBand) -> Vec<RotationMatrix> {
    band.frequencies()
        .iter()
        .map(|omega| RotationMatrix::from_angle(position * omega))
        .collect()
}
