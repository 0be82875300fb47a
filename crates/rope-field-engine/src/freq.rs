//! Per-axis frequency band derivation.
//!
//! An axis of even width `w` carries `w / 2` rotation frequencies
//! `omega_i = base^-scale_i`, with scales evenly spaced over
//! `[0, (w - 2) / w]` inclusive. Index 0 is always scale 0 (frequency 1);
//! later indices decay toward `base^-((w - 2) / w)`, so the band is
//! monotonically non-increasing.

use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, EncodingResult};

/// Evenly spaced exponent scales for one axis width.
///
/// Returns `axis_width / 2` values over `[0, (axis_width - 2) /
/// axis_width]` inclusive; a width of 2 yields the single scale 0.
///
/// # Errors
/// `EncodingError::InvalidDimension` for a zero or odd width. Odd widths
/// are rejected outright: band length and component pairing both depend on
/// evenness, so rounding here would corrupt downstream shapes.
pub fn frequency_scales(axis_width: usize) -> EncodingResult<Vec<f64>> {
    if axis_width == 0 || axis_width % 2 != 0 {
        return Err(EncodingError::InvalidDimension { dim: axis_width });
    }

    let steps = axis_width / 2;
    if steps == 1 {
        return Ok(vec![0.0]);
    }

    let end = (axis_width - 2) as f64 / axis_width as f64;
    let last = (steps - 1) as f64;
    Ok((0..steps).map(|i| end * i as f64 / last).collect())
}

/// Ordered decaying frequencies for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    frequencies: Vec<f64>,
}

impl FrequencyBand {
    /// Derive the band for an axis width and base.
    ///
    /// # Errors
    /// - `EncodingError::InvalidDimension` for a zero or odd width
    /// - `EncodingError::InvalidBase` for a base that is not finite or
    ///   `<= 1`
    pub fn derive(axis_width: usize, base: f64) -> EncodingResult<Self> {
        if !base.is_finite() || base <= 1.0 {
            return Err(EncodingError::InvalidBase { base });
        }

        let frequencies = frequency_scales(axis_width)?
            .into_iter()
            .map(|scale| base.powf(-scale))
            .collect();

        Ok(Self { frequencies })
    }

    /// The frequencies, highest (1.0) first.
    #[inline]
    #[must_use]
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Band length: `axis_width / 2`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}
