//! Core error types for the encoding engine.

use thiserror::Error;

/// Error type for all engine failures.
///
/// # Error Categories
///
/// | Category | Variants | Recovery Strategy |
/// |----------|----------|-------------------|
/// | Validation | InvalidDimension, InvalidBase | Fix input parameters |
/// | Configuration | ConfigError | Fix configuration |
/// | Infrastructure | CacheError | Retry or disable cache |
///
/// # Design Principles
///
/// - **NO FALLBACKS**: degenerate numeric inputs are rejected before any
///   computation starts, never coerced into NaN/Inf output
/// - **FAIL FAST**: validation runs up front, at construction or at the
///   top of `compute_encoding`
///
/// There is no I/O in the computation path, so no transient-failure class
/// exists here. The sampler's degenerate-lattice case is recovered locally
/// (fallback truncation) and is deliberately not an error variant.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// An embedding dimension or per-axis width is zero or odd. Rotation
    /// matrices consume component pairs, so every width must be a positive
    /// even integer; odd widths are rejected, never rounded.
    #[error("Invalid dimension {dim}: expected a positive even integer")]
    InvalidDimension { dim: usize },

    /// The frequency base is degenerate. Bands decay as `base^-scale`,
    /// which requires a finite base strictly greater than 1.
    #[error("Invalid base {base}: expected a finite value greater than 1.0")]
    InvalidBase { base: f64 },

    /// Configuration could not be loaded, parsed, or validated.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Cache infrastructure failure (poisoned lock).
    #[error("Cache error: {message}")]
    CacheError { message: String },
}

/// Result type alias for all fallible engine operations.
pub type EncodingResult<T> = Result<T, EncodingError>;
