//! Rope Field Engine
//!
//! Computes 3-axis rotary position encodings (RoPE) for tensor grids, with
//! level-of-detail sampling for large grids and a FIFO batch cache.
//!
//! # Architecture
//!
//! This crate defines:
//! - Request and policy types (`TensorDescriptor`, `EngineConfig`)
//! - The per-axis frequency / rotation pipeline (`freq`, `rotation`,
//!   `embedding`)
//! - Grid enumeration and structured sampling (`grid`, `sampler`)
//! - A digest-keyed batch cache (`cache`)
//! - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use rope_field_engine::{EngineConfig, RopeFieldEngine, TensorDescriptor};
//!
//! # fn main() -> rope_field_engine::EncodingResult<()> {
//! let engine = RopeFieldEngine::new(EngineConfig::default())?;
//! let descriptor = TensorDescriptor {
//!     t_len: 2,
//!     h_len: 2,
//!     w_len: 2,
//!     ..TensorDescriptor::default()
//! };
//! let batch = engine.compute_encoding(&descriptor)?;
//!
//! // 8 grid points, each carrying embedding_dim / 2 rotation matrices.
//! assert_eq!(batch.len(), 8);
//! assert_eq!(batch.encodings[0].matrices.len(), 64);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod descriptor;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod freq;
pub mod grid;
pub mod rotation;
pub mod sampler;

// Re-exports for convenience
pub use cache::{CacheStats, EncodingCache};
pub use config::{AxisSplit, EngineConfig, LodConfig};
pub use descriptor::TensorDescriptor;
pub use embedding::{EncodingBatch, PositionEncoding};
pub use engine::RopeFieldEngine;
pub use error::{EncodingError, EncodingResult};
