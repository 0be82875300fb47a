//! Batch cache keyed by parameter digest.
//!
//! # Architecture
//! - [`EncodingKey`]: xxHash64 digest of the descriptor and resolved axis
//!   widths
//! - [`CacheEntry`]: one batch behind an `Arc`, with access bookkeeping
//! - [`EncodingCache`]: bounded FIFO store with hit/miss/eviction counters
//!
//! The store hands out `Arc<EncodingBatch>` handles, so a hit is a pointer
//! clone regardless of batch size.

mod entry;
mod key;
mod store;

pub use entry::CacheEntry;
pub use key::EncodingKey;
pub use store::{CacheMetrics, CacheStats, EncodingCache};
