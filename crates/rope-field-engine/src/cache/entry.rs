//! Cache entry wrapping a computed batch with access metadata.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

use crate::embedding::EncodingBatch;

/// Process-wide reference instant for access timestamps.
///
/// Timestamps are stored as nanoseconds since this instant so they fit in
/// an `AtomicU64` and can be updated through a shared reference.
pub(crate) static START_INSTANT: Lazy<Instant> = Lazy::new(Instant::now);

/// Metadata bytes per entry: Arc pointer, `Instant`, and the two atomics.
const CACHE_ENTRY_METADATA_SIZE: usize = 8 + 16 + 8 + 4;

/// One cached batch plus bookkeeping for stats.
///
/// The batch itself is shared via `Arc`, so handing it to a caller never
/// copies matrix data. Hit counts and access times are atomics because the
/// store serves reads under a shared lock.
#[derive(Debug)]
pub struct CacheEntry {
    batch: Arc<EncodingBatch>,
    created_at: Instant,
    /// Nanoseconds since [`START_INSTANT`] at the most recent access.
    last_accessed: AtomicU64,
    /// Hits served by this entry since insertion.
    access_count: AtomicU32,
}

impl CacheEntry {
    pub fn new(batch: Arc<EncodingBatch>) -> Self {
        let now = nanos_since_start();
        Self {
            batch,
            created_at: Instant::now(),
            last_accessed: AtomicU64::new(now),
            access_count: AtomicU32::new(0),
        }
    }

    /// Shared handle to the cached batch.
    pub fn batch(&self) -> Arc<EncodingBatch> {
        Arc::clone(&self.batch)
    }

    /// Record an access right now.
    pub fn touch(&self) {
        self.last_accessed
            .store(nanos_since_start(), Ordering::Relaxed);
    }

    /// Bump the hit counter and return the new value.
    pub fn increment_access(&self) -> u32 {
        self.access_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn access_count(&self) -> u32 {
        self.access_count.load(Ordering::Relaxed)
    }

    /// Time elapsed since the entry was inserted.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Approximate bytes held by the entry, payload plus metadata.
    pub fn memory_size(&self) -> usize {
        self.batch.memory_size() + CACHE_ENTRY_METADATA_SIZE
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Most recent access, as an offset from [`START_INSTANT`].
    pub fn last_accessed(&self) -> Duration {
        Duration::from_nanos(self.last_accessed.load(Ordering::Relaxed))
    }
}

fn nanos_since_start() -> u64 {
    START_INSTANT.elapsed().as_nanos() as u64
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
