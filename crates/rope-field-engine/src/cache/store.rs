//! FIFO store for computed batches.
//!
//! Entries leave in insertion order once the store is full. Reads never
//! reorder the queue, so a hot key inserted early is still the first to go.
//! That is deliberate: batch parameters change rarely, recomputation is
//! cheap relative to tracking recency, and insertion order makes eviction
//! predictable in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use linked_hash_map::LinkedHashMap;
use serde::Serialize;
use tracing::{debug, error};

use crate::cache::entry::CacheEntry;
use crate::cache::key::EncodingKey;
use crate::config::CacheConfig;
use crate::embedding::EncodingBatch;
use crate::error::{EncodingError, EncodingResult};

// ===== METRICS =====

/// Cumulative counters for one store.
///
/// All counters are relaxed atomics; they feed stats, not control flow.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
}

impl CacheMetrics {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_insertion(&self) {
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.insertions.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn insertions(&self) -> u64 {
        self.insertions.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Hits over total lookups, `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }
}

/// Point-in-time view of a store, counters included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    /// Approximate bytes held by all entries.
    pub memory_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}

// ===== STORE =====

/// Bounded FIFO map from [`EncodingKey`] to a shared batch.
///
/// # Concurrency
/// Lookups take the read lock only; insertion order is never touched on a
/// hit, so concurrent readers do not serialize. Writes (insert, evict,
/// clear) take the write lock.
#[derive(Debug)]
pub struct EncodingCache {
    entries: RwLock<LinkedHashMap<EncodingKey, CacheEntry>>,
    capacity: usize,
    metrics: CacheMetrics,
}

impl EncodingCache {
    /// Create an empty store sized by `config.max_entries`.
    pub fn new(config: &CacheConfig) -> EncodingResult<Self> {
        config.validate()?;
        Ok(Self {
            entries: RwLock::new(LinkedHashMap::new()),
            capacity: config.max_entries,
            metrics: CacheMetrics::default(),
        })
    }

    /// Look up a batch, recording a hit or miss.
    ///
    /// Returns a shared handle; the entry itself stays in the store. A
    /// poisoned lock is reported as a miss so callers fall through to
    /// recomputation.
    #[must_use]
    pub fn get(&self, key: &EncodingKey) -> Option<Arc<EncodingBatch>> {
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(_) => {
                self.metrics.record_miss();
                return None;
            }
        };

        match entries.get(key) {
            Some(entry) => {
                entry.touch();
                entry.increment_access();
                self.metrics.record_hit();
                Some(entry.batch())
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Insert a batch, evicting front entries until the new one fits.
    ///
    /// Replacing an existing key never evicts unrelated entries.
    pub fn put(&self, key: EncodingKey, batch: Arc<EncodingBatch>) -> EncodingResult<()> {
        let entry = CacheEntry::new(batch);

        let mut entries = self.entries.write().map_err(|e| {
            error!("EncodingCache put error: lock poisoned: {}", e);
            EncodingError::CacheError {
                message: format!("lock poisoned: {}", e),
            }
        })?;

        if !entries.contains_key(&key) {
            while entries.len() >= self.capacity {
                Self::evict_front(&mut entries, &self.metrics);
            }
        }

        entries.insert(key, entry);
        self.metrics.record_insertion();
        Ok(())
    }

    /// Drop the oldest entry, front of the queue.
    fn evict_front(entries: &mut LinkedHashMap<EncodingKey, CacheEntry>, metrics: &CacheMetrics) {
        if let Some((key, entry)) = entries.pop_front() {
            metrics.record_eviction();
            debug!(
                "cache evicted {} after {} hits ({} bytes)",
                key,
                entry.access_count(),
                entry.memory_size()
            );
        }
    }

    /// Check presence without counting a hit or miss.
    pub fn contains(&self, key: &EncodingKey) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    /// Remove every entry and reset the counters.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
            self.metrics.reset();
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys in eviction order, oldest first.
    pub fn keys(&self) -> Vec<EncodingKey> {
        self.entries
            .read()
            .map(|entries| entries.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Approximate bytes held by all entries.
    pub fn memory_usage(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.values().map(CacheEntry::memory_size).sum())
            .unwrap_or(0)
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Snapshot entry counts, byte usage, and counters in one call.
    pub fn stats(&self) -> CacheStats {
        let (entries, memory_bytes) = self
            .entries
            .read()
            .map(|entries| {
                let bytes = entries.values().map(CacheEntry::memory_size).sum();
                (entries.len(), bytes)
            })
            .unwrap_or((0, 0));

        CacheStats {
            entries,
            capacity: self.capacity,
            memory_bytes,
            hits: self.metrics.hits(),
            misses: self.metrics.misses(),
            insertions: self.metrics.insertions(),
            evictions: self.metrics.evictions(),
            hit_rate: self.metrics.hit_rate(),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
