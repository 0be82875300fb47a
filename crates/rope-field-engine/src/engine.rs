//! Top-level engine: one call from descriptor to encoded batch.
//!
//! The engine owns the axis-split policy, the sampler, and optionally a
//! cache. Each request runs validate, resolve widths, key lookup, and on a
//! miss the grid / sample / assemble pipeline.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{EncodingCache, EncodingKey};
use crate::config::EngineConfig;
use crate::descriptor::TensorDescriptor;
use crate::embedding::{EmbeddingAssembler, EncodingBatch};
use crate::error::EncodingResult;
use crate::grid::PositionGrid;
use crate::sampler::GridSampler;

/// Computes position-encoding batches for tensor grids.
///
/// Construction validates the configuration once; requests then only
/// validate their own descriptor. The engine is `Send + Sync`, so one
/// instance can serve concurrent callers.
#[derive(Debug)]
pub struct RopeFieldEngine {
    config: EngineConfig,
    sampler: GridSampler,
    cache: Option<Arc<EncodingCache>>,
}

impl RopeFieldEngine {
    /// Build an engine, creating its own cache when `config.cache.enabled`.
    pub fn new(config: EngineConfig) -> EncodingResult<Self> {
        config.validate()?;
        let cache = if config.cache.enabled {
            Some(Arc::new(EncodingCache::new(&config.cache)?))
        } else {
            None
        };
        let sampler = GridSampler::new(config.lod.clone());
        Ok(Self {
            config,
            sampler,
            cache,
        })
    }

    /// Build an engine around a caller-provided store.
    ///
    /// Several engines can share one store this way; `config.cache.enabled`
    /// is ignored in favor of the handle.
    pub fn with_cache(config: EngineConfig, cache: Arc<EncodingCache>) -> EncodingResult<Self> {
        config.validate()?;
        let sampler = GridSampler::new(config.lod.clone());
        Ok(Self {
            config,
            sampler,
            cache: Some(cache),
        })
    }

    /// Encode the grid described by `descriptor`.
    ///
    /// Returns a shared batch: sampled positions in enumeration order, each
    /// with its rotation matrices and magnitudes. Identical parameters hit
    /// the cache and return the same allocation.
    pub fn compute_encoding(
        &self,
        descriptor: &TensorDescriptor,
    ) -> EncodingResult<Arc<EncodingBatch>> {
        descriptor.validate()?;
        let dims = self.config.axes.resolve(descriptor)?;
        let key = EncodingKey::new(descriptor, dims);

        if let Some(cache) = &self.cache {
            if let Some(batch) = cache.get(&key) {
                debug!("cache hit {}: {} encodings", key, batch.len());
                return Ok(batch);
            }
        }

        let grid = PositionGrid::new(descriptor.t_len, descriptor.h_len, descriptor.w_len);
        let (positions, plan) = self.sampler.sample(&grid);
        let assembler = EmbeddingAssembler::new(descriptor, dims)?;

        let encodings = positions
            .into_iter()
            .map(|position| assembler.encode(position))
            .collect();

        let batch = Arc::new(EncodingBatch {
            encodings,
            grid_points: grid.len(),
            axis_dims: dims,
            plan,
        });
        debug!(
            "computed {}: {} of {} positions, embedding dim {}",
            key,
            batch.len(),
            grid.len(),
            descriptor.embedding_dim
        );

        if let Some(cache) = &self.cache {
            cache.put(key, Arc::clone(&batch))?;
        }
        Ok(batch)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine's store, `None` when caching is disabled.
    pub fn cache(&self) -> Option<&Arc<EncodingCache>> {
        self.cache.as_ref()
    }
}
