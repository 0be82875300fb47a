//! Cache key derivation from encoding parameters.
//!
//! This module provides [`EncodingKey`], a key derived from an xxHash64
//! digest of every parameter that shapes a batch.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh64::xxh64;

use crate::config::AxisDims;
use crate::descriptor::TensorDescriptor;

/// Number of u64 fields packed into the digest input.
const PACKED_FIELDS: usize = 9;

/// Key for one computed batch.
///
/// # Design Rationale
/// - `Copy` + `Eq` + `Hash` enables direct map usage
/// - 8 bytes = single register, no allocation
/// - the resolved axis widths are part of the packing, so an axis-policy
///   change can never alias a stale entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodingKey {
    /// xxHash64 over the canonical little-endian packing of the
    /// descriptor fields and resolved widths.
    pub digest: u64,
}

impl EncodingKey {
    /// Digest a descriptor and its resolved axis widths.
    ///
    /// Equal parameter tuples always produce equal keys; float fields are
    /// packed bit-exactly.
    #[must_use]
    pub fn new(descriptor: &TensorDescriptor, dims: AxisDims) -> Self {
        let fields: [u64; PACKED_FIELDS] = [
            descriptor.t_len as u64,
            descriptor.h_len as u64,
            descriptor.w_len as u64,
            descriptor.embedding_dim as u64,
            descriptor.base.to_bits(),
            descriptor.time_offset.to_bits(),
            dims.time as u64,
            dims.height as u64,
            dims.width as u64,
        ];

        let mut packed = [0u8; PACKED_FIELDS * 8];
        for (chunk, field) in packed.chunks_exact_mut(8).zip(fields) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }

        Self {
            digest: xxh64(&packed, 0),
        }
    }
}

impl From<u64> for EncodingKey {
    fn from(digest: u64) -> Self {
        Self { digest }
    }
}

impl fmt::Display for EncodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.digest)
    }
}
