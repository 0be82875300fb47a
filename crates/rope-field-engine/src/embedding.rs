//! Embedding assembly: per-axis rotation sequences concatenated per
//! position, plus the scalar summaries consumers map to color and size.

use serde::{Deserialize, Serialize};

use crate::config::AxisDims;
use crate::descriptor::TensorDescriptor;
use crate::error::EncodingResult;
use crate::freq::FrequencyBand;
use crate::grid::Position;
use crate::rotation::{rotate_band, RotationMatrix};
use crate::sampler::SamplePlan;

/// One position's encoding: the rotation-matrix sequence and its derived
/// magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEncoding {
    pub position: Position,
    /// Concatenated per-axis matrices, order time, height, width.
    pub matrices: Vec<RotationMatrix>,
    /// Square root of the sum of every squared matrix component.
    pub magnitude: f64,
    /// Mean per-matrix Frobenius norm within each axis segment, order
    /// time, height, width.
    pub axis_magnitudes: [f64; 3],
}

/// Output of one engine call: the sampled encodings plus how they were
/// chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingBatch {
    /// Sampled encodings in enumeration order.
    pub encodings: Vec<PositionEncoding>,
    /// Grid size before sampling.
    pub grid_points: usize,
    /// Resolved per-axis embedding widths.
    pub axis_dims: AxisDims,
    /// Sampling plan applied, `None` when the grid was kept whole.
    pub plan: Option<SamplePlan>,
}

impl EncodingBatch {
    /// Number of encoded positions in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// Approximate resident size of the batch in bytes.
    ///
    /// Counts the encoding vector and every matrix buffer; used by the
    /// cache for memory accounting, not for allocation decisions.
    #[must_use]
    pub fn memory_size(&self) -> usize {
        let matrix_bytes: usize = self
            .encodings
            .iter()
            .map(|encoding| encoding.matrices.len() * std::mem::size_of::<RotationMatrix>())
            .sum();
        std::mem::size_of::<Self>()
            + self.encodings.len() * std::mem::size_of::<PositionEncoding>()
            + matrix_bytes
    }
}

/// Builds embeddings for positions under one fixed descriptor.
///
/// The three axis bands are derived once at construction; `encode` is then
/// a pure function per position. The time axis rotates by `t +
/// time_offset`; height and width rotate by the raw coordinate.
#[derive(Debug, Clone)]
pub struct EmbeddingAssembler {
    bands: [FrequencyBand; 3],
    time_offset: f64,
}

impl EmbeddingAssembler {
    /// Derive the three axis bands for `dims` under `descriptor`.
    ///
    /// # Errors
    /// Propagates band derivation failures (`InvalidDimension`,
    /// `InvalidBase`).
    pub fn new(descriptor: &TensorDescriptor, dims: AxisDims) -> EncodingResult<Self> {
        let bands = [
            FrequencyBand::derive(dims.time, descriptor.base)?,
            FrequencyBand::derive(dims.height, descriptor.base)?,
            FrequencyBand::derive(dims.width, descriptor.base)?,
        ];
        Ok(Self {
            bands,
            time_offset: descriptor.time_offset,
        })
    }

    /// Matrices per embedding. Invariant across positions.
    #[must_use]
    pub fn embedding_len(&self) -> usize {
        self.bands.iter().map(FrequencyBand::len).sum()
    }

    /// Encode one position.
    #[must_use]
    pub fn encode(&self, position: Position) -> PositionEncoding {
        let axis_positions = [
            position.t as f64 + self.time_offset,
            position.h as f64,
            position.w as f64,
        ];

        let mut matrices = Vec::with_capacity(self.embedding_len());
        let mut axis_magnitudes = [0.0_f64; 3];
        let mut total_sq = 0.0_f64;

        for (i, band) in self.bands.iter().enumerate() {
            let segment = rotate_band(axis_positions[i], band);
            let mut norm_sum = 0.0;
            for matrix in &segment {
                let norm_sq = matrix.norm_sq();
                total_sq += norm_sq;
                norm_sum += norm_sq.sqrt();
            }
            if !segment.is_empty() {
                axis_magnitudes[i] = norm_sum / segment.len() as f64;
            }
            matrices.extend(segment);
        }

        PositionEncoding {
            position,
            matrices,
            magnitude: total_sq.sqrt(),
            axis_magnitudes,
        }
    }
}
