use serde::{Deserialize, Serialize};

use crate::utils::validation::{check_sequence_limit, check_symbols, validate_padded, ValidationError};

/// Filler written into unused trailing positions by [`SequenceBatch::from_sequences`].
pub const PAD_SYMBOL: i64 = -1;

/// A padded collection of variable-length integer sequences.
///
/// Rows are stored contiguously (row-major) with a common `width`. Each row has
/// a valid length; positions at or beyond it are filler and never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBatch", into = "RawBatch")]
pub struct SequenceBatch {
    data: Vec<i64>,
    width: usize,
    lengths: Vec<usize>,
}

impl SequenceBatch {
    /// Build a batch from a row-major padded buffer and its valid lengths.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the buffer is not `lengths.len() * width`
    /// long, a length is negative or exceeds `width`, or a valid symbol is negative.
    pub fn from_padded(
        data: Vec<i64>,
        width: usize,
        lengths: &[i64],
    ) -> Result<Self, ValidationError> {
        let lengths = validate_padded(&data, width, lengths)?;
        Ok(Self {
            data,
            width,
            lengths,
        })
    }

    /// Build a batch from nested padded rows, as produced by an external encoder.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::RaggedRow` if rows differ in width, or any
    /// error from [`SequenceBatch::from_padded`].
    pub fn from_rows(rows: &[Vec<i64>], lengths: &[i64]) -> Result<Self, ValidationError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * width);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ValidationError::RaggedRow {
                    index,
                    actual: row.len(),
                    width,
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_padded(data, width, lengths)
    }

    /// Pad unpadded sequences to the longest one with [`PAD_SYMBOL`].
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if a symbol is negative or there are too many sequences.
    pub fn from_sequences<S: AsRef<[i64]>>(sequences: &[S]) -> Result<Self, ValidationError> {
        check_sequence_limit(sequences.len())?;
        let width = sequences
            .iter()
            .map(|s| s.as_ref().len())
            .max()
            .unwrap_or(0);

        let mut data = Vec::with_capacity(sequences.len() * width);
        let mut lengths = Vec::with_capacity(sequences.len());
        for (index, sequence) in sequences.iter().enumerate() {
            let sequence = sequence.as_ref();
            check_symbols(index, sequence)?;
            data.extend_from_slice(sequence);
            data.resize(data.len() + width - sequence.len(), PAD_SYMBOL);
            lengths.push(sequence.len());
        }

        Ok(Self {
            data,
            width,
            lengths,
        })
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Padded row width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Valid length of every sequence
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// The valid (unpadded) symbols of sequence `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> &[i64] {
        let start = index * self.width;
        &self.data[start..start + self.lengths[index]]
    }

    /// Iterate over the valid symbols of every sequence.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[i64]> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// True when both batches hold the same sequences, ignoring padding.
    pub fn same_sequences(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b))
    }

    /// Copy of this batch with runs of identical consecutive symbols collapsed.
    #[must_use]
    pub fn collapse_repeats(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        let mut lengths = Vec::with_capacity(self.len());
        for sequence in self.iter() {
            let start = data.len();
            for &symbol in sequence {
                if data.len() == start || data.last() != Some(&symbol) {
                    data.push(symbol);
                }
            }
            lengths.push(data.len() - start);
            data.resize(start + self.width, PAD_SYMBOL);
        }

        Self {
            data,
            width: self.width,
            lengths,
        }
    }
}

/// Serialized form: a bare list of unpadded sequences, padded `data` +
/// `lengths`, or unpadded `sequences`.
// Bare comes first: struct variants also accept JSON arrays
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawBatch {
    Bare(Vec<Vec<i64>>),
    Padded { data: Vec<Vec<i64>>, lengths: Vec<i64> },
    Sequences { sequences: Vec<Vec<i64>> },
}

impl TryFrom<RawBatch> for SequenceBatch {
    type Error = ValidationError;

    fn try_from(raw: RawBatch) -> Result<Self, Self::Error> {
        match raw {
            RawBatch::Padded { data, lengths } => Self::from_rows(&data, &lengths),
            RawBatch::Sequences { sequences } | RawBatch::Bare(sequences) => {
                Self::from_sequences(&sequences)
            }
        }
    }
}

impl From<SequenceBatch> for RawBatch {
    fn from(batch: SequenceBatch) -> Self {
        RawBatch::Sequences {
            sequences: batch.iter().map(<[i64]>::to_vec).collect(),
        }
    }
}
