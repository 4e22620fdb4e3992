//! Centralized validation helpers for batches, cells and cost models.
//!
//! Everything here runs before any dynamic-programming work so a malformed
//! input never reaches the distance kernel.

/// Maximum number of sequences allowed in a single batch.
pub const MAX_SEQUENCES: usize = 10_000_000;

/// Validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Padded data has {len} elements, not a multiple of row width {width}")]
    RaggedData { len: usize, width: usize },

    #[error("Expected {expected} length entries for {expected} padded rows, got {actual}")]
    LengthCountMismatch { expected: usize, actual: usize },

    #[error("Sequence {index} has negative length {length}")]
    NegativeLength { index: usize, length: i64 },

    #[error("Sequence {index} has length {length}, exceeding row width {width}")]
    LengthExceedsWidth {
        index: usize,
        length: usize,
        width: usize,
    },

    #[error("Sequence {index} has negative symbol {symbol} at position {position}")]
    NegativeSymbol {
        index: usize,
        position: usize,
        symbol: i64,
    },

    #[error("Row {index} has {actual} elements, expected padded width {width}")]
    RaggedRow {
        index: usize,
        actual: usize,
        width: usize,
    },

    #[error("Too many sequences: {0} exceeds maximum allowed ({MAX_SEQUENCES})")]
    TooManySequences(usize),

    #[error("Cell of {nx} X, {na} A and {nb} B items has more triplets than can be counted")]
    TooManyTriplets { nx: usize, na: usize, nb: usize },

    #[error("Symmetric comparison needs a square layout, got {rows} x {cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Symmetric cell has {na} A items but {nx} X items")]
    RoleSizeMismatch { na: usize, nx: usize },

    #[error("Symmetric comparison over collections holding different sequences")]
    SymmetricMismatch,

    #[error("Invalid {name} cost {value}: costs must be finite and non-negative")]
    InvalidCost { name: &'static str, value: f64 },

    #[error(
        "Symmetric comparison requires equal insertion and deletion costs \
         (insertion {insertion}, deletion {deletion})"
    )]
    AsymmetricCosts { insertion: f64, deletion: f64 },
}

/// Check a padded row-major buffer against its declared width and lengths.
///
/// Returns the validated lengths as `usize`.
///
/// # Errors
///
/// Returns a `ValidationError` when the buffer is ragged, the number of
/// lengths does not match the number of rows, a length is negative or wider
/// than the row, or a symbol inside a valid region is negative.
pub fn validate_padded(
    data: &[i64],
    width: usize,
    lengths: &[i64],
) -> Result<Vec<usize>, ValidationError> {
    let rows = if width == 0 {
        if !data.is_empty() {
            return Err(ValidationError::RaggedData {
                len: data.len(),
                width,
            });
        }
        lengths.len()
    } else {
        if data.len() % width != 0 {
            return Err(ValidationError::RaggedData {
                len: data.len(),
                width,
            });
        }
        data.len() / width
    };

    if lengths.len() != rows {
        return Err(ValidationError::LengthCountMismatch {
            expected: rows,
            actual: lengths.len(),
        });
    }
    check_sequence_limit(rows)?;

    let mut validated = Vec::with_capacity(rows);
    for (index, &length) in lengths.iter().enumerate() {
        let length = usize::try_from(length)
            .map_err(|_| ValidationError::NegativeLength { index, length })?;
        if length > width {
            return Err(ValidationError::LengthExceedsWidth {
                index,
                length,
                width,
            });
        }

        // Only the valid prefix is inspected; padding may hold any filler
        let row = &data[index * width..index * width + length];
        check_symbols(index, row)?;
        validated.push(length);
    }

    Ok(validated)
}

/// Reject negative symbols in the valid region of sequence `index`.
///
/// # Errors
///
/// Returns `ValidationError::NegativeSymbol` for the first negative symbol.
pub fn check_symbols(index: usize, symbols: &[i64]) -> Result<(), ValidationError> {
    match symbols.iter().position(|&s| s < 0) {
        Some(position) => Err(ValidationError::NegativeSymbol {
            index,
            position,
            symbol: symbols[position],
        }),
        None => Ok(()),
    }
}

/// Check that a batch of `count` sequences stays under [`MAX_SEQUENCES`].
///
/// # Errors
///
/// Returns `ValidationError::TooManySequences` when the limit is exceeded.
pub fn check_sequence_limit(count: usize) -> Result<(), ValidationError> {
    if count > MAX_SEQUENCES {
        Err(ValidationError::TooManySequences(count))
    } else {
        Ok(())
    }
}

/// Check that a single cost is usable in the recurrence.
///
/// # Errors
///
/// Returns `ValidationError::InvalidCost` for negative, infinite or NaN costs.
pub fn check_cost(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidCost { name, value })
    }
}
