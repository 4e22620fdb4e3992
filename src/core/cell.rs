use std::sync::Arc;

use crate::core::batch::SequenceBatch;
use crate::utils::validation::ValidationError;

/// The three sequence collections of one ABX cell plus its symmetry flag.
///
/// A cell is symmetric when A and X are the same underlying set of items, so an
/// X item must not be matched against its own occurrence in A.
#[derive(Debug, Clone)]
pub struct Cell {
    pub a: Arc<SequenceBatch>,
    pub b: Arc<SequenceBatch>,
    pub x: Arc<SequenceBatch>,
    pub is_symmetric: bool,
}

impl Cell {
    /// Create a cell from explicit roles.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::RoleSizeMismatch` if the cell is symmetric but
    /// A and X hold different numbers of items, or
    /// `ValidationError::SymmetricMismatch` if they hold different sequences.
    pub fn new(
        a: Arc<SequenceBatch>,
        b: Arc<SequenceBatch>,
        x: Arc<SequenceBatch>,
        is_symmetric: bool,
    ) -> Result<Self, ValidationError> {
        if is_symmetric {
            if a.len() != x.len() {
                return Err(ValidationError::RoleSizeMismatch {
                    na: a.len(),
                    nx: x.len(),
                });
            }
            if !Arc::ptr_eq(&a, &x) && !a.same_sequences(&x) {
                return Err(ValidationError::SymmetricMismatch);
            }
        }

        Ok(Self {
            a,
            b,
            x,
            is_symmetric,
        })
    }

    /// Symmetric cell where one collection plays both the A and X roles.
    pub fn symmetric(a: Arc<SequenceBatch>, b: Arc<SequenceBatch>) -> Self {
        Self {
            x: Arc::clone(&a),
            a,
            b,
            is_symmetric: true,
        }
    }

    /// Number of triplet comparisons that contribute to the score.
    ///
    /// Every X item is paired with every A and every B item, except that in a
    /// symmetric cell each X skips its own occurrence in A.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::TooManyTriplets` if the count overflows `u64`.
    pub fn size(&self) -> Result<u64, ValidationError> {
        triplet_count(self.x.len(), self.a.len(), self.b.len(), self.is_symmetric)
    }
}

/// `nx * na * nb`, or `nx * (na - 1) * nb` when A doubles as X.
///
/// # Errors
///
/// Returns `ValidationError::TooManyTriplets` if the product overflows `u64`.
pub fn triplet_count(
    nx: usize,
    na: usize,
    nb: usize,
    is_symmetric: bool,
) -> Result<u64, ValidationError> {
    let effective_na = if is_symmetric { na.saturating_sub(1) } else { na };
    let too_many = || ValidationError::TooManyTriplets { nx, na, nb };

    let nx = u64::try_from(nx).map_err(|_| too_many())?;
    let effective_na = u64::try_from(effective_na).map_err(|_| too_many())?;
    let nb = u64::try_from(nb).map_err(|_| too_many())?;

    nx.checked_mul(effective_na)
        .and_then(|n| n.checked_mul(nb))
        .ok_or_else(too_many)
}
