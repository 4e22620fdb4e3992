use thiserror::Error;
use tracing::debug;

use crate::core::cell::{triplet_count, Cell};
use crate::core::matrix::DistanceMatrix;
use crate::distance::backend::{Backend, DefaultBackend};
use crate::distance::batched::EditDistanceEngine;
use crate::scoring::cell_distance::CellDistanceComputer;
use crate::utils::validation::ValidationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Distance matrix shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid distance {value} at ({row}, {col}): distances must be finite and non-negative")]
    InvalidDistance { row: usize, col: usize, value: f64 },

    #[error("Degenerate cell ({nx} X, {na} A, {nb} B items): no triplets to score")]
    DegenerateCell { nx: usize, na: usize, nb: usize },
}

/// Outcome of scoring one cell.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CellScore {
    /// ABX error rate: 0 is perfect discrimination, 0.5 is chance
    pub score: f64,

    /// Number of triplets compared
    pub triplets: u64,

    /// Triplets where X was strictly closer to A than to B
    pub correct: u64,

    /// Triplets where both distances were equal
    pub ties: u64,
}

impl CellScore {
    fn from_counts(correct: u64, ties: u64, triplets: u64) -> Self {
        // Twice the tournament sum, so half-weight ties stay integral
        let doubled = 2 * u128::from(correct) + u128::from(ties);
        let total = 2 * u128::from(triplets);
        #[allow(clippy::cast_precision_loss)]
        let score = 1.0 - (doubled as f64 / total as f64);

        Self {
            score,
            triplets,
            correct,
            ties,
        }
    }
}

/// Reduces a cell to its ABX score.
#[derive(Debug, Clone)]
pub struct AbxScorer<B: Backend = DefaultBackend> {
    computer: CellDistanceComputer<B>,
}

impl Default for AbxScorer<DefaultBackend> {
    fn default() -> Self {
        Self::new(EditDistanceEngine::default())
    }
}

impl<B: Backend> AbxScorer<B> {
    pub fn new(engine: EditDistanceEngine<B>) -> Self {
        Self {
            computer: CellDistanceComputer::new(engine),
        }
    }

    pub fn engine(&self) -> &EditDistanceEngine<B> {
        self.computer.engine()
    }

    /// ABX score of `cell`.
    ///
    /// # Errors
    ///
    /// See [`AbxScorer::evaluate`].
    pub fn score(&self, cell: &Cell) -> Result<f64, ScoreError> {
        self.evaluate(cell).map(|s| s.score)
    }

    /// Compute both distance matrices of `cell` and reduce them to a [`CellScore`].
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::Validation` if the cell is malformed,
    /// `ScoreError::ShapeMismatch` if the matrices disagree with the batch sizes,
    /// and `ScoreError::DegenerateCell` if there is no triplet to score.
    pub fn evaluate(&self, cell: &Cell) -> Result<CellScore, ScoreError> {
        let (dxa, dxb) = self.computer.compute(cell)?;

        let expected_a = (cell.x.len(), cell.a.len());
        let expected_b = (cell.x.len(), cell.b.len());
        if dxa.shape() != expected_a || dxb.shape() != expected_b {
            return Err(ScoreError::ShapeMismatch(format!(
                "expected dxa {expected_a:?} and dxb {expected_b:?}, got {:?} and {:?}",
                dxa.shape(),
                dxb.shape()
            )));
        }

        let result = score_distances(&dxa, &dxb, cell.is_symmetric)?;
        debug!(
            nx = cell.x.len(),
            na = cell.a.len(),
            nb = cell.b.len(),
            symmetric = cell.is_symmetric,
            score = result.score,
            "scored cell"
        );
        Ok(result)
    }
}

/// Reduce precomputed X-vs-A and X-vs-B distances to a [`CellScore`].
///
/// Each triplet `(x, a, b)` counts 1 when `dxa[x][a] < dxb[x][b]` and 0.5 on a
/// tie. For a symmetric cell the diagonal of `dxa` (each X against its own
/// occurrence in A) is skipped, both in the sum and in the normalizer. The
/// result is one minus the normalized sum.
///
/// Rows are processed one X at a time against a sorted copy of the `dxb` row,
/// so memory stays linear in the matrix size.
///
/// # Errors
///
/// Returns `ScoreError::ShapeMismatch` if the matrices have different row
/// counts or a symmetric `dxa` is not square, `ScoreError::InvalidDistance` for
/// a negative or non-finite entry, `ScoreError::DegenerateCell` when there
/// is nothing to compare, and `ScoreError::Validation` when the triplet count
/// does not fit in `u64`.
pub fn score_distances(
    dxa: &DistanceMatrix,
    dxb: &DistanceMatrix,
    is_symmetric: bool,
) -> Result<CellScore, ScoreError> {
    let (nx, na) = dxa.shape();
    let nb = dxb.cols();

    if dxb.rows() != nx {
        return Err(ScoreError::ShapeMismatch(format!(
            "dxa has {nx} rows but dxb has {}",
            dxb.rows()
        )));
    }
    if is_symmetric && na != nx {
        return Err(ScoreError::ShapeMismatch(format!(
            "symmetric dxa must be square, got {nx} x {na}"
        )));
    }
    check_distances(dxa)?;
    check_distances(dxb)?;

    let triplets = triplet_count(nx, na, nb, is_symmetric)?;
    if triplets == 0 {
        return Err(ScoreError::DegenerateCell { nx, na, nb });
    }

    let mut correct = 0u64;
    let mut ties = 0u64;
    let mut sorted_b = Vec::with_capacity(nb);
    for x in 0..nx {
        sorted_b.clear();
        sorted_b.extend_from_slice(dxb.row(x));
        sorted_b.sort_by(f64::total_cmp);

        for (a, &da) in dxa.row(x).iter().enumerate() {
            if is_symmetric && a == x {
                continue;
            }
            let below = sorted_b.partition_point(|&db| db < da);
            let not_above = sorted_b.partition_point(|&db| db <= da);
            correct += (nb - not_above) as u64;
            ties += (not_above - below) as u64;
        }
    }

    Ok(CellScore::from_counts(correct, ties, triplets))
}

fn check_distances(matrix: &DistanceMatrix) -> Result<(), ScoreError> {
    let cols = matrix.cols();
    match matrix
        .as_slice()
        .iter()
        .position(|d| !d.is_finite() || *d < 0.0)
    {
        Some(index) => Err(ScoreError::InvalidDistance {
            row: index / cols,
            col: index % cols,
            value: matrix.as_slice()[index],
        }),
        None => Ok(()),
    }
}
