use std::borrow::Cow;

use tracing::{debug, trace};

use crate::core::batch::SequenceBatch;
use crate::core::matrix::DistanceMatrix;
use crate::distance::backend::{Backend, DefaultBackend};
use crate::distance::edit::{align, EditDistanceOptions};
use crate::utils::validation::{check_symbols, ValidationError};

/// Pairwise edit distances between whole batches.
///
/// Holds a validated [`EditDistanceOptions`] and the execution backend. The
/// engine is stateless between calls and can be shared across threads.
#[derive(Debug, Clone)]
pub struct EditDistanceEngine<B: Backend = DefaultBackend> {
    options: EditDistanceOptions,
    backend: B,
}

impl Default for EditDistanceEngine<DefaultBackend> {
    fn default() -> Self {
        Self {
            options: EditDistanceOptions::default(),
            backend: DefaultBackend::default(),
        }
    }
}

impl EditDistanceEngine<DefaultBackend> {
    /// Create an engine on the default backend.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCost` if the cost model is unusable.
    pub fn new(options: EditDistanceOptions) -> Result<Self, ValidationError> {
        Self::with_backend(options, DefaultBackend::default())
    }
}

impl<B: Backend> EditDistanceEngine<B> {
    /// Create an engine on an explicit backend.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCost` if the cost model is unusable.
    pub fn with_backend(options: EditDistanceOptions, backend: B) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self { options, backend })
    }

    pub fn options(&self) -> &EditDistanceOptions {
        &self.options
    }

    /// Distance between two sequences under this engine's options.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeSymbol` if either sequence holds a negative symbol.
    pub fn edit_distance(&self, x: &[i64], y: &[i64]) -> Result<f64, ValidationError> {
        check_symbols(0, x)?;
        check_symbols(1, y)?;

        let (x, y): (Cow<'_, [i64]>, Cow<'_, [i64]>) = if self.options.collapse_repeats {
            (collapse(x).into(), collapse(y).into())
        } else {
            (x.into(), y.into())
        };
        Ok(self.pair_distance(&x, &y, &mut Vec::new()))
    }

    /// All-pairs distance matrix: entry `(i, j)` compares `x[i]` with `y[j]`.
    ///
    /// With `symmetric` set, `x` and `y` must hold the same sequences; only the
    /// upper triangle (diagonal included) is aligned and the rest is mirrored.
    ///
    /// # Errors
    ///
    /// For a symmetric request, returns `ValidationError::NotSquare` if the
    /// batches differ in size, `ValidationError::SymmetricMismatch` if they
    /// hold different sequences, and `ValidationError::AsymmetricCosts` if
    /// insertion and deletion costs differ.
    pub fn batched_edit_distance(
        &self,
        x: &SequenceBatch,
        y: &SequenceBatch,
        symmetric: bool,
    ) -> Result<DistanceMatrix, ValidationError> {
        if symmetric {
            self.check_symmetric(x, y)?;
        }

        let (nx, ny) = (x.len(), y.len());
        debug!(
            nx,
            ny,
            symmetric,
            backend = B::NAME,
            "computing batched edit distances"
        );

        let mut matrix = DistanceMatrix::zeros(nx, ny);
        if nx == 0 || ny == 0 {
            return Ok(matrix);
        }

        let (x, y): (Cow<'_, SequenceBatch>, Cow<'_, SequenceBatch>) =
            if self.options.collapse_repeats {
                (
                    Cow::Owned(x.collapse_repeats()),
                    Cow::Owned(y.collapse_repeats()),
                )
            } else {
                (Cow::Borrowed(x), Cow::Borrowed(y))
            };
        let scratch_len = y.width() + 1;

        self.backend.fill_rows(matrix.as_mut_slice(), ny, |i, row| {
            let xi = x.get(i);
            let start = if symmetric { i } else { 0 };
            let mut scratch = Vec::with_capacity(scratch_len);
            for (j, slot) in row.iter_mut().enumerate().skip(start) {
                *slot = self.pair_distance(xi, y.get(j), &mut scratch);
            }
            trace!(row = i, "aligned distance row");
        });

        if symmetric {
            for i in 1..nx {
                for j in 0..i {
                    let mirrored = matrix.get(j, i);
                    matrix.set(i, j, mirrored);
                }
            }
        }

        Ok(matrix)
    }

    fn pair_distance(&self, x: &[i64], y: &[i64], scratch: &mut Vec<f64>) -> f64 {
        let raw = align(x, y, self.options.costs, scratch);
        self.options.normalization.apply(raw, x.len(), y.len())
    }

    fn check_symmetric(&self, x: &SequenceBatch, y: &SequenceBatch) -> Result<(), ValidationError> {
        if x.len() != y.len() {
            return Err(ValidationError::NotSquare {
                rows: x.len(),
                cols: y.len(),
            });
        }
        if !x.same_sequences(y) {
            return Err(ValidationError::SymmetricMismatch);
        }
        let costs = self.options.costs;
        if !costs.is_symmetric() {
            return Err(ValidationError::AsymmetricCosts {
                insertion: costs.insertion,
                deletion: costs.deletion,
            });
        }
        Ok(())
    }
}

fn collapse(sequence: &[i64]) -> Vec<i64> {
    let mut collapsed = sequence.to_vec();
    collapsed.dedup();
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::backend::Sequential;
    use crate::distance::edit::{edit_distance, EditCosts, Normalization};

    fn batch(sequences: &[Vec<i64>]) -> SequenceBatch {
        SequenceBatch::from_sequences(sequences).unwrap()
    }

    fn sample() -> SequenceBatch {
        batch(&[
            vec![1, 2, 3],
            vec![1, 3],
            vec![],
            vec![3, 2, 1, 0],
            vec![1, 1, 2, 2, 3],
        ])
    }

    #[test]
    fn test_batched_equals_pairwise() {
        let x = sample();
        let y = batch(&[vec![1, 2], vec![0, 0, 0], vec![3]]);
        let engine = EditDistanceEngine::default();
        let matrix = engine.batched_edit_distance(&x, &y, false).unwrap();

        assert_eq!(matrix.shape(), (5, 3));
        for i in 0..x.len() {
            for j in 0..y.len() {
                assert_eq!(matrix.get(i, j), edit_distance(x.get(i), y.get(j)));
            }
        }
    }

    #[test]
    fn test_symmetric_equals_full() {
        let x = sample();
        let engine = EditDistanceEngine::default();
        let full = engine.batched_edit_distance(&x, &x, false).unwrap();
        let mirrored = engine.batched_edit_distance(&x, &x, true).unwrap();
        assert_eq!(full, mirrored);
        for i in 0..x.len() {
            assert_eq!(mirrored.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_sequential_backend_matches_default() {
        let x = sample();
        let sequential =
            EditDistanceEngine::with_backend(EditDistanceOptions::default(), Sequential).unwrap();
        let default = EditDistanceEngine::default();
        assert_eq!(
            sequential.batched_edit_distance(&x, &x, true).unwrap(),
            default.batched_edit_distance(&x, &x, true).unwrap()
        );
    }

    #[test]
    fn test_padding_is_not_read() {
        // Same sequences, different filler values
        let a = SequenceBatch::from_padded(vec![1, 2, 9, 9, 4, 9, 9, 9], 4, &[2, 1]).unwrap();
        let b = SequenceBatch::from_padded(vec![1, 2, 0, 0, 4, 5, 5, 5], 4, &[2, 1]).unwrap();
        let y = batch(&[vec![1, 2, 9], vec![4, 5]]);
        let engine = EditDistanceEngine::default();
        assert_eq!(
            engine.batched_edit_distance(&a, &y, false).unwrap(),
            engine.batched_edit_distance(&b, &y, false).unwrap()
        );
    }

    #[test]
    fn test_empty_batches() {
        let engine = EditDistanceEngine::default();
        let empty = batch(&[]);
        let matrix = engine.batched_edit_distance(&empty, &sample(), false).unwrap();
        assert_eq!(matrix.shape(), (0, 5));
        let matrix = engine.batched_edit_distance(&sample(), &empty, false).unwrap();
        assert_eq!(matrix.shape(), (5, 0));
    }

    #[test]
    fn test_symmetric_rejects_mismatched_batches() {
        let engine = EditDistanceEngine::default();
        let x = sample();
        let y = batch(&[vec![1]]);
        assert!(matches!(
            engine.batched_edit_distance(&x, &y, true),
            Err(ValidationError::NotSquare { rows: 5, cols: 1 })
        ));

        let z = batch(&[vec![9], vec![9], vec![9], vec![9], vec![9]]);
        assert_eq!(
            engine.batched_edit_distance(&x, &z, true),
            Err(ValidationError::SymmetricMismatch)
        );
    }

    #[test]
    fn test_symmetric_rejects_asymmetric_costs() {
        let options = EditDistanceOptions {
            costs: EditCosts::new(1.0, 2.0, 1.0),
            ..EditDistanceOptions::default()
        };
        let engine = EditDistanceEngine::new(options).unwrap();
        let x = sample();
        assert!(matches!(
            engine.batched_edit_distance(&x, &x, true),
            Err(ValidationError::AsymmetricCosts { .. })
        ));
        // The full matrix is still available
        assert!(engine.batched_edit_distance(&x, &x, false).is_ok());
    }

    #[test]
    fn test_invalid_costs_rejected_at_construction() {
        let options = EditDistanceOptions {
            costs: EditCosts::new(f64::NAN, 1.0, 1.0),
            ..EditDistanceOptions::default()
        };
        assert!(EditDistanceEngine::new(options).is_err());
    }

    #[test]
    fn test_collapse_and_normalize() {
        let options = EditDistanceOptions {
            collapse_repeats: true,
            normalization: Normalization::MaxLength,
            ..EditDistanceOptions::default()
        };
        let engine = EditDistanceEngine::new(options).unwrap();

        // [1,1,2,2,3] collapses to [1,2,3]
        assert_eq!(engine.edit_distance(&[1, 1, 2, 2, 3], &[1, 2, 3]).unwrap(), 0.0);
        // [1,1,3] -> [1,3]: one deletion over max length 3
        let d = engine.edit_distance(&[1, 2, 3], &[1, 1, 3]).unwrap();
        assert!((d - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(engine.edit_distance(&[], &[]).unwrap(), 0.0);

        let x = sample();
        let matrix = engine.batched_edit_distance(&x, &x, true).unwrap();
        for i in 0..x.len() {
            for j in 0..x.len() {
                assert_eq!(matrix.get(i, j), engine.edit_distance(x.get(i), x.get(j)).unwrap());
            }
        }
    }

    #[test]
    fn test_edit_distance_rejects_negative_symbols() {
        let engine = EditDistanceEngine::default();
        assert!(engine.edit_distance(&[1, -1], &[1]).is_err());
    }
}
