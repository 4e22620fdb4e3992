//! Property-based tests using proptest
//!
//! These tests check invariants of the edit distance and the ABX reduction
//! over randomly generated sequences and distance matrices.

use std::sync::Arc;

use abx_score::distance::backend::Sequential;
use abx_score::{
    edit_distance, score_distances, AbxScorer, Cell, DistanceMatrix, EditCosts,
    EditDistanceEngine, EditDistanceOptions, Normalization, SequenceBatch,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

// Small alphabet so that matches, substitutions and repeats all occur often
fn sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..4, 0..=max_len)
}

fn batch_strategy(max_items: usize) -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(sequence_strategy(8), 1..=max_items)
}

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = DistanceMatrix> {
    // Integer-valued distances make ties common, as with unit-cost edit distance
    prop::collection::vec(prop::collection::vec((0u8..6).prop_map(f64::from), cols), rows)
        .prop_map(|rows| DistanceMatrix::from_rows(&rows).unwrap())
}

fn batch(sequences: &[Vec<i64>]) -> SequenceBatch {
    SequenceBatch::from_sequences(sequences).unwrap()
}

/// Direct triple loop over every (x, a, b) triplet
fn brute_force_score(dxa: &DistanceMatrix, dxb: &DistanceMatrix, is_symmetric: bool) -> f64 {
    let mut sum = 0.0;
    let mut count = 0.0;
    for x in 0..dxa.rows() {
        for a in 0..dxa.cols() {
            if is_symmetric && a == x {
                continue;
            }
            for b in 0..dxb.cols() {
                let (da, db) = (dxa.get(x, a), dxb.get(x, b));
                if da < db {
                    sum += 1.0;
                } else if da == db {
                    sum += 0.5;
                }
                count += 1.0;
            }
        }
    }
    1.0 - sum / count
}

// ============================================================================
// Edit Distance Properties
// ============================================================================

proptest! {
    // Property: distance to self is zero
    #[test]
    fn test_self_distance_zero(x in sequence_strategy(16)) {
        prop_assert_eq!(edit_distance(&x, &x), 0.0);
    }

    // Property: unit-cost distance is symmetric
    #[test]
    fn test_distance_symmetry(x in sequence_strategy(12), y in sequence_strategy(12)) {
        prop_assert_eq!(edit_distance(&x, &y), edit_distance(&y, &x));
    }

    // Property: d(x, z) <= d(x, y) + d(y, z)
    #[test]
    fn test_triangle_inequality(
        x in sequence_strategy(10),
        y in sequence_strategy(10),
        z in sequence_strategy(10)
    ) {
        let xz = edit_distance(&x, &z);
        let xy = edit_distance(&x, &y);
        let yz = edit_distance(&y, &z);
        prop_assert!(xz <= xy + yz, "{} > {} + {}", xz, xy, yz);
    }

    // Property: length difference <= d <= longer length
    #[test]
    fn test_distance_bounds(x in sequence_strategy(12), y in sequence_strategy(12)) {
        let d = edit_distance(&x, &y);
        let (lx, ly) = (x.len() as f64, y.len() as f64);
        prop_assert!(d >= (lx - ly).abs());
        prop_assert!(d <= lx.max(ly));
    }

    // Property: normalized distances fall in [0, 1]
    #[test]
    fn test_normalized_distance_in_unit_interval(
        x in sequence_strategy(12),
        y in sequence_strategy(12)
    ) {
        let engine = EditDistanceEngine::new(EditDistanceOptions {
            normalization: Normalization::MaxLength,
            collapse_repeats: true,
            ..EditDistanceOptions::default()
        })
        .unwrap();
        let d = engine.edit_distance(&x, &y).unwrap();
        prop_assert!((0.0..=1.0).contains(&d), "normalized distance {}", d);
    }

    // Property: equal insertion and deletion costs keep the distance symmetric
    #[test]
    fn test_weighted_distance_symmetry(
        x in sequence_strategy(10),
        y in sequence_strategy(10),
        substitution in 0.0f64..3.0,
        indel in 0.0f64..3.0
    ) {
        let engine = EditDistanceEngine::new(EditDistanceOptions {
            costs: EditCosts::new(substitution, indel, indel),
            ..EditDistanceOptions::default()
        })
        .unwrap();
        let xy = engine.edit_distance(&x, &y).unwrap();
        let yx = engine.edit_distance(&y, &x).unwrap();
        prop_assert!((xy - yx).abs() < 1e-9, "{} != {}", xy, yx);
    }
}

// ============================================================================
// Batched Properties
// ============================================================================

proptest! {
    // Property: each batched entry equals the pairwise distance
    #[test]
    fn test_batched_matches_pairwise(xs in batch_strategy(6), ys in batch_strategy(6)) {
        let engine = EditDistanceEngine::default();
        let matrix = engine.batched_edit_distance(&batch(&xs), &batch(&ys), false).unwrap();

        prop_assert_eq!(matrix.shape(), (xs.len(), ys.len()));
        for (i, x) in xs.iter().enumerate() {
            for (j, y) in ys.iter().enumerate() {
                prop_assert_eq!(matrix.get(i, j), edit_distance(x, y));
            }
        }
    }

    // Property: symmetric mode gives the same matrix as the full computation
    #[test]
    fn test_symmetric_matches_full(xs in batch_strategy(7), collapse in any::<bool>()) {
        let engine = EditDistanceEngine::new(EditDistanceOptions {
            collapse_repeats: collapse,
            ..EditDistanceOptions::default()
        })
        .unwrap();
        let x = batch(&xs);

        let full = engine.batched_edit_distance(&x, &x, false).unwrap();
        let symmetric = engine.batched_edit_distance(&x, &x, true).unwrap();
        prop_assert_eq!(full, symmetric);
    }

    // Property: sequential and default backends agree
    #[test]
    fn test_backends_agree(xs in batch_strategy(6), ys in batch_strategy(6)) {
        let (x, y) = (batch(&xs), batch(&ys));
        let sequential = EditDistanceEngine::with_backend(EditDistanceOptions::default(), Sequential)
            .unwrap()
            .batched_edit_distance(&x, &y, false)
            .unwrap();
        let default = EditDistanceEngine::default()
            .batched_edit_distance(&x, &y, false)
            .unwrap();
        prop_assert_eq!(sequential, default);
    }
}

// ============================================================================
// Scoring Properties
// ============================================================================

proptest! {
    // Property: the sorted reduction equals the triple loop
    #[test]
    fn test_score_matches_brute_force(
        (dxa, dxb) in (1usize..5, 1usize..5, 1usize..5).prop_flat_map(|(nx, na, nb)| {
            (matrix_strategy(nx, na), matrix_strategy(nx, nb))
        })
    ) {
        let result = score_distances(&dxa, &dxb, false).unwrap();
        let expected = brute_force_score(&dxa, &dxb, false);
        prop_assert!((result.score - expected).abs() < 1e-12, "{} != {}", result.score, expected);
        prop_assert!((0.0..=1.0).contains(&result.score));
    }

    // Property: symmetric cells ignore the diagonal entirely
    #[test]
    fn test_symmetric_score_ignores_diagonal(
        (mut dxa, dxb) in (2usize..5, 1usize..5).prop_flat_map(|(n, nb)| {
            (matrix_strategy(n, n), matrix_strategy(n, nb))
        }),
        diagonal in 0u8..10
    ) {
        let before = score_distances(&dxa, &dxb, true).unwrap();
        dxa.fill_diagonal(f64::from(diagonal));
        let after = score_distances(&dxa, &dxb, true).unwrap();

        prop_assert_eq!(before, after);
        prop_assert!((before.score - brute_force_score(&dxa, &dxb, true)).abs() < 1e-12);
    }

    // Property: exchanging the roles of A and B mirrors the score around 0.5
    #[test]
    fn test_swapping_a_and_b_complements_score(
        (dxa, dxb) in (1usize..5, 1usize..5, 1usize..5).prop_flat_map(|(nx, na, nb)| {
            (matrix_strategy(nx, na), matrix_strategy(nx, nb))
        })
    ) {
        let forward = score_distances(&dxa, &dxb, false).unwrap();
        let backward = score_distances(&dxb, &dxa, false).unwrap();
        prop_assert!((forward.score + backward.score - 1.0).abs() < 1e-12);
        prop_assert_eq!(forward.ties, backward.ties);
    }

    // Property: the scorer counts exactly Cell::size() triplets
    #[test]
    fn test_scorer_triplets_match_cell_size(
        a in batch_strategy(4),
        b in batch_strategy(4),
        symmetric in any::<bool>()
    ) {
        let a = Arc::new(batch(&a));
        let b = Arc::new(batch(&b));
        let cell = if symmetric {
            Cell::symmetric(a, b)
        } else {
            Cell::new(Arc::clone(&a), b, a, false).unwrap()
        };

        match AbxScorer::default().evaluate(&cell) {
            Ok(result) => {
                prop_assert_eq!(result.triplets, cell.size().unwrap());
                prop_assert!((0.0..=1.0).contains(&result.score));
            }
            // Only a symmetric cell with a single item has nothing to score
            Err(_) => prop_assert!(symmetric && cell.a.len() == 1),
        }
    }
}
