//! ABX scoring of cells.
//!
//! - [`CellDistanceComputer`]: X-vs-A and X-vs-B distance matrices of a cell
//! - [`AbxScorer`]: reduces a cell to a single discrimination score
//! - [`score_distances`]: the reduction on its own, for precomputed matrices
//!
//! ## Scoring
//!
//! For every X item, every A candidate is compared with every B candidate:
//!
//! - X closer to A than to B counts 1
//! - equal distances count 0.5
//! - X closer to B counts 0
//!
//! The score is one minus the mean over all triplets, so `0` is perfect
//! discrimination and `0.5` is chance. In a symmetric cell (A and X are the same
//! collection) an X item is never compared with its own occurrence in A.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use abx_score::{AbxScorer, Cell, SequenceBatch};
//!
//! let a = Arc::new(SequenceBatch::from_sequences(&[vec![1, 1, 2], vec![1, 2]]).unwrap());
//! let b = Arc::new(SequenceBatch::from_sequences(&[vec![5, 6, 6], vec![6, 5]]).unwrap());
//! let x = Arc::new(SequenceBatch::from_sequences(&[vec![1, 2, 2]]).unwrap());
//!
//! let cell = Cell::new(a, b, x, false).unwrap();
//! let score = AbxScorer::default().score(&cell).unwrap();
//! assert_eq!(score, 0.0);
//! ```

pub mod abx;
pub mod cell_distance;

pub use abx::{score_distances, AbxScorer, CellScore, ScoreError};
pub use cell_distance::CellDistanceComputer;
