//! # abx-score
//!
//! A library for scoring discrete sequence representations with the ABX
//! discrimination task.
//!
//! Speech (or any signal) encoded into streams of integer units can be judged by
//! how well those units separate categories. For a cell of three collections,
//! A and X from one category and B from another, the ABX score is the fraction
//! of triplets where X is closer to B than to A, with ties counting half.
//!
//! `abx-score` measures "closer" with edit distance between unit sequences.
//!
//! ## Features
//!
//! - **Batched edit distance**: all-pairs distances between padded batches,
//!   parallelized across rows
//! - **Symmetric mode**: aligns only the upper triangle when a batch is compared
//!   with itself
//! - **Self-match exclusion**: when A and X are the same collection, an item is
//!   never compared with itself
//! - **Exact tie handling**: ties count half, with integer bookkeeping
//! - **Options**: weighted costs, repeat collapsing and length normalization
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use abx_score::{AbxScorer, Cell, SequenceBatch};
//!
//! let a = Arc::new(SequenceBatch::from_sequences(&[vec![1, 2, 3], vec![1, 2]]).unwrap());
//! let b = Arc::new(SequenceBatch::from_sequences(&[vec![7, 8, 9]]).unwrap());
//!
//! // A doubles as X: every item is compared with the other A items only
//! let cell = Cell::symmetric(a, b);
//! let score = AbxScorer::default().score(&cell).unwrap();
//! assert_eq!(score, 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequence batches, distance matrices and cells
//! - [`distance`]: Edit-distance kernel, options and execution backends
//! - [`scoring`]: Cell distance computation and the ABX reduction
//! - [`parsing`]: JSON readers for batches and cells
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Input validation

pub mod cli;
pub mod core;
pub mod distance;
pub mod parsing;
pub mod scoring;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::batch::SequenceBatch;
pub use core::cell::Cell;
pub use core::matrix::DistanceMatrix;
pub use distance::edit::edit_distance;
pub use distance::{EditCosts, EditDistanceEngine, EditDistanceOptions, Normalization};
pub use scoring::{score_distances, AbxScorer, CellDistanceComputer, CellScore, ScoreError};
pub use utils::validation::ValidationError;
