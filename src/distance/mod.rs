//! Edit distance between discrete symbol sequences.
//!
//! - [`edit::edit_distance`]: unit-cost distance between two sequences
//! - [`EditDistanceEngine`]: configurable engine with the batched all-pairs variant
//! - [`backend`]: compile-time choice between sequential and rayon-parallel execution
//!
//! ## Algorithm
//!
//! Distances follow the classical dynamic-programming recurrence over a
//! `(len(x) + 1) x (len(y) + 1)` grid, evaluated with a single rolling row
//! sized by the shorter sequence. The batched variant schedules one task per
//! output row; each task owns its scratch row and its slice of the output, and
//! only reads the input batches.
//!
//! In symmetric mode (the same collection on both sides) only the upper
//! triangle, diagonal included, is aligned and then mirrored.
//!
//! ## Options
//!
//! [`EditDistanceOptions`] selects the cost model, whether runs of repeated
//! symbols are collapsed first, and whether distances are divided by the
//! longer sequence's length.
//!
//! ## Example
//!
//! ```rust
//! use abx_score::{EditDistanceEngine, SequenceBatch};
//!
//! let x = SequenceBatch::from_sequences(&[vec![1, 2, 3], vec![1, 3]]).unwrap();
//! let engine = EditDistanceEngine::default();
//! let matrix = engine.batched_edit_distance(&x, &x, true).unwrap();
//!
//! assert_eq!(matrix.get(0, 1), 1.0);
//! assert_eq!(matrix.get(1, 0), 1.0);
//! ```

pub mod backend;
pub mod batched;
pub mod edit;

pub use batched::EditDistanceEngine;
pub use edit::{EditCosts, EditDistanceOptions, Normalization};
