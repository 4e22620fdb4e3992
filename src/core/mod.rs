//! Core data types for ABX evaluation.
//!
//! - [`SequenceBatch`](batch::SequenceBatch): padded integer sequences with explicit valid lengths
//! - [`Cell`](cell::Cell): the A, B and X collections of one cell plus its symmetry flag
//! - [`DistanceMatrix`](matrix::DistanceMatrix): dense pairwise distances between two batches
//!
//! All of them are immutable once built. Batches are validated on construction,
//! so the distance engine can index into them without further checks.

pub mod batch;
pub mod cell;
pub mod matrix;
