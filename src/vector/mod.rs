//! Sparse vector representation and similarity scoring
//!
//! Records are stored as sparse (index, weight) lists; centroids are dense.
//! Scoring only visits a record's non-zero entries.

pub mod similarity;
pub mod sparse;

pub use similarity::{accumulate, scatter, sparse_dot};
pub use sparse::SparseVector;
