//! sparsekmeans - parallel k-means over sparse feature vectors
//!
//! Partitions large collections of sparse, weighted feature vectors into a
//! fixed number of clusters. Each iteration scores the input on a fixed pool
//! of workers, one static partition each, and folds their private statistics
//! into new centroids.

pub mod clustering;
pub mod config;
pub mod error;
pub mod io;
pub mod vector;

// Re-export commonly used types
pub use clustering::{ClusterAssignment, ClusterState, IterationStats, SparseKMeans, WorkPartition};
pub use config::{KMeansConfig, DEFAULT_DIMENSION};
pub use error::{ClusterError, Result};
pub use io::{write_assignments, write_assignments_to, Dataset};
pub use vector::{sparse_dot, SparseVector};
