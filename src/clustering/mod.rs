//! Parallel k-means over sparse vectors
//!
//! - `state`: per-cluster accumulators and centroids
//! - `partition`: static split of the input across workers
//! - `worker`: the per-partition assignment step
//! - `kmeans`: the coordinator driving the iterations
//! - `stats`: per-iteration diagnostics

pub mod kmeans;
pub mod partition;
pub mod state;
pub mod stats;
pub mod worker;

pub use kmeans::{ClusterAssignment, SparseKMeans};
pub use partition::{partition_ranges, WorkPartition};
pub use state::ClusterState;
pub use stats::{ClusterSize, IterationStats};
