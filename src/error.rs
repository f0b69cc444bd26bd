//! Error types for loading, configuring and running a clustering job.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Everything that can stop a clustering run.
///
/// Configuration problems are reported before any clustering work starts.
/// Broken partition layouts are not represented here: they can only come from
/// a bug and abort the run via assertions.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Clustering needs at least one record to seed centroids from.
    #[error("input contains no records")]
    EmptyInput,

    /// Identifier and vector (or assignment) lists disagree in length.
    #[error("length mismatch: {vectors} vectors but {ids} identifiers")]
    LengthMismatch { vectors: usize, ids: usize },

    /// A feature index lies outside `[0, dimension)`.
    #[error("record {record}: feature index {index} outside dimension {dimension}")]
    FeatureOutOfRange {
        record: usize,
        index: i64,
        dimension: usize,
    },

    /// Explicit initial centroids were given for the wrong number of clusters.
    #[error("expected {expected} initial centroids, got {actual}")]
    CentroidCount { expected: usize, actual: usize },

    /// An explicit initial centroid has the wrong dimensionality.
    #[error("centroid {cluster} has dimension {actual}, expected {expected}")]
    CentroidDimension {
        cluster: usize,
        expected: usize,
        actual: usize,
    },

    /// The worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClusterError {
    /// Process exit code for the CLI.
    ///
    /// Configuration errors share clap's usage-error code; everything else is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ClusterError::InvalidConfig { .. } => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = ClusterError::InvalidConfig {
            field: "cluster_count",
            reason: "must be positive".to_string(),
        };
        assert_eq!(config.exit_code(), 2);
        assert_eq!(ClusterError::EmptyInput.exit_code(), 1);
    }

    #[test]
    fn test_messages_carry_context() {
        let err = ClusterError::FeatureOutOfRange {
            record: 7,
            index: -1,
            dimension: 3000,
        };
        let msg = err.to_string();
        assert!(msg.contains("record 7"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("3000"));
    }
}
