//! Run configuration for the clustering engine.

use crate::error::{ClusterError, Result};

/// Feature-space size used when none is given.
pub const DEFAULT_DIMENSION: usize = 3000;

/// Parameters of one clustering run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeansConfig {
    /// Number of clusters (K)
    pub cluster_count: usize,
    /// Exact number of iterations to run; there is no early exit
    pub iteration_count: usize,
    /// Number of partitions and pool threads
    pub worker_count: usize,
    /// Dimensionality (D) of every vector and centroid
    pub dimension: usize,
    /// RNG seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl KMeansConfig {
    pub fn new(cluster_count: usize, iteration_count: usize, worker_count: usize) -> Self {
        Self {
            cluster_count,
            iteration_count,
            worker_count,
            dimension: DEFAULT_DIMENSION,
            seed: None,
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("cluster_count", self.cluster_count),
            ("iteration_count", self.iteration_count),
            ("worker_count", self.worker_count),
            ("dimension", self.dimension),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ClusterError::InvalidConfig {
                    field,
                    reason: "must be positive".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KMeansConfig::new(8, 10, 4);
        assert_eq!(config.dimension, DEFAULT_DIMENSION);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = KMeansConfig::new(2, 1, 1).with_dimension(2).with_seed(42);
        assert_eq!(config.dimension, 2);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_rejects_zero_values() {
        let cases = [
            (KMeansConfig::new(0, 1, 1), "cluster_count"),
            (KMeansConfig::new(1, 0, 1), "iteration_count"),
            (KMeansConfig::new(1, 1, 0), "worker_count"),
            (KMeansConfig::new(1, 1, 1).with_dimension(0), "dimension"),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(ClusterError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidConfig for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_oversubscribed_workers_are_allowed() {
        let config = KMeansConfig::new(2, 1, 4096);
        assert!(config.validate().is_ok());
    }
}
