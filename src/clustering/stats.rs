//! Per-iteration diagnostics. Reported only; the algorithm never acts on them.

use std::time::Duration;

use super::state::ClusterState;

/// A cluster id together with its member count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterSize {
    pub cluster: usize,
    pub count: usize,
}

/// Summary of one completed iteration
#[derive(Debug, Clone, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration number
    pub iteration: usize,
    pub largest: ClusterSize,
    pub smallest: ClusterSize,
    /// Mean of the extremal similarities of the non-empty clusters only.
    ///
    /// Empty clusters have no extremal similarity and are left out of both the
    /// sum and the divisor, so this is not a mean over all `K` clusters. It is
    /// `0.0` when every cluster is empty.
    pub mean_extremal_similarity: f32,
    /// Wall-clock time of the whole iteration
    pub elapsed: Duration,
}

impl IterationStats {
    /// Summarize the reduced global cluster states.
    ///
    /// The first cluster seeds both extremes; later clusters replace them only
    /// on a strictly larger (or smaller) count, so ties go to the lowest id.
    pub fn collect(iteration: usize, clusters: &[ClusterState], elapsed: Duration) -> Self {
        let mut largest: Option<ClusterSize> = None;
        let mut smallest: Option<ClusterSize> = None;
        let mut extremal_total = 0.0f32;
        let mut populated = 0usize;

        for (cluster, state) in clusters.iter().enumerate() {
            let size = ClusterSize {
                cluster,
                count: state.count(),
            };
            if largest.map_or(true, |best| size.count > best.count) {
                largest = Some(size);
            }
            if smallest.map_or(true, |best| size.count < best.count) {
                smallest = Some(size);
            }
            if let Some(similarity) = state.extremal_similarity() {
                extremal_total += similarity;
                populated += 1;
            }
        }

        let empty = ClusterSize {
            cluster: 0,
            count: 0,
        };
        Self {
            iteration,
            largest: largest.unwrap_or(empty),
            smallest: smallest.unwrap_or(empty),
            mean_extremal_similarity: if populated > 0 {
                extremal_total / populated as f32
            } else {
                0.0
            },
            elapsed,
        }
    }
}
