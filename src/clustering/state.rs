//! Per-cluster accumulator and centroid

use crate::vector::{accumulate, sparse_dot, SparseVector};

/// Statistics and centroid of one cluster.
///
/// `center` is the read-only snapshot scored against during an iteration;
/// `sum`, `count` and `extremal_similarity` collect that iteration's members.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterState {
    pub(crate) sum: Vec<f32>,
    pub(crate) center: Vec<f32>,
    pub(crate) count: usize,
    pub(crate) extremal_similarity: Option<f32>,
}

impl ClusterState {
    /// Zero centroid and empty statistics
    pub fn new(dimension: usize) -> Self {
        Self {
            sum: vec![0.0; dimension],
            center: vec![0.0; dimension],
            count: 0,
            extremal_similarity: None,
        }
    }

    pub fn from_center(center: Vec<f32>) -> Self {
        Self {
            sum: vec![0.0; center.len()],
            center,
            count: 0,
            extremal_similarity: None,
        }
    }

    pub fn dimension(&self) -> usize {
        self.center.len()
    }

    pub fn sum(&self) -> &[f32] {
        &self.sum
    }

    pub fn center(&self) -> &[f32] {
        &self.center
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Highest similarity among this iteration's members, `None` while empty
    pub fn extremal_similarity(&self) -> Option<f32> {
        self.extremal_similarity
    }

    /// Clear the iteration statistics, keeping the centroid.
    pub fn reset(&mut self) {
        self.sum.fill(0.0);
        self.count = 0;
        self.extremal_similarity = None;
    }

    /// Take `global`'s centroid as this iteration's snapshot and clear statistics.
    pub fn snapshot_from(&mut self, global: &ClusterState) {
        self.center.copy_from_slice(&global.center);
        self.reset();
    }

    #[inline]
    pub fn similarity(&self, vector: &SparseVector) -> f32 {
        sparse_dot(vector, &self.center)
    }

    /// Record `vector` as a member that scored `score` against this cluster.
    pub fn absorb(&mut self, vector: &SparseVector, score: f32) {
        self.count += 1;
        if self.extremal_similarity.map_or(true, |current| score > current) {
            self.extremal_similarity = Some(score);
        }
        accumulate(vector, &mut self.sum);
    }

    /// Fold another accumulator for the same cluster into this one.
    pub fn merge(&mut self, other: &ClusterState) {
        debug_assert_eq!(self.sum.len(), other.sum.len());
        for (acc, &partial) in self.sum.iter_mut().zip(&other.sum) {
            *acc += partial;
        }
        self.count += other.count;
        self.extremal_similarity = match (self.extremal_similarity, other.extremal_similarity) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Recompute the centroid as the per-dimension mean of this iteration's members.
    ///
    /// An empty cluster gets an all-zero centroid and stays that way until
    /// points are assigned to it again.
    pub fn update_center(&mut self) {
        let count = self.count as f32;
        for (center, &sum) in self.center.iter_mut().zip(&self.sum) {
            *center = if self.count > 0 && sum != 0.0 {
                sum / count
            } else {
                0.0
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse(pairs: &[(usize, f32)]) -> SparseVector {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_absorb_tracks_count_sum_and_max() {
        let mut state = ClusterState::new(3);
        assert_eq!(state.dimension(), 3);
        state.absorb(&sparse(&[(0, 1.0)]), 0.4);
        state.absorb(&sparse(&[(0, 1.0), (2, 2.0)]), 0.9);
        state.absorb(&sparse(&[(1, 0.5)]), 0.1);

        assert_eq!(state.count(), 3);
        assert_eq!(state.sum(), &[2.0, 0.5, 2.0]);
        assert_eq!(state.extremal_similarity(), Some(0.9));
    }

    #[test]
    fn test_update_center_is_mean() {
        let mut state = ClusterState::new(3);
        state.absorb(&sparse(&[(0, 1.0)]), 1.0);
        state.absorb(&sparse(&[(0, 0.5), (1, 3.0)]), 1.0);
        state.update_center();

        assert_eq!(state.center(), &[0.75, 1.5, 0.0]);
    }

    #[test]
    fn test_empty_cluster_gets_zero_center() {
        let mut state = ClusterState::from_center(vec![1.0, 2.0]);
        assert_eq!(state.dimension(), 2);
        state.update_center();
        assert_eq!(state.center(), &[0.0, 0.0]);
        assert_eq!(state.extremal_similarity(), None);
    }

    #[test]
    fn test_snapshot_keeps_center_clears_stats() {
        let global = ClusterState::from_center(vec![0.5, 0.5]);
        let mut local = ClusterState::new(2);
        local.absorb(&sparse(&[(0, 1.0)]), 2.0);

        local.snapshot_from(&global);

        assert_eq!(local.center(), &[0.5, 0.5]);
        assert_eq!(local.sum(), &[0.0, 0.0]);
        assert_eq!(local.count(), 0);
        assert_eq!(local.extremal_similarity(), None);
    }

    #[test]
    fn test_merge_sums_and_takes_max() {
        let mut a = ClusterState::new(2);
        a.absorb(&sparse(&[(0, 1.0)]), 0.3);
        let mut b = ClusterState::new(2);
        b.absorb(&sparse(&[(1, 2.0)]), 0.7);
        let empty = ClusterState::new(2);

        let mut total = ClusterState::new(2);
        total.merge(&a);
        total.merge(&empty);
        total.merge(&b);

        assert_eq!(total.sum(), &[1.0, 2.0]);
        assert_eq!(total.count(), 2);
        assert_eq!(total.extremal_similarity(), Some(0.7));
    }

    #[test]
    fn test_similarity_uses_center() {
        let state = ClusterState::from_center(vec![2.0, 0.0, 1.0]);
        assert_eq!(state.similarity(&sparse(&[(0, 1.0), (2, 3.0)])), 5.0);
    }
}
