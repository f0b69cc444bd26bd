//! Assignment step for one partition.

use rand::Rng;

use super::partition::WorkPartition;
use super::state::ClusterState;
use crate::vector::SparseVector;

/// Best cluster for `vector` among `clusters`, as `(cluster id, similarity)`.
///
/// Starts from `(fallback, 0.0)` and only moves on a strictly larger score,
/// so the first cluster reaching the maximum wins and a vector that scores
/// nothing positive anywhere keeps the fallback.
#[inline]
pub fn nearest_cluster(
    vector: &SparseVector,
    clusters: &[ClusterState],
    fallback: usize,
) -> (usize, f32) {
    let mut best = (fallback, 0.0f32);
    for (cluster_id, cluster) in clusters.iter().enumerate() {
        let score = cluster.similarity(vector);
        if score > best.1 {
            best = (cluster_id, score);
        }
    }
    best
}

/// Assign every record in the partition's range and accumulate its statistics.
///
/// `out` is this partition's slice of the global assignment array, so
/// `out[0]` belongs to record `partition.begin()`. Scoring uses the
/// partition's centroid snapshot, which the coordinator refreshed before
/// dispatch.
pub fn assign_partition(partition: &mut WorkPartition, data: &[SparseVector], out: &mut [usize]) {
    debug_assert_eq!(out.len(), partition.len());
    let WorkPartition {
        range,
        clusters,
        rng,
        ..
    } = partition;
    let cluster_count = clusters.len();

    for (slot, vector) in out.iter_mut().zip(&data[range.clone()]) {
        let fallback = rng.gen_range(0..cluster_count);
        let (best, score) = nearest_cluster(vector, clusters, fallback);

        *slot = best;
        clusters[best].absorb(vector, score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::partition::partition_ranges;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sparse(pairs: &[(usize, f32)]) -> SparseVector {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_nearest_picks_highest_similarity() {
        let clusters = vec![
            ClusterState::from_center(vec![1.0, 0.0]),
            ClusterState::from_center(vec![0.0, 1.0]),
        ];
        assert_eq!(
            nearest_cluster(&sparse(&[(1, 0.8)]), &clusters, 0),
            (1, 0.8)
        );
        assert_eq!(
            nearest_cluster(&sparse(&[(0, 0.9)]), &clusters, 1),
            (0, 0.9)
        );
    }

    #[test]
    fn test_first_maximum_wins() {
        let clusters = vec![
            ClusterState::from_center(vec![0.0]),
            ClusterState::from_center(vec![1.0]),
            ClusterState::from_center(vec![1.0]),
        ];
        assert_eq!(nearest_cluster(&sparse(&[(0, 2.0)]), &clusters, 0).0, 1);
    }

    #[test]
    fn test_non_positive_scores_keep_fallback() {
        let clusters = vec![
            ClusterState::new(2),
            ClusterState::from_center(vec![-1.0, 0.0]),
        ];
        assert_eq!(
            nearest_cluster(&sparse(&[(0, 1.0)]), &clusters, 1),
            (1, 0.0)
        );
        assert_eq!(
            nearest_cluster(&sparse(&[(0, 1.0)]), &clusters, 0),
            (0, 0.0)
        );
    }

    #[test]
    fn test_assign_partition_writes_only_its_range() {
        let data = vec![
            sparse(&[(0, 1.0)]),
            sparse(&[(1, 1.0)]),
            sparse(&[(0, 0.5)]),
            sparse(&[(1, 0.5)]),
        ];
        let range = partition_ranges(data.len(), 2)[1].clone();
        let mut partition = WorkPartition::new(1, range, 2, 2, StdRng::seed_from_u64(7));
        partition.reset_from(&[
            ClusterState::from_center(vec![1.0, 0.0]),
            ClusterState::from_center(vec![0.0, 1.0]),
        ]);

        let mut out = vec![usize::MAX; partition.len()];
        assign_partition(&mut partition, &data, &mut out);

        assert_eq!(out, vec![0, 1]);
        let clusters = partition.clusters();
        assert_eq!(clusters[0].count(), 1);
        assert_eq!(clusters[0].sum(), &[0.5, 0.0]);
        assert_eq!(clusters[1].count(), 1);
        assert_eq!(clusters[1].sum(), &[0.0, 0.5]);
        assert_eq!(clusters[1].extremal_similarity(), Some(0.5));
    }

    #[test]
    fn test_empty_partition_is_a_no_op() {
        let data = vec![sparse(&[(0, 1.0)])];
        let mut partition = WorkPartition::new(3, 1..1, 2, 2, StdRng::seed_from_u64(0));
        let mut out: Vec<usize> = Vec::new();
        assign_partition(&mut partition, &data, &mut out);
        assert!(partition.clusters().iter().all(|c| c.count() == 0));
    }
}
