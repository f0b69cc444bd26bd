//! Static split of the input into one contiguous range per worker.

use std::ops::Range;

use rand::rngs::StdRng;

use super::state::ClusterState;

/// Split `[0, len)` into `worker_count` contiguous ranges.
///
/// Every range but the trailing ones has `ceil(len / worker_count)` entries.
/// When there are more workers than records the trailing ranges are empty.
///
/// # Panics
/// Panics if `worker_count` is zero.
pub fn partition_ranges(len: usize, worker_count: usize) -> Vec<Range<usize>> {
    assert!(worker_count > 0, "worker_count must be positive");
    let block = len.div_ceil(worker_count);
    (0..worker_count)
        .map(|worker| {
            let begin = (worker * block).min(len);
            let end = (begin + block).min(len);
            begin..end
        })
        .collect()
}

/// One worker's slice of the input and its private cluster accumulators.
#[derive(Debug)]
pub struct WorkPartition {
    pub(crate) id: usize,
    pub(crate) range: Range<usize>,
    pub(crate) clusters: Vec<ClusterState>,
    pub(crate) rng: StdRng,
}

impl WorkPartition {
    pub fn new(
        id: usize,
        range: Range<usize>,
        cluster_count: usize,
        dimension: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            id,
            range,
            clusters: vec![ClusterState::new(dimension); cluster_count],
            rng,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn begin(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Partition-local accumulators, one per cluster
    pub fn clusters(&self) -> &[ClusterState] {
        &self.clusters
    }

    /// Copy the global centroids in and clear the local statistics.
    pub fn reset_from(&mut self, global: &[ClusterState]) {
        debug_assert_eq!(self.clusters.len(), global.len());
        for (local, global) in self.clusters.iter_mut().zip(global) {
            local.snapshot_from(global);
        }
    }
}

/// Hand out one mutable slice of `assignments` per partition.
///
/// # Panics
/// Panics unless the partitions are ordered, contiguous and cover
/// `assignments` exactly. Anything else would let two workers write the same
/// index or leave indices unassigned.
pub fn split_assignments<'a>(
    assignments: &'a mut [usize],
    partitions: &[WorkPartition],
) -> Vec<&'a mut [usize]> {
    let total = assignments.len();
    let mut rest = assignments;
    let mut cursor = 0;
    let mut slices = Vec::with_capacity(partitions.len());

    for partition in partitions {
        assert_eq!(
            partition.begin(),
            cursor,
            "partition {} starts at {}, expected {}",
            partition.id,
            partition.begin(),
            cursor
        );
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(partition.len());
        slices.push(head);
        rest = tail;
        cursor = partition.end();
    }

    assert_eq!(
        cursor,
        total,
        "partitions cover {cursor} of {total} records"
    );
    slices
}
