//! K-means over sparse vectors
//!
//! Runs a fixed number of assign/reduce/update iterations. Each iteration the
//! input is scored in parallel by one worker per static partition, every
//! worker accumulating into its own copy of the cluster statistics; the
//! coordinator then folds those copies together on a single thread.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use super::partition::{partition_ranges, split_assignments, WorkPartition};
use super::state::ClusterState;
use super::stats::IterationStats;
use super::worker::assign_partition;
use crate::config::KMeansConfig;
use crate::error::{ClusterError, Result};
use crate::vector::{scatter, SparseVector};

/// Final result of a clustering run
#[derive(Debug, Clone)]
pub struct ClusterAssignment {
    /// Cluster id of each input vector, in input order
    pub assignments: Vec<usize>,
    /// Centroids after the last iteration
    pub centroids: Vec<Vec<f32>>,
    /// Members per cluster in the last iteration
    pub counts: Vec<usize>,
    /// Diagnostics of every iteration, oldest first
    pub history: Vec<IterationStats>,
}

impl ClusterAssignment {
    /// Input indices grouped by cluster
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut clusters = vec![Vec::new(); self.centroids.len()];
        for (i, &cluster_id) in self.assignments.iter().enumerate() {
            clusters[cluster_id].push(i);
        }
        clusters
    }
}

/// Coordinator of a clustering run over a borrowed dataset.
///
/// Owns the global cluster states, the partitions with their local states,
/// the assignment array and the worker pool. Nothing outlives the value.
pub struct SparseKMeans<'a> {
    data: &'a [SparseVector],
    config: KMeansConfig,
    clusters: Vec<ClusterState>,
    partitions: Vec<WorkPartition>,
    assignments: Vec<usize>,
    pool: ThreadPool,
    iteration: usize,
}

impl<'a> SparseKMeans<'a> {
    /// Validate the input and seed each centroid from a randomly chosen record.
    ///
    /// Records are drawn with replacement; each chosen record's entries are
    /// copied into the centroid as they are.
    pub fn new(data: &'a [SparseVector], config: KMeansConfig) -> Result<Self> {
        validate_input(data, &config)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let clusters = (0..config.cluster_count)
            .map(|cluster_id| {
                let record = rng.gen_range(0..data.len());
                debug!(cluster_id, record, "seeding centroid");
                let mut state = ClusterState::new(config.dimension);
                scatter(&data[record], &mut state.center);
                state
            })
            .collect();

        Self::assemble(data, config, clusters, &mut rng)
    }

    /// Start from caller-supplied centroids instead of random seeding.
    pub fn with_centroids(
        data: &'a [SparseVector],
        config: KMeansConfig,
        centroids: Vec<Vec<f32>>,
    ) -> Result<Self> {
        validate_input(data, &config)?;
        if centroids.len() != config.cluster_count {
            return Err(ClusterError::CentroidCount {
                expected: config.cluster_count,
                actual: centroids.len(),
            });
        }
        if let Some((cluster, centroid)) = centroids
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != config.dimension)
        {
            return Err(ClusterError::CentroidDimension {
                cluster,
                expected: config.dimension,
                actual: centroid.len(),
            });
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let clusters = centroids.into_iter().map(ClusterState::from_center).collect();
        Self::assemble(data, config, clusters, &mut rng)
    }

    fn assemble(
        data: &'a [SparseVector],
        config: KMeansConfig,
        clusters: Vec<ClusterState>,
        rng: &mut StdRng,
    ) -> Result<Self> {
        if let Ok(cores) = std::thread::available_parallelism() {
            if config.worker_count > cores.get() {
                warn!(
                    worker_count = config.worker_count,
                    available = cores.get(),
                    "worker count exceeds available parallelism"
                );
            }
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_count)
            .thread_name(|i| format!("kmeans-worker-{i}"))
            .build()?;

        let partitions = partition_ranges(data.len(), config.worker_count)
            .into_iter()
            .enumerate()
            .map(|(id, range)| {
                debug!(partition = id, begin = range.start, end = range.end, "partition");
                let worker_rng = StdRng::seed_from_u64(rng.gen());
                WorkPartition::new(id, range, config.cluster_count, config.dimension, worker_rng)
            })
            .collect();

        Ok(Self {
            data,
            config,
            clusters,
            partitions,
            assignments: vec![0; data.len()],
            pool,
            iteration: 0,
        })
    }

    /// Run one full iteration and return its diagnostics.
    pub fn step(&mut self) -> IterationStats {
        self.iteration += 1;
        let started = Instant::now();

        self.reset_locals();
        self.dispatch();
        self.reduce();

        let stats = IterationStats::collect(self.iteration, &self.clusters, started.elapsed());
        info!(
            iteration = stats.iteration,
            max_count = stats.largest.count,
            max_cluster = stats.largest.cluster,
            min_count = stats.smallest.count,
            min_cluster = stats.smallest.cluster,
            elapsed_secs = stats.elapsed.as_secs_f64(),
            mean_extremal_similarity = f64::from(stats.mean_extremal_similarity),
            "iteration complete"
        );
        stats
    }

    /// Run exactly `iteration_count` iterations.
    pub fn run(&mut self) -> Vec<IterationStats> {
        info!(
            records = self.data.len(),
            clusters = self.config.cluster_count,
            iterations = self.config.iteration_count,
            workers = self.config.worker_count,
            dimension = self.config.dimension,
            "starting k-means"
        );
        (0..self.config.iteration_count).map(|_| self.step()).collect()
    }

    /// Seed, run every iteration and return the final assignment.
    pub fn fit(data: &'a [SparseVector], config: KMeansConfig) -> Result<ClusterAssignment> {
        let mut kmeans = Self::new(data, config)?;
        let history = kmeans.run();
        Ok(kmeans.into_assignment(history))
    }

    pub fn into_assignment(self, history: Vec<IterationStats>) -> ClusterAssignment {
        ClusterAssignment {
            counts: self.clusters.iter().map(ClusterState::count).collect(),
            centroids: self.clusters.into_iter().map(|c| c.center).collect(),
            assignments: self.assignments,
            history,
        }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Global cluster states as of the last completed iteration
    pub fn clusters(&self) -> &[ClusterState] {
        &self.clusters
    }

    pub fn partitions(&self) -> &[WorkPartition] {
        &self.partitions
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Number of completed iterations
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    fn reset_locals(&mut self) {
        for partition in &mut self.partitions {
            partition.reset_from(&self.clusters);
        }
    }

    /// Score every partition on the pool; returns once all workers finished.
    fn dispatch(&mut self) {
        let data = self.data;
        let slices = split_assignments(&mut self.assignments, &self.partitions);
        let partitions = &mut self.partitions;

        self.pool.scope(|scope| {
            for (partition, out) in partitions.iter_mut().zip(slices) {
                scope.spawn(move |_| assign_partition(partition, data, out));
            }
        });
    }

    /// Fold the partition-local statistics into the global states and
    /// recompute the centroids.
    fn reduce(&mut self) {
        for (cluster_id, global) in self.clusters.iter_mut().enumerate() {
            global.reset();
            for partition in &self.partitions {
                global.merge(&partition.clusters[cluster_id]);
            }
            global.update_center();
        }
    }
}

/// Reject inputs the engine cannot index safely.
fn validate_input(data: &[SparseVector], config: &KMeansConfig) -> Result<()> {
    config.validate()?;
    if data.is_empty() {
        return Err(ClusterError::EmptyInput);
    }
    for (record, vector) in data.iter().enumerate() {
        if let Some(index) = vector.max_index().filter(|&i| i >= config.dimension) {
            return Err(ClusterError::FeatureOutOfRange {
                record,
                index: index as i64,
                dimension: config.dimension,
            });
        }
    }
    Ok(())
}
