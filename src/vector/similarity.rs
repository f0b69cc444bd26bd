//! Sparse-against-dense kernels used by scoring, seeding and accumulation.
//!
//! All three panic on an index outside the dense buffer. Callers validate
//! feature indices before a run starts, so a panic here means a bug.

use super::SparseVector;

/// Similarity of a sparse vector to a dense centroid
///
/// Unnormalized dot product over the vector's non-zero entries; larger means
/// nearer. Cost is proportional to the vector's entry count, not to the
/// dimensionality.
#[inline]
pub fn sparse_dot(vector: &SparseVector, dense: &[f32]) -> f32 {
    vector
        .iter()
        .map(|(index, weight)| weight * dense[index])
        .sum()
}

/// Add every weight into `dense[index]`.
#[inline]
pub fn accumulate(vector: &SparseVector, dense: &mut [f32]) {
    for (index, weight) in vector.iter() {
        dense[index] += weight;
    }
}

/// Overwrite `dense[index]` with each weight; untouched entries keep their value.
#[inline]
pub fn scatter(vector: &SparseVector, dense: &mut [f32]) {
    for (index, weight) in vector.iter() {
        dense[index] = weight;
    }
}
