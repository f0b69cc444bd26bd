/// A feature vector stored as its non-zero (index, weight) entries.
///
/// Indices are neither sorted nor deduplicated; repeated indices add up
/// wherever the vector is scored or accumulated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Create a sparse vector from parallel index and weight lists.
    ///
    /// # Panics
    /// Panics if `indices` and `values` have different lengths.
    pub fn new(indices: Vec<usize>, values: Vec<f32>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "indices and values must have the same length"
        );
        Self { indices, values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, index: usize, weight: f32) {
        self.indices.push(index);
        self.values.push(weight);
    }

    /// Returns the number of stored entries (duplicates included).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Iterate over (index, weight) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Largest index referenced, if any
    pub fn max_index(&self) -> Option<usize> {
        self.indices.iter().copied().max()
    }
}

impl FromIterator<(usize, f32)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (usize, f32)>>(iter: I) -> Self {
        let (indices, values) = iter.into_iter().unzip();
        Self { indices, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iter() {
        let mut v = SparseVector::with_capacity(2);
        v.push(3, 0.5);
        v.push(1, 2.0);

        assert_eq!(v.len(), 2);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(3, 0.5), (1, 2.0)]);
        assert_eq!(v.max_index(), Some(3));
    }

    #[test]
    fn test_from_iter_keeps_duplicates() {
        let v: SparseVector = vec![(0, 1.0), (0, 2.0)].into_iter().collect();
        assert_eq!(v.indices(), &[0, 0]);
        assert_eq!(v.values(), &[1.0, 2.0]);
    }

    #[test]
    fn test_empty() {
        let v = SparseVector::empty();
        assert!(v.is_empty());
        assert_eq!(v.max_index(), None);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_new_rejects_mismatched_lengths() {
        SparseVector::new(vec![0, 1], vec![1.0]);
    }
}
