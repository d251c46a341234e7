use derive_new::new;
use serde::{Deserialize, Serialize};

/// A sparse feature vector with strictly increasing feature indices
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, new)]
pub struct SparseVector {
    /// Feature indices
    pub indices: Vec<u32>,

    /// Feature weights, parallel to `indices`
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Build a vector from `(index, value)` pairs sorted by index
    pub fn from_sorted<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let (indices, values) = entries.into_iter().unzip();

        Self { indices, values }
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// True if the vector has no stored entries
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(index, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .zip(self.values.iter())
            .map(|(index, value)| (*index as usize, *value))
    }

    /// Squared euclidean norm
    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|value| value * value).sum()
    }

    /// Dot product against a dense weight vector. Indices past its end contribute nothing.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(index, value)| dense.get(index).map(|weight| weight * value))
            .sum()
    }

    /// Scale the vector to unit L2 norm. Zero vectors are left unchanged.
    pub fn l2_normalize(&mut self) {
        let norm = self.squared_norm().sqrt();

        if norm > 0.0 {
            for value in self.values.iter_mut() {
                *value /= norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_ignores_out_of_range_indices() {
        let vector = SparseVector::new(vec![0, 2, 7], vec![1.0, 2.0, 3.0]);

        assert_eq!(vector.dot(&[0.5, 9.0, 0.25]), 1.0);
    }

    #[test]
    fn test_l2_normalize() {
        let mut vector = SparseVector::from_sorted([(1, 3.0), (4, 4.0)]);
        vector.l2_normalize();

        assert!((vector.squared_norm() - 1.0).abs() < 1e-12);
        assert!((vector.values[0] - 0.6).abs() < 1e-12);

        let mut empty = SparseVector::default();
        empty.l2_normalize();

        assert!(empty.is_empty());
    }
}
