//! Dense user-item rating matrix
//!
//! Pivots the rating table into a `users x items` matrix. Rows are ordered by
//! ascending user id and columns by ascending item id. Unobserved entries are
//! 0.0, so "no rating" and a literal zero rating are indistinguishable.

use crate::types::Rating;
use ndarray::{Array2, ArrayView1};
use std::collections::{BTreeSet, HashMap};

/// Dense user x item rating matrix
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    values: Array2<f64>,
    user_ids: Vec<i64>,
    item_ids: Vec<i64>,
    /// User ID to row index mapping
    user_index: HashMap<i64, usize>,
    /// Item ID to column index mapping
    item_index: HashMap<i64, usize>,
}

impl RatingMatrix {
    /// Build the matrix from a rating table.
    ///
    /// Duplicate (user, item) pairs resolve to the last rating in table order.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let user_ids: Vec<i64> = ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let item_ids: Vec<i64> = ratings
            .iter()
            .map(|r| r.item_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: HashMap<i64, usize> = user_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (*id, idx))
            .collect();
        let item_index: HashMap<i64, usize> = item_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (*id, idx))
            .collect();

        let mut values = Array2::<f64>::zeros((user_ids.len(), item_ids.len()));
        for rating in ratings {
            let row = user_index[&rating.user_id];
            let col = item_index[&rating.item_id];
            values[[row, col]] = rating.value;
        }

        tracing::debug!(
            users = user_ids.len(),
            items = item_ids.len(),
            observed = ratings.len(),
            "Built rating matrix"
        );

        Self {
            values,
            user_ids,
            item_ids,
            user_index,
            item_index,
        }
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Row labels in matrix order
    pub fn user_ids(&self) -> &[i64] {
        &self.user_ids
    }

    /// Column labels in matrix order
    pub fn item_ids(&self) -> &[i64] {
        &self.item_ids
    }

    pub fn user_index(&self, user_id: i64) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    pub fn item_index(&self, item_id: i64) -> Option<usize> {
        self.item_index.get(&item_id).copied()
    }

    /// (num_users, num_items)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rating value for a user-item pair, 0.0 when unobserved or unknown
    pub fn get(&self, user_id: i64, item_id: i64) -> f64 {
        match (self.user_index(user_id), self.item_index(item_id)) {
            (Some(row), Some(col)) => self.values[[row, col]],
            _ => 0.0,
        }
    }

    /// Row of a known user
    pub fn user_row(&self, user_id: i64) -> Option<ArrayView1<'_, f64>> {
        self.user_index(user_id).map(|row| self.values.row(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matrix() {
        let ratings = vec![
            Rating::new(2, 20, 4.0),
            Rating::new(1, 10, 5.0),
            Rating::new(1, 20, 3.0),
        ];

        let matrix = RatingMatrix::from_ratings(&ratings);

        assert_eq!(matrix.shape(), (2, 2));
        assert_eq!(matrix.user_ids(), &[1, 2]);
        assert_eq!(matrix.item_ids(), &[10, 20]);
        assert_eq!(matrix.get(1, 10), 5.0);
        assert_eq!(matrix.get(1, 20), 3.0);
        assert_eq!(matrix.get(2, 20), 4.0);
        assert_eq!(matrix.get(2, 10), 0.0);
    }

    #[test]
    fn test_unknown_ids() {
        let matrix = RatingMatrix::from_ratings(&[Rating::new(1, 10, 5.0)]);

        assert_eq!(matrix.user_index(99), None);
        assert_eq!(matrix.item_index(99), None);
        assert_eq!(matrix.get(99, 10), 0.0);
        assert!(matrix.user_row(99).is_none());
    }

    #[test]
    fn test_empty_ratings() {
        let matrix = RatingMatrix::from_ratings(&[]);
        assert_eq!(matrix.shape(), (0, 0));
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_duplicate_pair_last_wins() {
        let ratings = vec![Rating::new(1, 10, 2.0), Rating::new(1, 10, 4.0)];
        let matrix = RatingMatrix::from_ratings(&ratings);
        assert_eq!(matrix.get(1, 10), 4.0);
    }

    #[test]
    fn test_user_row() {
        let ratings = vec![Rating::new(1, 10, 5.0), Rating::new(1, 30, 1.0), Rating::new(2, 20, 3.0)];
        let matrix = RatingMatrix::from_ratings(&ratings);
        let row = matrix.user_row(1).unwrap();
        assert_eq!(row.to_vec(), vec![5.0, 0.0, 1.0]);
    }
}
