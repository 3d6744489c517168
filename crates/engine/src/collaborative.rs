//! Collaborative filtering over the rating matrix
//!
//! Fits a truncated SVD on the dense rating matrix, reconstructs predicted
//! scores for the target user, and ranks the items that user has not rated.

use crate::error::{RecommendError, Result};
use crate::matrix_factorization::{SvdConfig, TruncatedSvd};
use crate::rating_matrix::RatingMatrix;
use crate::types::{rank_by_score, Item, Rating, ScoredCandidate};
use std::collections::{HashMap, HashSet};

/// Collaborative Filtering Engine
#[derive(Debug, Clone, Default)]
pub struct CollaborativeEngine {
    svd_config: SvdConfig,
}

impl CollaborativeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: SvdConfig) -> Self {
        self.svd_config = config;
        self
    }

    /// Up to `top_n` unrated items for `user_id`, best predicted score first.
    ///
    /// Fails with [`RecommendError::UnknownUser`] when the user has no row in
    /// the rating matrix. Items missing from the catalog are dropped when
    /// titles are joined back, which can shorten the list.
    pub fn recommend(
        &self,
        user_id: i64,
        catalog: &[Item],
        ratings: &[Rating],
        top_n: usize,
    ) -> Result<Vec<ScoredCandidate>> {
        let matrix = RatingMatrix::from_ratings(ratings);
        let user_idx = matrix
            .user_index(user_id)
            .ok_or(RecommendError::UnknownUser(user_id))?;

        let factors = TruncatedSvd::new(self.svd_config.clone()).fit(matrix.values())?;
        let predictions = factors.predict_row(user_idx);

        let rated: HashSet<i64> = ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.item_id)
            .collect();

        let mut scored: Vec<(i64, f64)> = matrix
            .item_ids()
            .iter()
            .zip(predictions.iter())
            .filter(|(item_id, _)| !rated.contains(*item_id))
            .map(|(item_id, score)| (*item_id, *score))
            .collect();
        scored.sort_by(|a, b| rank_by_score(*a, *b));
        scored.truncate(top_n);

        let titles: HashMap<i64, &str> = catalog
            .iter()
            .rev()
            .map(|i| (i.item_id, i.title.as_str()))
            .collect();

        let candidates: Vec<ScoredCandidate> = scored
            .into_iter()
            .filter_map(|(item_id, score)| {
                titles.get(&item_id).map(|title| ScoredCandidate {
                    item_id,
                    title: (*title).to_string(),
                    score,
                })
            })
            .collect();

        tracing::debug!(
            user_id,
            rated = rated.len(),
            candidates = candidates.len(),
            "Collaborative candidates ranked"
        );

        Ok(candidates)
    }
}
