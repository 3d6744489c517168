//! Hybrid Recommendation Engine
//!
//! Combines collaborative and content-based candidate lists for a user.
//!
//! Steps:
//! 1. Collaborative candidates (2 x top_n), each scored 1.0
//! 2. Favorite item lookup (highest rating, lowest item id on ties)
//! 3. Content candidates seeded by the favorite (2 x top_n), each scored 1.0
//! 4. Outer join by item id, missing side scored 0
//! 5. Weighted sum and top-n selection
//!
//! Component scores are membership flags, so the fused score separates items
//! found by both engines from items found by one.

use crate::collaborative::CollaborativeEngine;
use crate::content_based::ContentEngine;
use crate::error::{RecommendError, Result};
use crate::types::{favorite_item, Item, Rating, Recommendation, ScoredCandidate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const COLLABORATIVE_WEIGHT: f64 = 0.5;
const CONTENT_WEIGHT: f64 = 0.5;
const CANDIDATE_MULTIPLIER: usize = 2;

/// Weights applied to the component scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    pub weight_cf: f64,
    pub weight_cb: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            weight_cf: COLLABORATIVE_WEIGHT,
            weight_cb: CONTENT_WEIGHT,
        }
    }
}

impl HybridWeights {
    pub fn new(weight_cf: f64, weight_cb: f64) -> Self {
        Self {
            weight_cf,
            weight_cb,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        if !valid(self.weight_cf) || !valid(self.weight_cb) {
            return Err(RecommendError::InvalidArgument(format!(
                "hybrid weights must be finite and non-negative (cf={}, cb={})",
                self.weight_cf, self.weight_cb
            )));
        }
        if self.weight_cf == 0.0 && self.weight_cb == 0.0 {
            return Err(RecommendError::InvalidArgument(
                "at least one hybrid weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fused candidate with both component scores
#[derive(Debug, Clone, PartialEq)]
pub struct HybridCandidate {
    pub item_id: i64,
    pub title: String,
    pub cf_score: f64,
    pub cb_score: f64,
    pub hybrid_score: f64,
}

/// Hybrid combiner over the collaborative and content engines
#[derive(Debug, Clone, Default)]
pub struct HybridCombiner {
    weights: HybridWeights,
    collaborative: CollaborativeEngine,
    content: ContentEngine,
}

impl HybridCombiner {
    pub fn new(weights: HybridWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn with_collaborative(mut self, engine: CollaborativeEngine) -> Self {
        self.collaborative = engine;
        self
    }

    pub fn recommend(
        &self,
        user_id: i64,
        catalog: &[Item],
        ratings: &[Rating],
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        let pool = top_n.saturating_mul(CANDIDATE_MULTIPLIER);
        let favorite = favorite_item(user_id, ratings);

        let cf_candidates = match self.collaborative.recommend(user_id, catalog, ratings, pool) {
            Ok(candidates) => candidates,
            Err(RecommendError::UnknownUser(_)) if favorite.is_none() => {
                tracing::debug!(user_id, "User has no ratings, collaborative list is empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let Some(favorite_id) = favorite else {
            return Ok(cf_candidates
                .into_iter()
                .take(top_n)
                .map(ScoredCandidate::into_recommendation)
                .collect());
        };

        let cb_candidates = self.content.recommend(favorite_id, catalog, pool);
        let fused = self.fuse(cf_candidates, cb_candidates);

        tracing::debug!(
            user_id,
            favorite_id,
            fused = fused.len(),
            "Hybrid candidates fused"
        );

        Ok(fused
            .into_iter()
            .take(top_n)
            .map(|c| Recommendation {
                item_id: c.item_id,
                title: c.title,
            })
            .collect())
    }

    /// Outer-join both lists by item id and rank by weighted score.
    ///
    /// Ties break by ascending item id.
    pub fn fuse(
        &self,
        cf_candidates: Vec<ScoredCandidate>,
        cb_candidates: Vec<ScoredCandidate>,
    ) -> Vec<HybridCandidate> {
        let mut merged: Vec<HybridCandidate> = Vec::new();
        let mut positions: HashMap<i64, usize> = HashMap::new();

        for candidate in cf_candidates {
            positions.entry(candidate.item_id).or_insert_with(|| {
                merged.push(HybridCandidate {
                    item_id: candidate.item_id,
                    title: candidate.title,
                    cf_score: 1.0,
                    cb_score: 0.0,
                    hybrid_score: 0.0,
                });
                merged.len() - 1
            });
        }

        for candidate in cb_candidates {
            match positions.get(&candidate.item_id) {
                Some(&idx) => merged[idx].cb_score = 1.0,
                None => {
                    positions.insert(candidate.item_id, merged.len());
                    merged.push(HybridCandidate {
                        item_id: candidate.item_id,
                        title: candidate.title,
                        cf_score: 0.0,
                        cb_score: 1.0,
                        hybrid_score: 0.0,
                    });
                }
            }
        }

        for candidate in &mut merged {
            candidate.hybrid_score = self.weights.weight_cf * candidate.cf_score
                + self.weights.weight_cb * candidate.cb_score;
        }
        merged.sort_by(|a, b| {
            b.hybrid_score
                .total_cmp(&a.hybrid_score)
                .then_with(|| a.item_id.cmp(&b.item_id))
        });

        merged
    }
}
