//! Recommendation method routing

use crate::collaborative::CollaborativeEngine;
use crate::content_based::ContentEngine;
use crate::error::{RecommendError, Result};
use crate::matrix_factorization::SvdConfig;
use crate::recommendation::{HybridCombiner, HybridWeights};
use crate::types::{favorite_item, Item, Rating, Recommendation, ScoredCandidate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TOP_N: usize = 10;

/// Recommendation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationMethod {
    Collaborative,
    Content,
    #[default]
    Hybrid,
}

impl RecommendationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMethod::Collaborative => "collaborative",
            RecommendationMethod::Content => "content",
            RecommendationMethod::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for RecommendationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationMethod {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "collaborative" => Ok(RecommendationMethod::Collaborative),
            "content" => Ok(RecommendationMethod::Content),
            "hybrid" => Ok(RecommendationMethod::Hybrid),
            other => Err(RecommendError::InvalidMethod(other.to_string())),
        }
    }
}

/// Engine settings shared by all methods
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    svd_config: SvdConfig,
    weights: HybridWeights,
}

impl Recommender {
    pub fn new(svd_config: SvdConfig, weights: HybridWeights) -> Self {
        Self {
            svd_config,
            weights,
        }
    }

    pub fn recommend(
        &self,
        user_id: i64,
        catalog: &[Item],
        ratings: &[Rating],
        method: RecommendationMethod,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        if top_n == 0 {
            return Err(RecommendError::InvalidArgument(
                "top_n must be a positive integer".to_string(),
            ));
        }

        let collaborative = CollaborativeEngine::new().with_config(self.svd_config.clone());

        let recommendations = match method {
            RecommendationMethod::Collaborative => collaborative
                .recommend(user_id, catalog, ratings, top_n)?
                .into_iter()
                .map(ScoredCandidate::into_recommendation)
                .collect(),
            RecommendationMethod::Content => match favorite_item(user_id, ratings) {
                Some(favorite_id) => ContentEngine::new()
                    .recommend(favorite_id, catalog, top_n)
                    .into_iter()
                    .map(ScoredCandidate::into_recommendation)
                    .collect(),
                None => Vec::new(),
            },
            RecommendationMethod::Hybrid => {
                self.weights.validate()?;
                HybridCombiner::new(self.weights)
                    .with_collaborative(collaborative)
                    .recommend(user_id, catalog, ratings, top_n)?
            }
        };

        tracing::debug!(
            user_id,
            method = %method,
            top_n,
            returned = recommendations.len(),
            "Recommendations generated"
        );

        Ok(recommendations)
    }
}

/// Recommend with default engine settings
pub fn recommend(
    user_id: i64,
    catalog: &[Item],
    ratings: &[Rating],
    method: RecommendationMethod,
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    Recommender::default().recommend(user_id, catalog, ratings, method, top_n)
}
