//! Shared domain types for the recommendation engines

use serde::{Deserialize, Serialize};

/// Catalog entry (a movie)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "movieId")]
    pub item_id: i64,
    pub title: String,
    /// Free text used for content similarity; the loader backfills it with the title
    pub description: String,
}

impl Item {
    pub fn new(item_id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            item_id,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Item whose description is its title
    pub fn titled(item_id: i64, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            item_id,
            description: title.clone(),
            title,
        }
    }
}

/// Observed (user, item, value) rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "movieId")]
    pub item_id: i64,
    #[serde(rename = "rating")]
    pub value: f64,
}

impl Rating {
    pub fn new(user_id: i64, item_id: i64, value: f64) -> Self {
        Self {
            user_id,
            item_id,
            value,
        }
    }
}

/// Free-text review; loaded alongside ratings but not used for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "movieId")]
    pub item_id: i64,
    pub review: String,
}

/// Candidate produced by an engine before fusion
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub item_id: i64,
    pub title: String,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn into_recommendation(self) -> Recommendation {
        Recommendation {
            item_id: self.item_id,
            title: self.title,
        }
    }
}

/// Final recommendation entry, serialized as `{"movieId", "title"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "movieId")]
    pub item_id: i64,
    pub title: String,
}

/// Find the user's favorite item: highest rating value, ties resolved to the lowest item id.
///
/// Returns `None` when the user has no ratings.
pub fn favorite_item(user_id: i64, ratings: &[Rating]) -> Option<i64> {
    ratings
        .iter()
        .filter(|r| r.user_id == user_id)
        .max_by(|a, b| {
            a.value
                .total_cmp(&b.value)
                .then_with(|| b.item_id.cmp(&a.item_id))
        })
        .map(|r| r.item_id)
}

/// Descending score order with ascending item id as tie-break
pub(crate) fn rank_by_score(a: (i64, f64), b: (i64, f64)) -> std::cmp::Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_item_highest_rating() {
        let ratings = vec![
            Rating::new(1, 10, 3.0),
            Rating::new(1, 11, 5.0),
            Rating::new(2, 12, 5.0),
        ];
        assert_eq!(favorite_item(1, &ratings), Some(11));
    }

    #[test]
    fn test_favorite_item_tie_prefers_lowest_id() {
        let ratings = vec![
            Rating::new(1, 30, 4.0),
            Rating::new(1, 20, 4.0),
            Rating::new(1, 25, 2.0),
        ];
        assert_eq!(favorite_item(1, &ratings), Some(20));
    }

    #[test]
    fn test_favorite_item_no_ratings() {
        let ratings = vec![Rating::new(2, 1, 5.0)];
        assert_eq!(favorite_item(1, &ratings), None);
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = Recommendation {
            item_id: 3,
            title: "Heat".to_string(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["movieId"], 3);
        assert_eq!(json["title"], "Heat");
    }

    #[test]
    fn test_rank_by_score_ties() {
        let mut scored = vec![(5, 1.0), (2, 1.0), (9, 2.0)];
        scored.sort_by(|a, b| rank_by_score(*a, *b));
        assert_eq!(scored, vec![(9, 2.0), (2, 1.0), (5, 1.0)]);
    }
}
