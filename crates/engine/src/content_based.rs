//! Content-based filtering implementation
//!
//! Scores catalog items against a reference item by TF-IDF cosine similarity
//! of their descriptions.

use crate::text::{cosine_similarity_matrix, TfidfVectorizer};
use crate::types::{rank_by_score, Item, ScoredCandidate};
use ndarray::Array2;

/// Content-based recommendation engine
#[derive(Debug, Clone, Default)]
pub struct ContentEngine;

impl ContentEngine {
    pub fn new() -> Self {
        Self
    }

    /// Symmetric `items x items` cosine similarity matrix in catalog order
    pub fn similarity_matrix(&self, catalog: &[Item]) -> Array2<f64> {
        let descriptions: Vec<&str> = catalog.iter().map(|i| i.description.as_str()).collect();
        let mut vectorizer = TfidfVectorizer::english();
        let tfidf = vectorizer.fit_transform(&descriptions);
        cosine_similarity_matrix(&tfidf)
    }

    /// Up to `top_n` items most similar to `reference_item_id`.
    ///
    /// The reference item's own catalog position is never returned. An unknown
    /// reference id yields an empty list.
    pub fn recommend(
        &self,
        reference_item_id: i64,
        catalog: &[Item],
        top_n: usize,
    ) -> Vec<ScoredCandidate> {
        let Some(reference_idx) = catalog.iter().position(|i| i.item_id == reference_item_id)
        else {
            tracing::debug!(item_id = reference_item_id, "Reference item not in catalog");
            return Vec::new();
        };

        let similarity = self.similarity_matrix(catalog);
        let row = similarity.row(reference_idx);

        let mut scored: Vec<(usize, f64)> = row
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != reference_idx)
            .map(|(idx, score)| (idx, *score))
            .collect();
        scored.sort_by(|a, b| {
            rank_by_score((catalog[a.0].item_id, a.1), (catalog[b.0].item_id, b.1))
        });
        scored.truncate(top_n);

        tracing::debug!(
            item_id = reference_item_id,
            candidates = scored.len(),
            "Content-based candidates ranked"
        );

        scored
            .into_iter()
            .map(|(idx, score)| ScoredCandidate {
                item_id: catalog[idx].item_id,
                title: catalog[idx].title.clone(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Item> {
        vec![
            Item::titled(1, "A space epic"),
            Item::titled(2, "A space epic sequel"),
            Item::titled(3, "A romantic drama"),
        ]
    }

    #[test]
    fn test_most_similar_description() {
        let recs = ContentEngine::new().recommend(1, &catalog(), 1);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].item_id, 2);
        assert_eq!(recs[0].title, "A space epic sequel");
    }

    #[test]
    fn test_reference_excluded() {
        let recs = ContentEngine::new().recommend(2, &catalog(), 10);
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.item_id != 2));
    }

    #[test]
    fn test_identical_descriptions_exclude_reference_by_position() {
        let catalog = vec![
            Item::new(5, "Copy", "heist thriller"),
            Item::new(6, "Original", "heist thriller"),
            Item::new(7, "Other", "musical comedy"),
        ];
        let recs = ContentEngine::new().recommend(6, &catalog, 10);
        let ids: Vec<i64> = recs.iter().map(|r| r.item_id).collect();
        assert_eq!(ids, vec![5, 7]);
        assert!((recs[0].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_reference_is_empty() {
        let recs = ContentEngine::new().recommend(42, &catalog(), 5);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_ties_ordered_by_item_id() {
        let catalog = vec![
            Item::new(1, "Seed", "pirates"),
            Item::new(9, "Nine", "cowboys"),
            Item::new(4, "Four", "robots"),
        ];
        let recs = ContentEngine::new().recommend(1, &catalog, 10);
        let ids: Vec<i64> = recs.iter().map(|r| r.item_id).collect();
        assert_eq!(ids, vec![4, 9]);
    }

    #[test]
    fn test_similarity_matrix_symmetric() {
        let sim = ContentEngine::new().similarity_matrix(&catalog());
        assert_eq!(sim.dim(), (3, 3));
        for i in 0..3 {
            for j in 0..3 {
                assert!((sim[[i, j]] - sim[[j, i]]).abs() < 1e-12);
            }
        }
    }
}
