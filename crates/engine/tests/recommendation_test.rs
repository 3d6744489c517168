//! Integration tests for the recommendation engines through the public API

use reelmatch_engine::{
    recommend, CollaborativeEngine, ContentEngine, HybridCombiner, HybridWeights, Item, Rating,
    RecommendError, RecommendationMethod,
};
use std::collections::HashSet;

fn scenario_catalog() -> Vec<Item> {
    vec![
        Item::titled(1, "A space epic"),
        Item::titled(2, "A space epic sequel"),
        Item::titled(3, "A romantic drama"),
    ]
}

fn scenario_ratings() -> Vec<Rating> {
    vec![Rating::new(1, 1, 5.0), Rating::new(1, 3, 2.0)]
}

fn movie_catalog() -> Vec<Item> {
    vec![
        Item::new(1, "Star Voyage", "space crew explores distant galaxy"),
        Item::new(2, "Star Voyage II", "space crew returns to distant galaxy"),
        Item::new(3, "Love in Paris", "romantic comedy in paris"),
        Item::new(4, "Paris Nights", "romantic drama set in paris"),
        Item::new(5, "Haunted Manor", "horror story in an old manor"),
        Item::new(6, "Galaxy Wars", "space battle across the galaxy"),
        Item::new(7, "Manor Secrets", "mystery in an old manor"),
        Item::new(8, "Robot Dawn", "robots awaken on a space station"),
    ]
}

fn movie_ratings() -> Vec<Rating> {
    vec![
        Rating::new(1, 1, 5.0),
        Rating::new(1, 2, 4.0),
        Rating::new(1, 3, 1.0),
        Rating::new(2, 1, 4.0),
        Rating::new(2, 6, 5.0),
        Rating::new(2, 8, 4.0),
        Rating::new(3, 3, 5.0),
        Rating::new(3, 4, 5.0),
        Rating::new(3, 5, 2.0),
        Rating::new(4, 5, 5.0),
        Rating::new(4, 7, 4.0),
        Rating::new(4, 2, 2.0),
        Rating::new(5, 6, 4.0),
        Rating::new(5, 1, 5.0),
    ]
}

fn rated_by(user_id: i64, ratings: &[Rating]) -> HashSet<i64> {
    ratings
        .iter()
        .filter(|r| r.user_id == user_id)
        .map(|r| r.item_id)
        .collect()
}

#[test]
fn test_content_scenario_returns_sequel() {
    let recs = ContentEngine::new().recommend(1, &scenario_catalog(), 1);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].item_id, 2);
}

#[test]
fn test_hybrid_user_without_ratings_does_not_fail() {
    let result = recommend(
        2,
        &scenario_catalog(),
        &scenario_ratings(),
        RecommendationMethod::Hybrid,
        5,
    );
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

#[test]
fn test_unknown_method_rejected() {
    let result = "unknown".parse::<RecommendationMethod>();
    assert!(matches!(result, Err(RecommendError::InvalidMethod(_))));
}

#[test]
fn test_collaborative_disjoint_from_rated_items() {
    let catalog = movie_catalog();
    let ratings = movie_ratings();
    let engine = CollaborativeEngine::new();

    for user_id in 1..=5 {
        let rated = rated_by(user_id, &ratings);
        let recs = engine.recommend(user_id, &catalog, &ratings, 10).unwrap();

        assert!(recs.iter().all(|r| !rated.contains(&r.item_id)));
        // Every rated item appears in the catalog, so all unrated items come back
        assert_eq!(recs.len(), 8 - rated.len());
    }
}

#[test]
fn test_collaborative_top_n_bound() {
    let recs = CollaborativeEngine::new()
        .recommend(1, &movie_catalog(), &movie_ratings(), 2)
        .unwrap();
    assert_eq!(recs.len(), 2);
}

#[test]
fn test_content_never_returns_reference() {
    let catalog = movie_catalog();
    let engine = ContentEngine::new();

    for item in &catalog {
        let recs = engine.recommend(item.item_id, &catalog, catalog.len());
        assert_eq!(recs.len(), catalog.len() - 1);
        assert!(recs.iter().all(|r| r.item_id != item.item_id));
    }
}

#[test]
fn test_similarity_bounded_and_symmetric() {
    let sim = ContentEngine::new().similarity_matrix(&movie_catalog());
    let (rows, cols) = sim.dim();
    assert_eq!(rows, cols);

    for i in 0..rows {
        for j in 0..cols {
            assert!(sim[[i, j]] >= 0.0);
            assert!(sim[[i, j]] <= 1.0 + 1e-9);
            assert!((sim[[i, j]] - sim[[j, i]]).abs() < 1e-12);
        }
    }
}

#[test]
fn test_hybrid_prefers_items_found_by_both_engines() {
    let catalog = movie_catalog();
    let ratings = movie_ratings();
    let combiner = HybridCombiner::new(HybridWeights::default());

    let cf = CollaborativeEngine::new()
        .recommend(1, &catalog, &ratings, 6)
        .unwrap();
    let cb = ContentEngine::new().recommend(1, &catalog, 6);
    let fused = combiner.fuse(cf, cb);

    for pair in fused.windows(2) {
        assert!(pair[0].hybrid_score >= pair[1].hybrid_score);
    }
    let both_min = fused
        .iter()
        .filter(|c| c.cf_score == 1.0 && c.cb_score == 1.0)
        .map(|c| c.hybrid_score)
        .fold(f64::INFINITY, f64::min);
    let single_max = fused
        .iter()
        .filter(|c| c.cf_score + c.cb_score == 1.0)
        .map(|c| c.hybrid_score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(both_min >= single_max);
}

#[test]
fn test_hybrid_output_within_top_n() {
    let recs = recommend(
        1,
        &movie_catalog(),
        &movie_ratings(),
        RecommendationMethod::Hybrid,
        3,
    )
    .unwrap();
    assert_eq!(recs.len(), 3);

    let ids: HashSet<i64> = recs.iter().map(|r| r.item_id).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_idempotent_output() {
    let catalog = movie_catalog();
    let ratings = movie_ratings();

    for method in [
        RecommendationMethod::Collaborative,
        RecommendationMethod::Content,
        RecommendationMethod::Hybrid,
    ] {
        let first = recommend(4, &catalog, &ratings, method, 5).unwrap();
        let second = recommend(4, &catalog, &ratings, method, 5).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_content_method_seeds_from_favorite() {
    // User 3 rates items 3 and 4 equally; the lower id (3) is the favorite
    let recs = recommend(
        3,
        &movie_catalog(),
        &movie_ratings(),
        RecommendationMethod::Content,
        1,
    )
    .unwrap();
    assert_eq!(recs[0].item_id, 4);
}

#[test]
fn test_hybrid_unbounded_top_n_returns_every_candidate() {
    let recs = recommend(
        1,
        &movie_catalog(),
        &movie_ratings(),
        RecommendationMethod::Hybrid,
        usize::MAX,
    )
    .unwrap();

    // Items 4-8 come from both engines, items 2 and 3 only from content
    let ids: Vec<i64> = recs.iter().map(|r| r.item_id).collect();
    assert_eq!(ids, vec![4, 5, 6, 7, 8, 2, 3]);
}
