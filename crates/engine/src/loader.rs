//! CSV loaders for the movie catalog, ratings, and reviews

use crate::config::DataConfig;
use crate::error::{RecommendError, Result};
use crate::types::{Item, Rating, Review};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<MovieRecord> for Item {
    fn from(record: MovieRecord) -> Self {
        let description = match record.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => record.title.clone(),
        };
        Item {
            item_id: record.movie_id,
            title: record.title,
            description,
        }
    }
}

/// Loaded input tables
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub movies: Vec<Item>,
    pub ratings: Vec<Rating>,
    pub reviews: Option<Vec<Review>>,
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::Reader::from_path(path)
        .map_err(|e| RecommendError::Data(format!("failed to open {}: {}", path.display(), e)))
}

/// Load the movie catalog.
///
/// Expected columns: movieId, title, description (optional). A missing or
/// blank description falls back to the title. Other columns are ignored.
pub fn load_movies(path: impl AsRef<Path>) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let mut reader = open(path)?;

    let movies = reader
        .deserialize::<MovieRecord>()
        .map(|record| record.map(Item::from))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::info!(path = %path.display(), count = movies.len(), "Loaded movies");
    Ok(movies)
}

/// Load the rating table.
///
/// Expected columns: userId, movieId, rating. A timestamp column is ignored.
pub fn load_ratings(path: impl AsRef<Path>) -> Result<Vec<Rating>> {
    let path = path.as_ref();
    let mut reader = open(path)?;

    let ratings = reader
        .deserialize::<Rating>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::info!(path = %path.display(), count = ratings.len(), "Loaded ratings");
    Ok(ratings)
}

/// Load user reviews if the file exists.
///
/// Expected columns: userId, movieId, review.
pub fn load_reviews(path: impl AsRef<Path>) -> Result<Option<Vec<Review>>> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "No reviews file, skipping");
        return Ok(None);
    }

    let mut reader = open(path)?;
    let reviews = reader
        .deserialize::<Review>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::info!(path = %path.display(), count = reviews.len(), "Loaded reviews");
    Ok(Some(reviews))
}

/// Load movies, ratings, and (optional) reviews
pub fn load_all(config: &DataConfig) -> Result<Dataset> {
    Ok(Dataset {
        movies: load_movies(&config.movies_path)?,
        ratings: load_ratings(&config.ratings_path)?,
        reviews: load_reviews(&config.reviews_path)?,
    })
}
