//! ReelMatch Recommendation Engine
//!
//! Movie recommendations from two signal sources: collaborative filtering
//! over the user-item rating matrix (truncated SVD) and content-based
//! similarity over item descriptions (TF-IDF cosine). A hybrid mode fuses
//! both candidate lists.
//!
//! Every call recomputes the decomposition and similarity matrix from the
//! tables it is given; nothing is cached between calls.

pub mod collaborative;
pub mod config;
pub mod content_based;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod matrix_factorization;
pub mod rating_matrix;
pub mod recommendation;
pub mod server;
pub mod text;
pub mod types;

// Re-export key types
pub use collaborative::CollaborativeEngine;
pub use config::{DataConfig, EngineConfig, ServerConfig, ServiceConfig};
pub use content_based::ContentEngine;
pub use dispatch::{recommend, RecommendationMethod, Recommender, DEFAULT_TOP_N};
pub use error::{RecommendError, Result};
pub use loader::{load_all, load_movies, load_ratings, load_reviews, Dataset};
pub use matrix_factorization::{LatentFactors, SvdConfig, TruncatedSvd};
pub use rating_matrix::RatingMatrix;
pub use recommendation::{HybridCandidate, HybridCombiner, HybridWeights};
pub use text::{cosine_similarity_matrix, TfidfVectorizer};
pub use types::*;
