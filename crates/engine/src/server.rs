//! HTTP routes for serving recommendations

use crate::dispatch::{RecommendationMethod, Recommender};
use crate::error::RecommendError;
use crate::types::{Item, Rating};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Application state shared across all handlers
pub struct AppState {
    pub catalog: Arc<Vec<Item>>,
    pub ratings: Arc<Vec<Rating>>,
    pub recommender: Recommender,
    pub default_top_n: usize,
}

/// Query parameters for the recommendations endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// "collaborative", "content", or "hybrid" (default: "hybrid")
    #[serde(default = "default_method")]
    pub method: String,

    /// Number of recommendations (default: service setting)
    pub top_n: Option<usize>,
}

fn default_method() -> String {
    RecommendationMethod::default().to_string()
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "reelmatch-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/v1/recommendations/{user_id}
///
/// Returns a JSON array of `{"movieId", "title"}`. An empty result is a 404.
async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    params: web::Query<RecommendationQuery>,
) -> HttpResponse {
    let user_id = path.into_inner();
    let method = match params.method.parse::<RecommendationMethod>() {
        Ok(method) => method,
        Err(e) => return e.error_response(),
    };
    let top_n = params.top_n.unwrap_or(state.default_top_n);

    info!(user_id, method = %method, top_n, "Generating recommendations");

    let catalog = Arc::clone(&state.catalog);
    let ratings = Arc::clone(&state.ratings);
    let recommender = state.recommender.clone();
    let result = web::block(move || {
        recommender.recommend(user_id, &catalog, &ratings, method, top_n)
    })
    .await;

    match result {
        Ok(Ok(recs)) if recs.is_empty() => HttpResponse::NotFound().json(ErrorResponse {
            error: "No recommendations found.".to_string(),
        }),
        Ok(Ok(recs)) => HttpResponse::Ok().json(recs),
        Ok(Err(e)) => {
            if !matches!(
                e,
                RecommendError::UnknownUser(_)
                    | RecommendError::InvalidMethod(_)
                    | RecommendError::InvalidArgument(_)
            ) {
                error!(user_id, error = %e, "Failed to generate recommendations");
            }
            e.error_response()
        }
        Err(e) => {
            error!(user_id, error = %e, "Recommendation task failed");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Recommendation task failed: {}", e),
            })
        }
    }
}

/// Configure application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/api/v1").route(
            "/recommendations/{user_id}",
            web::get().to(get_recommendations),
        ),
    );
}
