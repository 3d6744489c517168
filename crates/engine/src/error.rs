use actix_web::{HttpResponse, ResponseError};

pub type Result<T> = std::result::Result<T, RecommendError>;

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("User {0} not found in rating matrix")]
    UnknownUser(i64),

    #[error("Invalid method '{0}'. Choose 'collaborative', 'content', or 'hybrid'.")]
    InvalidMethod(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Decomposition error: {0}")]
    Decomposition(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for RecommendError {
    fn from(err: csv::Error) -> Self {
        RecommendError::Data(err.to_string())
    }
}

impl From<config::ConfigError> for RecommendError {
    fn from(err: config::ConfigError) -> Self {
        RecommendError::Config(err.to_string())
    }
}

impl ResponseError for RecommendError {
    fn error_response(&self) -> HttpResponse {
        match self {
            RecommendError::UnknownUser(_) => HttpResponse::NotFound().json(serde_json::json!({
                "error": "user_not_found",
                "error_description": self.to_string()
            })),
            RecommendError::InvalidMethod(_) | RecommendError::InvalidArgument(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "invalid_request",
                    "error_description": self.to_string()
                }))
            }
            _ => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "internal_error",
                "error_description": self.to_string()
            })),
        }
    }
}
