//! Service configuration
//!
//! Layered as defaults < `config/reelmatch.{toml,yaml,json}` < environment.
//! Environment variables use the `REELMATCH` prefix with `__` between
//! sections, e.g. `REELMATCH__ENGINE__RANK=30`.

use crate::error::{RecommendError, Result};
use crate::matrix_factorization::SvdConfig;
use crate::recommendation::HybridWeights;
use serde::{Deserialize, Serialize};

/// ReelMatch service configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Input table locations
    #[serde(default)]
    pub data: DataConfig,

    /// Recommendation engine parameters
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (default: 8000)
    pub port: u16,

    /// Worker threads
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Movie catalog CSV (movieId, title, optional description)
    pub movies_path: String,

    /// Ratings CSV (userId, movieId, rating)
    pub ratings_path: String,

    /// Optional reviews CSV (userId, movieId, review)
    pub reviews_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            movies_path: "data/movies.csv".to_string(),
            ratings_path: "data/ratings.csv".to_string(),
            reviews_path: "data/reviews.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Truncated SVD rank (default: 20)
    pub rank: usize,

    /// SVD solver iteration cap
    pub max_iterations: usize,

    /// SVD convergence and zero-singular-value threshold
    pub tolerance: f64,

    /// Collaborative weight in hybrid fusion (default: 0.5)
    pub weight_cf: f64,

    /// Content weight in hybrid fusion (default: 0.5)
    pub weight_cb: f64,

    /// List length when a request does not specify one
    pub default_top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let svd = SvdConfig::default();
        let weights = HybridWeights::default();
        Self {
            rank: svd.rank,
            max_iterations: svd.max_iterations,
            tolerance: svd.tolerance,
            weight_cf: weights.weight_cf,
            weight_cb: weights.weight_cb,
            default_top_n: crate::dispatch::DEFAULT_TOP_N,
        }
    }
}

impl EngineConfig {
    pub fn svd_config(&self) -> SvdConfig {
        SvdConfig {
            rank: self.rank,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        }
    }

    pub fn weights(&self) -> HybridWeights {
        HybridWeights::new(self.weight_cf, self.weight_cb)
    }
}

impl ServiceConfig {
    /// Load configuration from config file and environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/reelmatch").required(false))
            .add_source(config::Environment::with_prefix("REELMATCH").separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(RecommendError::Config(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.engine.rank == 0 {
            return Err(RecommendError::Config(
                "engine.rank must be greater than 0".to_string(),
            ));
        }

        if self.engine.max_iterations == 0 {
            return Err(RecommendError::Config(
                "engine.max_iterations must be greater than 0".to_string(),
            ));
        }

        if !(self.engine.tolerance.is_finite() && self.engine.tolerance > 0.0) {
            return Err(RecommendError::Config(format!(
                "engine.tolerance must be positive, got {}",
                self.engine.tolerance
            )));
        }

        if self.engine.default_top_n == 0 {
            return Err(RecommendError::Config(
                "engine.default_top_n must be greater than 0".to_string(),
            ));
        }

        self.engine
            .weights()
            .validate()
            .map_err(|e| RecommendError::Config(e.to_string()))?;

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
