//! ReelMatch Service - Movie Recommendations over HTTP
//!
//! Default port: 8000

use actix_web::{web, App, HttpServer};
use reelmatch_engine::{load_all, server, Recommender, ServiceConfig};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServiceConfig::load()?;
    let bind_addr = config.bind_address();

    // Load data once at startup
    let dataset = load_all(&config.data)?;
    let catalog = Arc::new(dataset.movies);
    let ratings = Arc::new(dataset.ratings);
    let recommender = Recommender::new(config.engine.svd_config(), config.engine.weights());
    let default_top_n = config.engine.default_top_n;

    info!("Starting ReelMatch Service on {}", bind_addr);

    let app_state = web::Data::new(server::AppState {
        catalog,
        ratings,
        recommender,
        default_top_n,
    });

    let mut http_server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(server::configure_routes)
            .wrap(actix_web::middleware::Logger::default())
    });
    if let Some(workers) = config.server.workers {
        http_server = http_server.workers(workers);
    }

    http_server.bind(&bind_addr)?.run().await?;

    Ok(())
}
