mod catalog;
mod config;
mod errors;
mod matching;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::matching::scorer::WeightedMatchScorer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load the career catalog once; an invalid catalog aborts startup
    let catalog = Arc::new(load_catalog(&config.catalog_source).await?);
    if catalog.is_empty() {
        warn!("Career catalog is empty; match requests will return no results");
    }

    // Initialize match scorer (WeightedMatchScorer with configured default weights)
    let scorer = Arc::new(WeightedMatchScorer::new(
        config.scoring.clone(),
        config.chunk_size,
    ));
    info!(
        "Match scorer initialized (numeric {:.2} / sets {:.2}, chunk size {})",
        config.scoring.numeric_weight, config.scoring.set_weight, config.chunk_size
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        catalog,
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the web frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
