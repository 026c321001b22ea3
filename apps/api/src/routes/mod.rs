pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog_handlers;
use crate::matching::handlers as match_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/v1/careers", get(catalog_handlers::handle_list_careers))
        .route(
            "/api/v1/careers/:career_type",
            get(catalog_handlers::handle_get_career),
        )
        // Match API
        .route("/api/v1/match", post(match_handlers::handle_match))
        .route(
            "/api/v1/match/:career_type",
            post(match_handlers::handle_score_one),
        )
        .with_state(state)
}
