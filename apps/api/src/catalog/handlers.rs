//! Axum route handlers for the Catalog API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::catalog::models::{CareerSummary, CareerTemplate};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerListResponse {
    pub total: usize,
    pub careers: Vec<CareerSummary>,
}

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<CareerListResponse> {
    let careers: Vec<CareerSummary> = state
        .catalog
        .templates()
        .iter()
        .map(CareerSummary::from)
        .collect();

    Json(CareerListResponse {
        total: careers.len(),
        careers,
    })
}

/// GET /api/v1/careers/:career_type
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(career_type): Path<String>,
) -> Result<Json<CareerTemplate>, AppError> {
    state
        .catalog
        .get(&career_type)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Career '{career_type}' not found")))
}
