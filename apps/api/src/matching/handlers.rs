//! Axum route handlers for the Match API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::profile::{UserProfile, ValidationError};
use crate::matching::scorer::{MatchResult, ScoringConfig};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub profile: UserProfile,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub weights: Option<ScoringConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub scorer_backend: String,
    pub results: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOneRequest {
    pub profile: UserProfile,
    #[serde(default)]
    pub weights: Option<ScoringConfig>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Ranks the catalog against the submitted profile and returns the best
/// `topN` careers. Careers excluded by the experience filter are omitted.
pub async fn handle_match(
    State(state): State<AppState>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let Json(request) = payload?;

    let top_n = request.top_n.unwrap_or(state.config.default_top_n);
    if top_n > state.config.max_top_n {
        return Err(ValidationError::single(
            "topN",
            format!("must be at most {}, got {top_n}", state.config.max_top_n),
        )
        .into());
    }

    let request_id = Uuid::new_v4();
    debug!("Match request {request_id}: topN={top_n}");

    let results = state
        .scorer
        .rank(request.profile, state.catalog.clone(), top_n, request.weights)
        .await?;

    info!(
        "Match request {request_id}: {} results from {} careers",
        results.len(),
        state.catalog.len()
    );

    Ok(Json(MatchResponse {
        request_id,
        generated_at: Utc::now(),
        scorer_backend: state.scorer.backend().to_string(),
        results,
    }))
}

/// POST /api/v1/match/:career_type
///
/// Scores one career. Unlike the ranked endpoint, a career excluded by the
/// experience filter is still returned, with `eligible: false` and score 0.
pub async fn handle_score_one(
    State(state): State<AppState>,
    Path(career_type): Path<String>,
    payload: Result<Json<ScoreOneRequest>, JsonRejection>,
) -> Result<Json<MatchResult>, AppError> {
    let Json(request) = payload?;

    let template = state
        .catalog
        .get(&career_type)
        .ok_or_else(|| AppError::NotFound(format!("Career '{career_type}' not found")))?;

    let result = state
        .scorer
        .score_one(&request.profile, template, request.weights)?;

    Ok(Json(result))
}
