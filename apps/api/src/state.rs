use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; never mutated afterwards.
    pub catalog: Arc<Catalog>,
    /// Pluggable match scorer. Default: WeightedMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
}
