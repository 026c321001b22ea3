//! Match Scoring: weighted numeric + set similarity between a user profile
//! and each career template, with an experience hard filter applied first.
//!
//! Default backend: `WeightedMatchScorer` (pure Rust, deterministic).
//! `AppState` holds an `Arc<dyn MatchScorer>`, built at startup from config.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::models::{CareerTemplate, Dimension};
use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::matching::explain::{
    exclusion_reason, overlap_reasons, preference_notes, DimensionFit, SetKind,
};
use crate::matching::profile::{UserProfile, ValidationError};
use crate::matching::similarity::{
    dimension_closeness, jaccard, normalized_set, numeric_similarity, Overlap,
};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Relative emphasis of the numeric and set components.
/// Weights need not sum to 1; the combined score divides by their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub numeric_weight: f64,
    pub set_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            numeric_weight: 0.6,
            set_weight: 0.4,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::default();
        for (field, value) in [
            ("weights.numericWeight", self.numeric_weight),
            ("weights.setWeight", self.set_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                err.push(field, format!("must be a non-negative number, got {value}"));
            }
        }
        if err.is_empty() && self.numeric_weight + self.set_weight <= 0.0 {
            err.push("weights", "numericWeight and setWeight must not both be zero");
        }
        err.into_result()
    }

    /// Weighted average of the two components, clamped to [0, 1].
    pub fn combine(&self, numeric: f64, sets: f64) -> f64 {
        let total = self.numeric_weight + self.set_weight;
        ((self.numeric_weight * numeric + self.set_weight * sets) / total).clamp(0.0, 1.0)
    }
}

/// One scored career, ready for the response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub career_type: String,
    pub title: String,
    pub score: f64, // 0.0 – 1.0
    /// False when the experience hard filter excluded this career.
    pub eligible: bool,
    pub matched_dimensions: BTreeMap<String, f64>,
    pub explanations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap scoring backends without
/// touching handlers. Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Ranks the whole catalog; `weights` overrides the backend defaults.
    async fn rank(
        &self,
        profile: UserProfile,
        catalog: Arc<Catalog>,
        top_n: usize,
        weights: Option<ScoringConfig>,
    ) -> Result<Vec<MatchResult>, AppError>;

    /// Scores a single template, including hard-filtered ones.
    fn score_one(
        &self,
        profile: &UserProfile,
        template: &CareerTemplate,
        weights: Option<ScoringConfig>,
    ) -> Result<MatchResult, AppError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedMatchScorer (default implementation)
// ────────────────────────────────────────────────────────────────────────────

pub struct WeightedMatchScorer {
    defaults: ScoringConfig,
    chunk_size: usize,
}

impl WeightedMatchScorer {
    pub fn new(defaults: ScoringConfig, chunk_size: usize) -> Self {
        Self {
            defaults,
            chunk_size: chunk_size.max(1),
        }
    }
}

#[async_trait]
impl MatchScorer for WeightedMatchScorer {
    async fn rank(
        &self,
        profile: UserProfile,
        catalog: Arc<Catalog>,
        top_n: usize,
        weights: Option<ScoringConfig>,
    ) -> Result<Vec<MatchResult>, AppError> {
        let config = weights.unwrap_or_else(|| self.defaults.clone());
        rank_all_parallel(Arc::new(profile), catalog, top_n, config, self.chunk_size).await
    }

    fn score_one(
        &self,
        profile: &UserProfile,
        template: &CareerTemplate,
        weights: Option<ScoringConfig>,
    ) -> Result<MatchResult, AppError> {
        let config = weights.unwrap_or_else(|| self.defaults.clone());
        Ok(score(profile, template, &config)?)
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores one template against a profile.
///
/// Algorithm:
/// 1. Validate profile, template and weights (1–5 scale, non-negative weights)
/// 2. Hard filter: too few years and no substitution → score 0, `eligible = false`
/// 3. numeric = 1 - rms(|user - template|) / 4 over the ten dimensions
/// 4. sets = mean Jaccard of skills, interests, industries (empty/empty = 1)
/// 5. score = weighted average of numeric and sets
pub fn score(
    profile: &UserProfile,
    template: &CareerTemplate,
    config: &ScoringConfig,
) -> Result<MatchResult, ValidationError> {
    config.validate()?;
    profile.validate()?;
    validate_template(template)?;
    Ok(score_validated(profile, template, config))
}

/// True when the template may appear in ranked output for this profile.
pub fn passes_hard_filter(profile: &UserProfile, template: &CareerTemplate) -> bool {
    template.experience_can_substitute
        || i64::from(profile.years_experience) >= i64::from(template.min_years_experience)
}

fn validate_template(template: &CareerTemplate) -> Result<(), ValidationError> {
    let mut err = ValidationError::default();
    for violation in template.range_violations() {
        err.push(format!("template.{}", template.career_type), violation);
    }
    err.into_result()
}

fn score_validated(
    profile: &UserProfile,
    template: &CareerTemplate,
    config: &ScoringConfig,
) -> MatchResult {
    if !passes_hard_filter(profile, template) {
        return MatchResult {
            career_type: template.career_type.clone(),
            title: template.title.clone(),
            score: 0.0,
            eligible: false,
            matched_dimensions: BTreeMap::new(),
            explanations: vec![exclusion_reason(profile, template)],
        };
    }

    let fits: Vec<DimensionFit> = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let user = profile.ratings.get(dimension);
            let wanted = template.dimension(dimension);
            DimensionFit {
                dimension,
                user,
                template: wanted,
                closeness: dimension_closeness(user, wanted),
            }
        })
        .collect();

    let pairs: Vec<(i32, i32)> = fits.iter().map(|f| (f.user, f.template)).collect();
    let numeric = numeric_similarity(&pairs);

    let sets: Vec<(SetKind, Overlap)> = SetKind::ALL
        .iter()
        .map(|&kind| (kind, set_overlap(kind, profile, template)))
        .collect();
    let set_similarity = sets.iter().map(|(_, o)| o.jaccard).sum::<f64>() / sets.len() as f64;

    let mut matched_dimensions: BTreeMap<String, f64> = fits
        .iter()
        .map(|f| (f.dimension.key().to_string(), f.closeness))
        .collect();
    for (kind, overlap) in &sets {
        matched_dimensions.insert(kind.key().to_string(), overlap.jaccard);
    }

    let mut explanations = overlap_reasons(&sets, &fits);
    explanations.extend(preference_notes(profile, template));

    MatchResult {
        career_type: template.career_type.clone(),
        title: template.title.clone(),
        score: config.combine(numeric, set_similarity),
        eligible: true,
        matched_dimensions,
        explanations,
    }
}

fn set_overlap(kind: SetKind, profile: &UserProfile, template: &CareerTemplate) -> Overlap {
    match kind {
        SetKind::Skills => jaccard(
            &normalized_set(&profile.skills),
            &normalized_set(&template.required_technical_skills),
        ),
        SetKind::Interests => jaccard(
            &normalized_set(&profile.interests),
            &normalized_set(&template.preferred_interests),
        ),
        SetKind::Industries => jaccard(
            &normalized_set(&profile.industries),
            &normalized_set(&template.preferred_industries),
        ),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

/// Score descending, then title ascending; careerType settles anything left.
fn rank_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.career_type.cmp(&b.career_type))
}

/// Scores every template that passes the hard filter and returns the best
/// `top_n`. Pure: neither input is modified.
pub fn rank_all(
    profile: &UserProfile,
    templates: &[CareerTemplate],
    top_n: usize,
    config: &ScoringConfig,
) -> Result<Vec<MatchResult>, ValidationError> {
    config.validate()?;
    profile.validate()?;

    let mut results = Vec::with_capacity(templates.len());
    for template in templates {
        validate_template(template)?;
        if passes_hard_filter(profile, template) {
            results.push(score_validated(profile, template, config));
        }
    }

    results.sort_by(rank_order);
    results.truncate(top_n);
    Ok(results)
}

/// Map-reduce variant of `rank_all` for large catalogs.
///
/// Each chunk is ranked on the blocking pool and truncated to `top_n`; the
/// merged partials are re-sorted with the same ordering, so the output is
/// identical to `rank_all` over the whole catalog.
pub async fn rank_all_parallel(
    profile: Arc<UserProfile>,
    catalog: Arc<Catalog>,
    top_n: usize,
    config: ScoringConfig,
    chunk_size: usize,
) -> Result<Vec<MatchResult>, AppError> {
    config.validate()?;
    profile.validate()?;

    let chunk_size = chunk_size.max(1);
    let total = catalog.len();

    if total <= chunk_size {
        return Ok(rank_all(&profile, catalog.templates(), top_n, &config)?);
    }

    let mut handles = Vec::with_capacity(total.div_ceil(chunk_size));
    for start in (0..total).step_by(chunk_size) {
        let end = (start + chunk_size).min(total);
        let profile = Arc::clone(&profile);
        let catalog = Arc::clone(&catalog);
        let config = config.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            rank_all(&profile, &catalog.templates()[start..end], top_n, &config)
        }));
    }

    debug!(
        "Scoring {total} templates across {} chunks of {chunk_size}",
        handles.len()
    );

    let mut merged = Vec::new();
    for handle in handles {
        let partial = handle
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("scoring task failed: {e}")))??;
        merged.extend(partial);
    }

    merged.sort_by(rank_order);
    merged.truncate(top_n);
    Ok(merged)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
