//! Human-readable reasons attached to each match result.

use crate::catalog::models::{CareerTemplate, Dimension};
use crate::matching::profile::UserProfile;
use crate::matching::similarity::Overlap;

/// At most this many overlap-based reasons are emitted per result.
pub const MAX_OVERLAP_REASONS: usize = 3;
const MAX_LISTED_ITEMS: usize = 3;
/// Numeric dimensions below this closeness are never cited as a reason.
const MIN_CITED_CLOSENESS: f64 = 0.75;

/// Which profile/template set pair an overlap came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    Skills,
    Interests,
    Industries,
}

impl SetKind {
    pub const ALL: [SetKind; 3] = [SetKind::Skills, SetKind::Interests, SetKind::Industries];

    pub fn key(&self) -> &'static str {
        match self {
            SetKind::Skills => "skills",
            SetKind::Interests => "interests",
            SetKind::Industries => "industries",
        }
    }
}

/// Closeness of one numeric dimension, with both raw ratings for display.
#[derive(Debug, Clone, Copy)]
pub struct DimensionFit {
    pub dimension: Dimension,
    pub user: i32,
    pub template: i32,
    pub closeness: f64,
}

/// Picks the strongest overlaps: shared set items first (by Jaccard), then
/// the closest numeric dimensions.
pub fn overlap_reasons(sets: &[(SetKind, Overlap)], dimensions: &[DimensionFit]) -> Vec<String> {
    let mut with_shared: Vec<&(SetKind, Overlap)> =
        sets.iter().filter(|(_, o)| !o.shared.is_empty()).collect();
    with_shared.sort_by(|a, b| b.1.jaccard.total_cmp(&a.1.jaccard));

    let mut reasons: Vec<String> = with_shared
        .into_iter()
        .take(MAX_OVERLAP_REASONS)
        .map(|(kind, overlap)| describe_overlap(*kind, &overlap.shared))
        .collect();

    if reasons.len() < MAX_OVERLAP_REASONS {
        let mut close: Vec<&DimensionFit> = dimensions
            .iter()
            .filter(|d| d.closeness >= MIN_CITED_CLOSENESS)
            .collect();
        // Closest first; among equals, prefer what the user rated highest.
        close.sort_by(|a, b| {
            b.closeness
                .total_cmp(&a.closeness)
                .then(b.user.cmp(&a.user))
                .then(a.dimension.cmp(&b.dimension))
        });

        let remaining = MAX_OVERLAP_REASONS - reasons.len();
        reasons.extend(close.into_iter().take(remaining).map(describe_dimension));
    }

    reasons
}

fn describe_overlap(kind: SetKind, shared: &[String]) -> String {
    let listed = list_items(shared);
    match kind {
        SetKind::Skills => format!("has required skills: {listed}"),
        SetKind::Interests => format!("shares interest in {listed}"),
        SetKind::Industries => format!("interested in the {listed} industry"),
    }
}

fn describe_dimension(fit: &DimensionFit) -> String {
    if fit.user == fit.template {
        format!("exact match on {} ({}/5)", fit.dimension.label(), fit.user)
    } else {
        format!(
            "close match on {} (you {}/5, career {}/5)",
            fit.dimension.label(),
            fit.user,
            fit.template
        )
    }
}

fn list_items(items: &[String]) -> String {
    let mut listed = items
        .iter()
        .take(MAX_LISTED_ITEMS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > MAX_LISTED_ITEMS {
        listed.push_str(&format!(" and {} more", items.len() - MAX_LISTED_ITEMS));
    }
    listed
}

/// Notes derived from categorical preferences. These never affect the score.
pub fn preference_notes(profile: &UserProfile, template: &CareerTemplate) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(level) = profile.experience_level.as_deref() {
        if !level.trim().is_empty() && same_label(level, &template.experience_level) {
            notes.push(format!(
                "matches your target {} experience level",
                template.experience_level
            ));
        }
    }

    if let (Some(have), Some(need)) = (
        profile.education.as_deref().and_then(education_rank),
        education_rank(&template.required_education),
    ) {
        if have >= need {
            notes.push(format!(
                "meets the {} education requirement",
                template.required_education
            ));
        } else if !template.alternative_qualifications.is_empty() {
            notes.push(format!(
                "accepts alternative qualifications in place of {} education",
                template.required_education
            ));
        } else {
            notes.push(format!("requires {} education", template.required_education));
        }
    }

    if let Some(remote) = profile.remote_preference.as_deref() {
        if !remote.trim().is_empty() && same_label(remote, &template.remote_options) {
            notes.push(format!("offers your preferred {} arrangement", template.remote_options));
        }
    }

    let min_years = template.min_years_experience.max(0) as u32;
    if profile.years_experience < min_years && template.experience_can_substitute {
        notes.push(format!(
            "{}+ years usually expected, but relevant experience can substitute",
            template.min_years_experience
        ));
    }

    notes
}

/// Reason attached to a result removed by the experience hard filter.
pub fn exclusion_reason(profile: &UserProfile, template: &CareerTemplate) -> String {
    format!(
        "requires at least {} years of experience (you have {})",
        template.min_years_experience, profile.years_experience
    )
}

fn same_label(a: &str, b: &str) -> bool {
    normalize_label(a) == normalize_label(b)
}

fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace('\'', "")
        .replace([' ', '-'], "_")
}

/// Ordinal for known education levels; unknown labels are not compared.
fn education_rank(value: &str) -> Option<u8> {
    match normalize_label(value).as_str() {
        "none" => Some(0),
        "high_school" | "highschool" | "ged" => Some(1),
        "certificate" | "vocational" | "trade_school" => Some(2),
        "associates" | "associate" => Some(3),
        "bachelors" | "bachelor" => Some(4),
        "masters" | "master" => Some(5),
        "doctorate" | "phd" | "doctoral" => Some(6),
        _ => None,
    }
}
