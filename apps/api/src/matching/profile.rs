use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::models::{Dimension, DIMENSION_MAX, DIMENSION_MIN};

const MAX_YEARS_EXPERIENCE: u32 = 60;

/// Self-assessed 1–5 ratings, one per catalog dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRatings {
    pub work_data: i32,
    pub work_people: i32,
    pub creativity: i32,
    pub problem_solving: i32,
    pub leadership: i32,
    pub work_life_balance: i32,
    pub hands_on_work: i32,
    pub physical_work: i32,
    pub outdoor_work: i32,
    pub mechanical_aptitude: i32,
}

impl DimensionRatings {
    /// Every dimension set to the same rating.
    pub fn uniform(value: i32) -> Self {
        Self {
            work_data: value,
            work_people: value,
            creativity: value,
            problem_solving: value,
            leadership: value,
            work_life_balance: value,
            hands_on_work: value,
            physical_work: value,
            outdoor_work: value,
            mechanical_aptitude: value,
        }
    }

    pub fn get(&self, dimension: Dimension) -> i32 {
        match dimension {
            Dimension::WorkData => self.work_data,
            Dimension::WorkPeople => self.work_people,
            Dimension::Creativity => self.creativity,
            Dimension::ProblemSolving => self.problem_solving,
            Dimension::Leadership => self.leadership,
            Dimension::WorkLifeBalance => self.work_life_balance,
            Dimension::HandsOnWork => self.hands_on_work,
            Dimension::PhysicalWork => self.physical_work,
            Dimension::OutdoorWork => self.outdoor_work,
            Dimension::MechanicalAptitude => self.mechanical_aptitude,
        }
    }
}

/// The query side of a match: a user's ratings and preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub ratings: DimensionRatings,
    pub years_experience: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub remote_preference: Option<String>,
}

/// A single field that failed validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Range or shape violations on caller-supplied input.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::default();
        err.push(field, message);
        err
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Ok when no issues were collected.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn render_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl UserProfile {
    /// Checks every rating is on the 1–5 scale and list entries are non-blank.
    /// Collects all issues rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::default();

        for dimension in Dimension::ALL {
            let value = self.ratings.get(dimension);
            if !(DIMENSION_MIN..=DIMENSION_MAX).contains(&value) {
                err.push(
                    format!("profile.ratings.{}", dimension.key()),
                    format!("must be between {DIMENSION_MIN} and {DIMENSION_MAX}, got {value}"),
                );
            }
        }

        if self.years_experience > MAX_YEARS_EXPERIENCE {
            err.push(
                "profile.yearsExperience",
                format!(
                    "must be at most {MAX_YEARS_EXPERIENCE}, got {}",
                    self.years_experience
                ),
            );
        }

        for (name, values) in [
            ("skills", &self.skills),
            ("interests", &self.interests),
            ("industries", &self.industries),
        ] {
            for (i, value) in values.iter().enumerate() {
                if value.trim().is_empty() {
                    err.push(format!("profile.{name}[{i}]"), "must not be blank");
                }
            }
        }

        err.into_result()
    }
}
