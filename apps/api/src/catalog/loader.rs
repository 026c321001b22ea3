//! Catalog loading: reads the JSON array of career templates from disk or
//! over HTTP, decodes every record independently, and gathers all failures
//! into a single `CatalogValidationError`.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::models::CareerTemplate;
use super::Catalog;

const FETCH_TIMEOUT_SECS: u64 = 30;

/// Where the catalog asset lives.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

/// A single problem found on one catalog record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordIssue {
    pub career_type: String,
    pub message: String,
}

/// Every record that failed schema or range checks during catalog load.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{}", render_record_issues(.issues))]
pub struct CatalogValidationError {
    pub issues: Vec<RecordIssue>,
}

impl CatalogValidationError {
    pub fn push(&mut self, career_type: String, message: String) {
        self.issues.push(RecordIssue {
            career_type,
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Offending `careerType` keys in first-seen order, without repeats.
    pub fn offending_keys(&self) -> Vec<String> {
        unique_keys(&self.issues)
    }
}

fn unique_keys(issues: &[RecordIssue]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for issue in issues {
        if !keys.contains(&issue.career_type) {
            keys.push(issue.career_type.clone());
        }
    }
    keys
}

fn render_record_issues(issues: &[RecordIssue]) -> String {
    let keys = unique_keys(issues);
    let mut rendered = format!("{} invalid catalog record(s): {}", keys.len(), keys.join(", "));
    for issue in issues {
        rendered.push_str(&format!("\n  - {}: {}", issue.career_type, issue.message));
    }
    rendered
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch catalog: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Catalog is not a JSON array of records: {0}")]
    Malformed(String),

    #[error("{0}")]
    Invalid(#[from] CatalogValidationError),
}

/// Loads, decodes and validates the catalog from its configured source.
pub async fn load_catalog(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    info!("Loading career catalog from {source}");

    let bytes = match source {
        CatalogSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        CatalogSource::Url(url) => fetch_catalog(url).await?,
    };

    let templates = parse_catalog(&bytes)?;
    let catalog = Catalog::from_templates(templates, source.to_string())?;

    info!("Career catalog loaded: {} templates", catalog.len());
    Ok(catalog)
}

async fn fetch_catalog(url: &str) -> Result<Vec<u8>, CatalogError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;

    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Decodes a JSON array of career templates.
///
/// Each element is decoded on its own so that one malformed record does not
/// hide the others. Range checks run later in `Catalog::from_templates`;
/// this function only reports schema failures (missing or mistyped fields).
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<CareerTemplate>, CatalogError> {
    let raw: Value =
        serde_json::from_slice(bytes).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    let records = match raw {
        Value::Array(records) => records,
        other => {
            return Err(CatalogError::Malformed(format!(
                "expected a top-level array, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut templates = Vec::with_capacity(records.len());
    let mut issues = CatalogValidationError::default();

    for (position, record) in records.into_iter().enumerate() {
        let key = record
            .get("careerType")
            .and_then(Value::as_str)
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{position}"));

        match serde_json::from_value::<CareerTemplate>(record) {
            Ok(template) => templates.push(template),
            Err(e) => {
                warn!("Catalog record {key} failed to decode: {e}");
                issues.push(key, e.to_string());
            }
        }
    }

    if !issues.is_empty() {
        return Err(issues.into());
    }

    Ok(templates)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn record(career_type: &str, title: &str) -> Value {
        json!({
            "title": title,
            "careerType": career_type,
            "description": "Placeholder description",
            "workDataWeight": 3,
            "workPeopleWeight": 3,
            "creativityWeight": 3,
            "problemSolvingWeight": 3,
            "leadershipWeight": 3,
            "workLifeBalanceRating": 3,
            "handsOnWorkWeight": 3,
            "physicalWorkWeight": 3,
            "outdoorWorkWeight": 3,
            "mechanicalAptitudeWeight": 3,
            "stretchLevel": "safe",
            "experienceLevel": "mid",
            "requiredEducation": "bachelors",
            "preferredEducation": "bachelors",
            "requiredTechnicalSkills": ["Communication"],
            "minYearsExperience": 2,
            "maxYearsExperience": 8,
            "salaryMin": 50000,
            "salaryMax": 80000,
            "salaryRange": "$50,000 - $80,000",
            "requiresTechnical": false,
            "transitionFriendly": true,
            "skillBasedEntry": false,
            "experienceCanSubstitute": true
        })
    }

    #[test]
    fn test_parse_valid_array() {
        let bytes = serde_json::to_vec(&json!([record("a", "Alpha"), record("b", "Bravo")])).unwrap();
        let templates = parse_catalog(&bytes).unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[1].career_type, "b");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_catalog(br#"{"careerType": "a"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(msg) if msg.contains("an object")));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_catalog(b"[{").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn test_parse_lists_every_malformed_record() {
        let mut missing_weight = record("b", "Bravo");
        missing_weight
            .as_object_mut()
            .unwrap()
            .remove("creativityWeight");
        let mut missing_key = record("c", "Charlie");
        missing_key.as_object_mut().unwrap().remove("careerType");
        let mut wrong_type = record("d", "Delta");
        wrong_type["salaryMin"] = json!("lots");

        let bytes = serde_json::to_vec(&json!([
            record("a", "Alpha"),
            missing_weight,
            missing_key,
            wrong_type
        ]))
        .unwrap();

        match parse_catalog(&bytes).unwrap_err() {
            CatalogError::Invalid(err) => {
                assert_eq!(err.offending_keys(), vec!["b", "#2", "d"]);
                assert!(err.issues[0].message.contains("creativityWeight"));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_error_display_names_keys() {
        let mut err = CatalogValidationError::default();
        err.push("a".to_string(), "bad weight".to_string());
        err.push("a".to_string(), "bad salary".to_string());
        err.push("b".to_string(), "bad years".to_string());
        let rendered = err.to_string();
        assert!(rendered.starts_with("2 invalid catalog record(s): a, b"));
        assert!(rendered.contains("a: bad salary"));
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let templates = parse_catalog(include_bytes!("../../data/careers.json")).unwrap();
        let catalog = Catalog::from_templates(templates, "bundled").unwrap();
        assert!(catalog.get("data-analyst").is_some());
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let bytes = serde_json::to_vec(&json!([record("a", "Alpha")])).unwrap();
        file.write_all(&bytes).unwrap();

        let source = CatalogSource::File(file.path().to_path_buf());
        let catalog = load_catalog(&source).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("a").is_some());
        assert_eq!(catalog.source(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_load_catalog_reports_range_violations() {
        let mut bad = record("a", "Alpha");
        bad["leadershipWeight"] = json!(7);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&serde_json::to_vec(&json!([bad])).unwrap())
            .unwrap();

        let err = load_catalog(&CatalogSource::File(file.path().to_path_buf()))
            .await
            .unwrap_err();
        match err {
            CatalogError::Invalid(err) => assert_eq!(err.offending_keys(), vec!["a"]),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let source = CatalogSource::File(PathBuf::from("/definitely/not/here/careers.json"));
        let err = load_catalog(&source).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
