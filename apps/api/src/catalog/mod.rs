// Career catalog: static CareerTemplate records, loaded and validated once at
// start-up, then shared read-only behind an Arc for the life of the process.

pub mod handlers;
pub mod loader;
pub mod models;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

pub use loader::{load_catalog, CatalogSource, CatalogValidationError};
use models::CareerTemplate;

/// Immutable, indexed catalog of career templates.
///
/// Templates keep their load order; `index` maps `careerType` to position.
#[derive(Debug)]
pub struct Catalog {
    templates: Vec<CareerTemplate>,
    index: HashMap<String, usize>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Validates ranges and key uniqueness, then builds the lookup index.
    /// Every offending record is reported, not only the first.
    pub fn from_templates(
        templates: Vec<CareerTemplate>,
        source: impl Into<String>,
    ) -> Result<Self, CatalogValidationError> {
        let mut issues = CatalogValidationError::default();
        let mut index = HashMap::with_capacity(templates.len());
        let mut seen_titles: HashMap<String, &str> = HashMap::with_capacity(templates.len());

        for (position, template) in templates.iter().enumerate() {
            for violation in template.range_violations() {
                issues.push(record_key(template, position), violation);
            }

            if index
                .insert(template.career_type.clone(), position)
                .is_some()
            {
                issues.push(
                    record_key(template, position),
                    format!("duplicate careerType '{}'", template.career_type),
                );
            }

            if let Some(first) = seen_titles.insert(template.title.clone(), &template.career_type)
            {
                issues.push(
                    record_key(template, position),
                    format!("duplicate title '{}' (also used by '{first}')", template.title),
                );
            }
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        Ok(Self {
            templates,
            index,
            source: source.into(),
            loaded_at: Utc::now(),
        })
    }

    pub fn get(&self, career_type: &str) -> Option<&CareerTemplate> {
        self.index.get(career_type).map(|&i| &self.templates[i])
    }

    pub fn templates(&self) -> &[CareerTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn record_key(template: &CareerTemplate, position: usize) -> String {
    if template.career_type.trim().is_empty() {
        format!("#{position}")
    } else {
        template.career_type.clone()
    }
}
