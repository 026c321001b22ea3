use serde::{Deserialize, Serialize};

/// Lower bound of every 1–5 dimension scale.
pub const DIMENSION_MIN: i32 = 1;
/// Upper bound of every 1–5 dimension scale.
pub const DIMENSION_MAX: i32 = 5;

/// The ten numeric dimensions shared by career templates and user profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    WorkData,
    WorkPeople,
    Creativity,
    ProblemSolving,
    Leadership,
    WorkLifeBalance,
    HandsOnWork,
    PhysicalWork,
    OutdoorWork,
    MechanicalAptitude,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::WorkData,
        Dimension::WorkPeople,
        Dimension::Creativity,
        Dimension::ProblemSolving,
        Dimension::Leadership,
        Dimension::WorkLifeBalance,
        Dimension::HandsOnWork,
        Dimension::PhysicalWork,
        Dimension::OutdoorWork,
        Dimension::MechanicalAptitude,
    ];

    /// Key used in `matchedDimensions` and profile validation messages.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::WorkData => "workData",
            Dimension::WorkPeople => "workPeople",
            Dimension::Creativity => "creativity",
            Dimension::ProblemSolving => "problemSolving",
            Dimension::Leadership => "leadership",
            Dimension::WorkLifeBalance => "workLifeBalance",
            Dimension::HandsOnWork => "handsOnWork",
            Dimension::PhysicalWork => "physicalWork",
            Dimension::OutdoorWork => "outdoorWork",
            Dimension::MechanicalAptitude => "mechanicalAptitude",
        }
    }

    /// Name of the matching field on a catalog record.
    pub fn template_field(&self) -> &'static str {
        match self {
            Dimension::WorkData => "workDataWeight",
            Dimension::WorkPeople => "workPeopleWeight",
            Dimension::Creativity => "creativityWeight",
            Dimension::ProblemSolving => "problemSolvingWeight",
            Dimension::Leadership => "leadershipWeight",
            Dimension::WorkLifeBalance => "workLifeBalanceRating",
            Dimension::HandsOnWork => "handsOnWorkWeight",
            Dimension::PhysicalWork => "physicalWorkWeight",
            Dimension::OutdoorWork => "outdoorWorkWeight",
            Dimension::MechanicalAptitude => "mechanicalAptitudeWeight",
        }
    }

    /// Human-readable label for explanations.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::WorkData => "working with data",
            Dimension::WorkPeople => "working with people",
            Dimension::Creativity => "creativity",
            Dimension::ProblemSolving => "problem solving",
            Dimension::Leadership => "leadership",
            Dimension::WorkLifeBalance => "work-life balance",
            Dimension::HandsOnWork => "hands-on work",
            Dimension::PhysicalWork => "physical work",
            Dimension::OutdoorWork => "outdoor work",
            Dimension::MechanicalAptitude => "mechanical aptitude",
        }
    }
}

/// One career archetype from the static catalog.
///
/// Numeric weights, experience/salary bounds and boolean flags have no serde
/// default: a record missing any of them fails to load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareerTemplate {
    pub title: String,
    pub career_type: String,

    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub day_in_life: String,
    #[serde(default)]
    pub learning_path: String,

    pub work_data_weight: i32,
    pub work_people_weight: i32,
    pub creativity_weight: i32,
    pub problem_solving_weight: i32,
    pub leadership_weight: i32,
    pub work_life_balance_rating: i32,
    pub hands_on_work_weight: i32,
    pub physical_work_weight: i32,
    pub outdoor_work_weight: i32,
    pub mechanical_aptitude_weight: i32,

    #[serde(default)]
    pub stretch_level: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub required_education: String,
    #[serde(default)]
    pub preferred_education: String,
    #[serde(default)]
    pub remote_options: String,
    #[serde(default)]
    pub location_flexibility: String,
    #[serde(default)]
    pub age_preference: Option<String>,

    #[serde(default)]
    pub required_technical_skills: Vec<String>,
    #[serde(default)]
    pub required_soft_skills: Vec<String>,
    #[serde(default)]
    pub preferred_interests: Vec<String>,
    #[serde(default)]
    pub preferred_industries: Vec<String>,
    #[serde(default)]
    pub work_environments: Vec<String>,
    #[serde(default)]
    pub valued_certifications: Vec<String>,
    #[serde(default)]
    pub required_certifications: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub valued_companies: Vec<String>,
    #[serde(default)]
    pub resume_keywords: Vec<String>,
    #[serde(default)]
    pub related_job_titles: Vec<String>,
    #[serde(default)]
    pub preferred_industry_experience: Vec<String>,
    #[serde(default)]
    pub career_progression_patterns: Vec<String>,
    #[serde(default)]
    pub alternative_qualifications: Vec<String>,

    pub min_years_experience: i32,
    pub max_years_experience: i32,
    pub salary_min: i64,
    pub salary_max: i64,
    #[serde(default)]
    pub salary_range: Option<String>,

    pub requires_technical: bool,
    pub transition_friendly: bool,
    pub skill_based_entry: bool,
    pub experience_can_substitute: bool,
}

impl CareerTemplate {
    pub fn dimension(&self, dimension: Dimension) -> i32 {
        match dimension {
            Dimension::WorkData => self.work_data_weight,
            Dimension::WorkPeople => self.work_people_weight,
            Dimension::Creativity => self.creativity_weight,
            Dimension::ProblemSolving => self.problem_solving_weight,
            Dimension::Leadership => self.leadership_weight,
            Dimension::WorkLifeBalance => self.work_life_balance_rating,
            Dimension::HandsOnWork => self.hands_on_work_weight,
            Dimension::PhysicalWork => self.physical_work_weight,
            Dimension::OutdoorWork => self.outdoor_work_weight,
            Dimension::MechanicalAptitude => self.mechanical_aptitude_weight,
        }
    }

    /// Returns every range/shape violation on this record, empty when valid.
    pub fn range_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.career_type.trim().is_empty() {
            violations.push("careerType must not be blank".to_string());
        }
        if self.title.trim().is_empty() {
            violations.push("title must not be blank".to_string());
        }

        for dimension in Dimension::ALL {
            let value = self.dimension(dimension);
            if !(DIMENSION_MIN..=DIMENSION_MAX).contains(&value) {
                violations.push(format!(
                    "{} must be between {DIMENSION_MIN} and {DIMENSION_MAX}, got {value}",
                    dimension.template_field()
                ));
            }
        }

        if self.min_years_experience < 0 {
            violations.push(format!(
                "minYearsExperience must not be negative, got {}",
                self.min_years_experience
            ));
        }
        if self.min_years_experience > self.max_years_experience {
            violations.push(format!(
                "minYearsExperience ({}) exceeds maxYearsExperience ({})",
                self.min_years_experience, self.max_years_experience
            ));
        }
        if self.salary_min < 0 {
            violations.push(format!("salaryMin must not be negative, got {}", self.salary_min));
        }
        if self.salary_min > self.salary_max {
            violations.push(format!(
                "salaryMin ({}) exceeds salaryMax ({})",
                self.salary_min, self.salary_max
            ));
        }

        violations
    }
}

/// Compact listing shape for `GET /api/v1/careers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    pub career_type: String,
    pub title: String,
    pub experience_level: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub transition_friendly: bool,
}

impl From<&CareerTemplate> for CareerSummary {
    fn from(template: &CareerTemplate) -> Self {
        Self {
            career_type: template.career_type.clone(),
            title: template.title.clone(),
            experience_level: template.experience_level.clone(),
            salary_min: template.salary_min,
            salary_max: template.salary_max,
            transition_friendly: template.transition_friendly,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::template;
    use super::*;

    #[test]
    fn test_valid_template_has_no_violations() {
        assert!(template("analyst", "Analyst").range_violations().is_empty());
    }

    #[test]
    fn test_weight_out_of_range_is_reported_by_field_name() {
        let mut t = template("analyst", "Analyst");
        t.creativity_weight = 6;
        t.work_life_balance_rating = 0;
        let violations = t.range_violations();
        assert_eq!(violations.len(), 2);
        assert!(violations[0].contains("creativityWeight"));
        assert!(violations[1].contains("workLifeBalanceRating"));
    }

    #[test]
    fn test_inverted_ranges_are_reported() {
        let mut t = template("analyst", "Analyst");
        t.min_years_experience = 8;
        t.max_years_experience = 2;
        t.salary_min = 100_000;
        t.salary_max = 10_000;
        let violations = t.range_violations();
        assert!(violations.iter().any(|v| v.contains("minYearsExperience (8)")));
        assert!(violations.iter().any(|v| v.contains("salaryMin (100000)")));
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = serde_json::json!({
            "title": "Data Analyst",
            "careerType": "data-analyst",
            "workDataWeight": 5,
            "workPeopleWeight": 2,
            "creativityWeight": 3,
            "problemSolvingWeight": 4,
            "leadershipWeight": 2,
            "workLifeBalanceRating": 4,
            "handsOnWorkWeight": 1,
            "physicalWorkWeight": 1,
            "outdoorWorkWeight": 1,
            "mechanicalAptitudeWeight": 1,
            "requiredTechnicalSkills": ["SQL", "Python"],
            "minYearsExperience": 1,
            "maxYearsExperience": 5,
            "salaryMin": 60000,
            "salaryMax": 95000,
            "requiresTechnical": true,
            "transitionFriendly": true,
            "skillBasedEntry": true,
            "experienceCanSubstitute": false
        });
        let t: CareerTemplate = serde_json::from_value(json).unwrap();
        assert_eq!(t.career_type, "data-analyst");
        assert_eq!(t.dimension(Dimension::WorkData), 5);
        assert_eq!(t.required_technical_skills.len(), 2);
        assert!(t.required_soft_skills.is_empty());
        assert!(t.preferred_interests.is_empty());
    }

    #[test]
    fn test_missing_numeric_weight_fails_to_deserialize() {
        let json = serde_json::json!({
            "title": "Data Analyst",
            "careerType": "data-analyst",
            "minYearsExperience": 1,
            "maxYearsExperience": 5,
            "salaryMin": 60000,
            "salaryMax": 95000,
            "requiresTechnical": true,
            "transitionFriendly": true,
            "skillBasedEntry": true,
            "experienceCanSubstitute": false
        });
        let err = serde_json::from_value::<CareerTemplate>(json).unwrap_err();
        assert!(err.to_string().contains("workDataWeight"));
    }

    #[test]
    fn test_dimension_keys_are_unique() {
        let mut keys: Vec<_> = Dimension::ALL.iter().map(|d| d.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Dimension::ALL.len());
    }
}
