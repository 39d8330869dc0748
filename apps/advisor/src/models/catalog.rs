use serde::{Deserialize, Serialize};

/// Education path a career requires. Drives both the cost estimate and the
/// timeline check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationRequirement {
    BachelorDegree,
    AssociateDegree,
    LawDegree,
    Doctorate,
    Apprenticeship,
    CulinarySchool,
    Kedinasan,
    Other(String),
}

impl EducationRequirement {
    pub fn as_str(&self) -> &str {
        match self {
            EducationRequirement::BachelorDegree => "bachelor_degree",
            EducationRequirement::AssociateDegree => "associate_degree",
            EducationRequirement::LawDegree => "law_degree",
            EducationRequirement::Doctorate => "doctorate",
            EducationRequirement::Apprenticeship => "apprenticeship",
            EducationRequirement::CulinarySchool => "culinary_school",
            EducationRequirement::Kedinasan => "kedinasan",
            EducationRequirement::Other(other) => other,
        }
    }
}

impl From<String> for EducationRequirement {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "bachelor_degree" => EducationRequirement::BachelorDegree,
            "associate_degree" => EducationRequirement::AssociateDegree,
            "law_degree" => EducationRequirement::LawDegree,
            "doctorate" => EducationRequirement::Doctorate,
            "apprenticeship" => EducationRequirement::Apprenticeship,
            "culinary_school" => EducationRequirement::CulinarySchool,
            "kedinasan" => EducationRequirement::Kedinasan,
            _ => EducationRequirement::Other(value),
        }
    }
}

impl From<EducationRequirement> for String {
    fn from(value: EducationRequirement) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionType {
    Negeri,
    Swasta,
    Kedinasan,
}

impl InstitutionType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "negeri" => Some(InstitutionType::Negeri),
            "swasta" => Some(InstitutionType::Swasta),
            "kedinasan" => Some(InstitutionType::Kedinasan),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstitutionType::Negeri => "Negeri",
            InstitutionType::Swasta => "Swasta",
            InstitutionType::Kedinasan => "Kedinasan",
        }
    }
}

/// A node of the skill relationship graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillNode {
    pub key: String,
    pub related_skills: Vec<String>,
    pub prerequisites: Vec<String>,
    /// Relative importance, 0.0 – 1.0
    pub weight: f64,
}

/// A career profile from the market catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerEntry {
    pub key: String,
    pub demand_score: f64,
    pub growth_rate: f64,
    /// Average yearly salary in the catalog's source currency (USD).
    pub avg_salary: f64,
    /// Ordered, de-duplicated. Declaration order is the roadmap order.
    pub required_skills: Vec<String>,
    pub emerging_skills: Vec<String>,
    pub industries: Vec<String>,
    pub education_required: EducationRequirement,
    pub certification_required: bool,
    pub work_environment: Vec<String>,
    pub institution_refs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub key: String,
    pub name: String,
    pub location: String,
    pub strengths: Vec<String>,
    pub ranking: String,
    pub website: String,
    pub cost_per_semester: f64,
    pub institution_type: InstitutionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResourceEntry {
    pub skill: String,
    pub steps: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryTrend {
    pub industry: String,
    /// "up" | "stable" | "down"
    pub trend: String,
    pub hot_topics: Vec<String>,
}
