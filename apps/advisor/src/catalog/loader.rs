//! Catalog loading: reads the reference data once and validates its shape.
//!
//! JSON is decoded into permissive `Raw*` records first so a structural
//! problem can be reported against the entry that caused it, instead of as
//! an anonymous serde error.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::Catalog;
use crate::errors::AppError;
use crate::models::catalog::{
    CareerEntry, EducationRequirement, IndustryTrend, Institution, InstitutionType,
    LearningResourceEntry, SkillNode,
};
use crate::normalize::{clean_skill_name, SkillLevelTable, SkillSynonymTable};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    skill_synonyms: HashMap<String, String>,
    #[serde(default)]
    skill_levels: HashMap<String, f64>,
    #[serde(default)]
    skills: Vec<RawSkillNode>,
    careers: Vec<RawCareer>,
    #[serde(default)]
    institutions: Vec<RawInstitution>,
    #[serde(default)]
    learning_resources: Vec<RawLearningResource>,
    #[serde(default)]
    industry_trends: Vec<IndustryTrend>,
}

#[derive(Debug, Deserialize)]
struct RawSkillNode {
    key: String,
    #[serde(default)]
    related_skills: Vec<String>,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCareer {
    key: String,
    #[serde(default)]
    demand_score: Option<f64>,
    #[serde(default)]
    growth_rate: Option<f64>,
    #[serde(default)]
    avg_salary: Option<f64>,
    required_skills: Option<Vec<String>>,
    #[serde(default)]
    emerging_skills: Vec<String>,
    #[serde(default)]
    industries: Vec<String>,
    #[serde(default)]
    education_required: Option<String>,
    #[serde(default)]
    certification_required: bool,
    #[serde(default)]
    work_environment: Vec<String>,
    #[serde(default)]
    institution_refs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawInstitution {
    key: String,
    name: Option<String>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    ranking: String,
    #[serde(default)]
    website: String,
    cost_per_semester: Option<f64>,
    #[serde(rename = "type")]
    institution_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLearningResource {
    skill: String,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    resources: Vec<String>,
}

impl Catalog {
    /// The reference catalog compiled into the binary.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        info!("Loading catalog from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let catalog = validate(raw)?;

        info!(
            "Catalog loaded: {} careers, {} skills, {} institutions, {} learning resources",
            catalog.careers.len(),
            catalog.skills.len(),
            catalog.institutions.len(),
            catalog.learning_resources.len()
        );
        debug!(
            "{} skill synonyms, {} level descriptors",
            catalog.synonyms.len(),
            catalog.levels.len()
        );
        log_dangling_references(&catalog);

        Ok(catalog)
    }
}

fn validate(raw: RawCatalog) -> Result<Catalog, AppError> {
    let synonyms = validate_synonyms(raw.skill_synonyms)?;
    let levels = validate_levels(raw.skill_levels)?;

    let mut skills = HashMap::new();
    for node in raw.skills {
        let node = validate_skill(node)?;
        let key = node.key.clone();
        if skills.insert(key.clone(), node).is_some() {
            return Err(AppError::malformed("skill", key, "duplicate key"));
        }
    }

    let mut careers: Vec<CareerEntry> = Vec::with_capacity(raw.careers.len());
    let mut seen_careers = HashSet::new();
    for career in raw.careers {
        let career = validate_career(career)?;
        if !seen_careers.insert(career.key.clone()) {
            return Err(AppError::malformed("career", career.key, "duplicate key"));
        }
        careers.push(career);
    }

    let mut institutions = HashMap::new();
    for institution in raw.institutions {
        let institution = validate_institution(institution)?;
        let key = institution.key.clone();
        if institutions.insert(key.clone(), institution).is_some() {
            return Err(AppError::malformed("institution", key, "duplicate key"));
        }
    }

    let mut learning_resources = HashMap::new();
    for entry in raw.learning_resources {
        let key = entry.skill.trim().to_string();
        if key.is_empty() {
            return Err(AppError::malformed("learning_resource", key, "empty skill key"));
        }
        let entry = LearningResourceEntry {
            skill: key.clone(),
            steps: entry.steps,
            resources: entry.resources,
        };
        if learning_resources.insert(key.clone(), entry).is_some() {
            return Err(AppError::malformed("learning_resource", key, "duplicate key"));
        }
    }

    let industry_trends = raw
        .industry_trends
        .into_iter()
        .map(|trend| (trend.industry.clone(), trend))
        .collect();

    Ok(Catalog {
        synonyms,
        levels,
        skills,
        careers,
        institutions,
        learning_resources,
        industry_trends,
    })
}

fn validate_synonyms(raw: HashMap<String, String>) -> Result<SkillSynonymTable, AppError> {
    let variants: HashSet<String> = raw.keys().map(|v| clean_skill_name(v)).collect();

    for (variant, canonical) in &raw {
        if clean_skill_name(canonical) != *canonical {
            return Err(AppError::malformed(
                "skill_synonym",
                variant.clone(),
                format!("target '{canonical}' is not a canonical key"),
            ));
        }
        // A target that is itself a variant would make normalization non-idempotent
        if variants.contains(canonical) {
            return Err(AppError::malformed(
                "skill_synonym",
                variant.clone(),
                format!("target '{canonical}' is itself a synonym"),
            ));
        }
    }

    Ok(SkillSynonymTable::new(raw))
}

fn validate_levels(raw: HashMap<String, f64>) -> Result<SkillLevelTable, AppError> {
    for (descriptor, level) in &raw {
        if !(0.0..=1.0).contains(level) {
            return Err(AppError::malformed(
                "skill_level",
                descriptor.clone(),
                format!("level {level} outside [0, 1]"),
            ));
        }
    }
    Ok(SkillLevelTable::new(raw))
}

fn validate_skill(raw: RawSkillNode) -> Result<SkillNode, AppError> {
    let weight = raw.weight.unwrap_or(0.5);
    if !(0.0..=1.0).contains(&weight) {
        return Err(AppError::malformed(
            "skill",
            raw.key,
            format!("weight {weight} outside [0, 1]"),
        ));
    }
    Ok(SkillNode {
        key: raw.key,
        related_skills: dedup_ordered(raw.related_skills),
        prerequisites: dedup_ordered(raw.prerequisites),
        weight,
    })
}

fn validate_career(raw: RawCareer) -> Result<CareerEntry, AppError> {
    if raw.key.trim().is_empty() {
        return Err(AppError::malformed("career", raw.key, "empty key"));
    }

    let required_skills = raw
        .required_skills
        .ok_or_else(|| AppError::malformed("career", raw.key.clone(), "missing required_skills"))?;

    let demand_score = raw.demand_score.unwrap_or(0.0);
    if !(0.0..=1.0).contains(&demand_score) {
        return Err(AppError::malformed(
            "career",
            raw.key,
            format!("demand_score {demand_score} outside [0, 1]"),
        ));
    }

    let avg_salary = raw.avg_salary.unwrap_or(0.0);
    if !avg_salary.is_finite() || avg_salary < 0.0 {
        return Err(AppError::malformed(
            "career",
            raw.key,
            format!("avg_salary {avg_salary} must be a non-negative number"),
        ));
    }

    let education_required = raw
        .education_required
        .map(EducationRequirement::from)
        .unwrap_or_else(|| EducationRequirement::Other("unspecified".to_string()));

    Ok(CareerEntry {
        key: raw.key,
        demand_score,
        growth_rate: raw.growth_rate.unwrap_or(0.0),
        avg_salary,
        required_skills: dedup_ordered(required_skills),
        emerging_skills: dedup_ordered(raw.emerging_skills),
        industries: dedup_ordered(raw.industries),
        education_required,
        certification_required: raw.certification_required,
        work_environment: dedup_ordered(raw.work_environment),
        institution_refs: dedup_ordered(raw.institution_refs),
    })
}

fn validate_institution(raw: RawInstitution) -> Result<Institution, AppError> {
    let name = raw
        .name
        .ok_or_else(|| AppError::malformed("institution", raw.key.clone(), "missing name"))?;

    let cost_per_semester = raw.cost_per_semester.ok_or_else(|| {
        AppError::malformed("institution", raw.key.clone(), "missing cost_per_semester")
    })?;
    if !cost_per_semester.is_finite() || cost_per_semester < 0.0 {
        return Err(AppError::malformed(
            "institution",
            raw.key,
            format!("cost_per_semester {cost_per_semester} must be a non-negative number"),
        ));
    }

    let type_str = raw.institution_type.unwrap_or_default();
    let institution_type = InstitutionType::parse(&type_str).ok_or_else(|| {
        AppError::malformed(
            "institution",
            raw.key.clone(),
            format!("unknown institution type '{type_str}'"),
        )
    })?;

    Ok(Institution {
        key: raw.key,
        name,
        location: raw.location,
        strengths: raw.strengths,
        ranking: raw.ranking,
        website: raw.website,
        cost_per_semester,
        institution_type,
    })
}

/// Removes repeats, keeping the first occurrence's position.
fn dedup_ordered(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Catalog references that resolve to nothing, or that normalized user input
/// can never match.
#[derive(Debug, Default, PartialEq)]
struct ReferenceGaps {
    missing_institutions: usize,
    missing_resources: usize,
    /// Career skill references spelled as a synonym variant rather than the
    /// canonical key; these always show up as gaps.
    synonym_variant_skills: usize,
}

fn reference_gaps(catalog: &Catalog) -> ReferenceGaps {
    let missing_institutions = catalog
        .careers
        .iter()
        .flat_map(|c| c.institution_refs.iter())
        .filter(|key| !catalog.institutions.contains_key(*key))
        .count();
    let missing_resources = catalog
        .careers
        .iter()
        .flat_map(|c| c.required_skills.iter())
        .filter(|key| !catalog.learning_resources.contains_key(*key))
        .count();
    let synonym_variant_skills = catalog
        .careers
        .iter()
        .flat_map(|c| c.required_skills.iter().chain(c.emerging_skills.iter()))
        .filter(|key| catalog.synonyms.canonical(key).is_some())
        .count();

    ReferenceGaps {
        missing_institutions,
        missing_resources,
        synonym_variant_skills,
    }
}

fn log_dangling_references(catalog: &Catalog) {
    let gaps = reference_gaps(catalog);
    debug!(
        missing_institutions = gaps.missing_institutions,
        missing_resources = gaps.missing_resources,
        synonym_variant_skills = gaps.synonym_variant_skills,
        "Catalog references without a matching entry (tolerated)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(careers: &str) -> String {
        format!(r#"{{"careers": {careers}}}"#)
    }

    #[test]
    fn test_reference_gaps_count_synonym_variant_skills() {
        let json = r#"{
            "skill_synonyms": {"analytics": "data_analysis"},
            "careers": [{
                "key": "marketer",
                "required_skills": ["analytics", "seo"],
                "emerging_skills": ["data_analysis"],
                "institution_refs": ["nowhere"]
            }]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(
            reference_gaps(&catalog),
            ReferenceGaps {
                missing_institutions: 1,
                missing_resources: 2,
                synonym_variant_skills: 1,
            }
        );
    }

    #[test]
    fn test_builtin_synonym_variant_references() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(reference_gaps(&catalog).synonym_variant_skills, 7);
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.careers().len(), 22);
        assert_eq!(catalog.careers()[0].key, "software_developer");
        assert!(catalog.institution("akademi_militer").is_some());
        assert!(catalog.learning_resource("python").is_some());
        assert_eq!(catalog.levels().get("expert"), Some(0.9));
    }

    #[test]
    fn test_career_without_required_skills_is_malformed() {
        let json = minimal(r#"[{"key": "chef", "education_required": "culinary_school"}]"#);
        let err = Catalog::from_json_str(&json).unwrap_err();
        match err {
            AppError::MalformedCatalogEntry { kind, key, reason } => {
                assert_eq!(kind, "career");
                assert_eq!(key, "chef");
                assert!(reason.contains("required_skills"));
            }
            other => panic!("expected MalformedCatalogEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_career_fields_default() {
        let json = minimal(r#"[{"key": "hermit", "required_skills": []}]"#);
        let catalog = Catalog::from_json_str(&json).unwrap();
        let career = &catalog.careers()[0];
        assert!(career.required_skills.is_empty());
        assert!(career.work_environment.is_empty());
        assert!(!career.certification_required);
        assert_eq!(
            career.education_required,
            EducationRequirement::Other("unspecified".to_string())
        );
    }

    #[test]
    fn test_required_skills_deduplicated_in_declared_order() {
        let json = minimal(
            r#"[{"key": "x", "required_skills": ["b", "a", "b", "c", "a"]}]"#,
        );
        let catalog = Catalog::from_json_str(&json).unwrap();
        assert_eq!(catalog.careers()[0].required_skills, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_career_rejected() {
        let json = minimal(
            r#"[{"key": "x", "required_skills": []}, {"key": "x", "required_skills": []}]"#,
        );
        assert!(matches!(
            Catalog::from_json_str(&json),
            Err(AppError::MalformedCatalogEntry { kind: "career", .. })
        ));
    }

    #[test]
    fn test_demand_score_out_of_range_rejected() {
        let json = minimal(r#"[{"key": "x", "required_skills": [], "demand_score": 1.5}]"#);
        assert!(Catalog::from_json_str(&json).is_err());
    }

    #[test]
    fn test_unknown_institution_type_rejected() {
        let json = r#"{
            "careers": [],
            "institutions": [{"key": "u", "name": "U", "cost_per_semester": 100, "type": "private"}]
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("unknown institution type"), "got: {err}");
    }

    #[test]
    fn test_negative_institution_cost_rejected() {
        let json = r#"{
            "careers": [],
            "institutions": [{"key": "u", "name": "U", "cost_per_semester": -1, "type": "negeri"}]
        }"#;
        assert!(Catalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_chained_synonym_rejected() {
        let json = r#"{
            "careers": [],
            "skill_synonyms": {"py": "python3", "python3": "python"}
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("itself a synonym"), "got: {err}");
    }

    #[test]
    fn test_level_out_of_range_rejected() {
        let json = r#"{"careers": [], "skill_levels": {"godlike": 3.0}}"#;
        assert!(Catalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, minimal(r#"[{"key": "x", "required_skills": ["a"]}]"#)).unwrap();
        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.careers().len(), 1);
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = Catalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
    }
}
