//! Roadmap builder: turns one recommendation into a learning plan: missing
//! skills with steps and resources, cost estimate, and matching institutions.
//!
//! Every lookup has a fallback. A skill without a learning-resource entry gets
//! generic advice; an unknown institution key is skipped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::catalog::{IndustryTrend, InstitutionType};
use crate::models::profile::UserProfile;
use crate::normalize::display_name;
use crate::recommend::Recommendation;
use crate::scoring::cost::{estimate_education_cost, program_cost, AffordabilityTier};

/// Approximate USD → IDR rate used for the salary outlook.
pub const USD_TO_IDR: f64 = 15_000.0;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceSource {
    Catalog,
    Generic,
}

/// Learning plan for one missing skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillPlan {
    pub skill: String,
    pub display_name: String,
    pub steps: Vec<String>,
    pub resources: Vec<String>,
    pub source: GuidanceSource,
    /// Prerequisites from the skill graph that the user does not hold yet.
    pub missing_prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub estimated_cost_idr: f64,
    pub tier: AffordabilityTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionOption {
    pub key: String,
    pub name: String,
    pub location: String,
    pub ranking: String,
    pub website: String,
    pub institution_type: InstitutionType,
    pub cost_per_semester: f64,
    pub total_program_cost: f64,
    pub tier: AffordabilityTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerOutlook {
    pub avg_salary: f64,
    pub salary_idr_estimate: f64,
    pub growth_rate: f64,
    pub demand_score: f64,
    pub industries: Vec<String>,
    pub trends: Vec<IndustryTrend>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub career_key: String,
    pub title: String,
    pub score: f64,
    pub outlook: CareerOutlook,
    pub education_cost: CostEstimate,
    /// One plan per missing required skill, in declared order.
    pub skill_plans: Vec<SkillPlan>,
    /// Emerging skills to focus on; only populated when nothing required is missing.
    pub emerging_focus: Vec<String>,
    pub institutions: Vec<InstitutionOption>,
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

pub struct RoadmapBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> RoadmapBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn build(&self, profile: &UserProfile, recommendation: &Recommendation) -> Roadmap {
        let career = &recommendation.career;
        let budget = profile.budget_idr();

        let estimated_cost_idr = estimate_education_cost(career);
        let education_cost = CostEstimate {
            estimated_cost_idr,
            tier: AffordabilityTier::classify(budget, estimated_cost_idr),
        };

        let skill_plans: Vec<SkillPlan> = recommendation
            .missing_skills
            .iter()
            .map(|skill| self.plan_skill(profile, skill))
            .collect();

        let emerging_focus = if recommendation.missing_skills.is_empty() {
            recommendation.emerging_gaps.clone()
        } else {
            Vec::new()
        };

        Roadmap {
            career_key: career.key.clone(),
            title: display_name(&career.key),
            score: recommendation.score,
            outlook: self.outlook(recommendation),
            education_cost,
            skill_plans,
            emerging_focus,
            institutions: self.institutions(&career.institution_refs, budget),
        }
    }

    fn plan_skill(&self, profile: &UserProfile, skill: &str) -> SkillPlan {
        let name = display_name(skill);

        let (steps, resources, source) = match self.catalog.learning_resource(skill) {
            Some(entry) => (
                entry.steps.clone(),
                entry.resources.clone(),
                GuidanceSource::Catalog,
            ),
            None => {
                debug!(skill = %skill, "No learning resource entry, using generic advice");
                (generic_steps(&name), Vec::new(), GuidanceSource::Generic)
            }
        };

        let missing_prerequisites = self
            .catalog
            .skill(skill)
            .map(|node| {
                node.prerequisites
                    .iter()
                    .filter(|p| !profile.has_skill(p))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        SkillPlan {
            skill: skill.to_string(),
            display_name: name,
            steps,
            resources,
            source,
            missing_prerequisites,
        }
    }

    fn outlook(&self, recommendation: &Recommendation) -> CareerOutlook {
        let career = &recommendation.career;
        let trends = career
            .industries
            .iter()
            .filter_map(|industry| self.catalog.industry_trend(industry))
            .cloned()
            .collect();

        CareerOutlook {
            avg_salary: recommendation.salary,
            salary_idr_estimate: recommendation.salary * USD_TO_IDR,
            growth_rate: career.growth_rate,
            demand_score: career.demand_score,
            industries: career.industries.clone(),
            trends,
        }
    }

    fn institutions(&self, refs: &[String], budget: f64) -> Vec<InstitutionOption> {
        refs.iter()
            .filter_map(|key| {
                let found = self.catalog.institution(key);
                if found.is_none() {
                    debug!(institution = %key, "Unknown institution reference, skipping");
                }
                found
            })
            .map(|inst| {
                let total_program_cost = program_cost(inst.cost_per_semester);
                InstitutionOption {
                    key: inst.key.clone(),
                    name: inst.name.clone(),
                    location: inst.location.clone(),
                    ranking: inst.ranking.clone(),
                    website: inst.website.clone(),
                    institution_type: inst.institution_type,
                    cost_per_semester: inst.cost_per_semester,
                    total_program_cost,
                    tier: AffordabilityTier::classify(budget, total_program_cost),
                }
            })
            .collect()
    }
}

/// Fallback advice for a skill with no learning-resource entry.
pub fn generic_steps(display_name: &str) -> Vec<String> {
    vec![
        format!("Search for a '{display_name}' beginner course on Udemy/Coursera"),
        format!("Build a small project using {display_name}"),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Constraints;
    use crate::recommend::recommend;
    use crate::scoring::engine::RuleBasedScorer;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn make_profile(budget: f64) -> UserProfile {
        UserProfile::new(Constraints {
            time_availability_hours_per_week: 10.0,
            financial_investment_idr: budget,
            timeline_months: 48,
        })
    }

    fn recommendation_for(catalog: &Catalog, profile: &UserProfile, key: &str) -> Recommendation {
        let career = catalog.career(key).unwrap().clone();
        recommend(profile, &[career], &RuleBasedScorer::default(), 1)
            .pop()
            .unwrap()
    }

    #[test]
    fn test_missing_skills_use_catalog_resources_in_order() {
        let catalog = catalog();
        let profile = make_profile(0.0);
        let rec = recommendation_for(&catalog, &profile, "data_scientist");
        let roadmap = RoadmapBuilder::new(&catalog).build(&profile, &rec);

        let skills: Vec<_> = roadmap.skill_plans.iter().map(|p| p.skill.as_str()).collect();
        assert_eq!(skills, vec!["python", "statistics", "machine_learning"]);
        let python = &roadmap.skill_plans[0];
        assert_eq!(python.source, GuidanceSource::Catalog);
        assert_eq!(python.steps, catalog.learning_resource("python").unwrap().steps);
        assert!(roadmap.emerging_focus.is_empty());
    }

    #[test]
    fn test_skill_without_resource_gets_two_generic_steps() {
        let catalog = catalog();
        let profile = make_profile(0.0);
        let rec = recommendation_for(&catalog, &profile, "software_developer");
        let roadmap = RoadmapBuilder::new(&catalog).build(&profile, &rec);

        // "programming" has no learning-resource entry
        let programming = roadmap
            .skill_plans
            .iter()
            .find(|p| p.skill == "programming")
            .unwrap();
        assert_eq!(programming.source, GuidanceSource::Generic);
        assert_eq!(programming.steps.len(), 2);
        assert!(programming.steps[0].contains("Programming"));
        assert!(programming.steps[1].starts_with("Build a small project"));
        assert!(programming.resources.is_empty());
        assert_eq!(roadmap.skill_plans.len(), 3);
    }

    #[test]
    fn test_missing_prerequisites_from_skill_graph() {
        let catalog = catalog();
        let profile = make_profile(0.0).with_skill("logic", 0.9);
        let rec = recommendation_for(&catalog, &profile, "software_developer");
        let roadmap = RoadmapBuilder::new(&catalog).build(&profile, &rec);

        let programming = &roadmap.skill_plans[0];
        assert_eq!(programming.skill, "programming");
        assert_eq!(programming.missing_prerequisites, vec!["mathematics"]);
    }

    #[test]
    fn test_no_missing_skills_surfaces_emerging_gaps() {
        let catalog = catalog();
        let profile = make_profile(0.0)
            .with_skill("programming", 0.9)
            .with_skill("algorithms", 0.9)
            .with_skill("problem_solving", 0.9);
        let rec = recommendation_for(&catalog, &profile, "software_developer");
        let roadmap = RoadmapBuilder::new(&catalog).build(&profile, &rec);

        assert!(roadmap.skill_plans.is_empty());
        assert_eq!(roadmap.emerging_focus, vec!["cloud_computing", "ai_ml"]);
    }

    #[test]
    fn test_education_cost_tiers() {
        let catalog = catalog();
        let builder = RoadmapBuilder::new(&catalog);
        let cases = [
            (60_000_000.0, AffordabilityTier::Sufficient),
            (30_000_000.0, AffordabilityTier::Partial),
            (1_000_000.0, AffordabilityTier::Insufficient),
        ];
        for (budget, expected) in cases {
            let profile = make_profile(budget);
            let rec = recommendation_for(&catalog, &profile, "software_developer");
            let roadmap = builder.build(&profile, &rec);
            assert_eq!(roadmap.education_cost.estimated_cost_idr, 50_000_000.0);
            assert_eq!(roadmap.education_cost.tier, expected, "budget {budget}");
        }
    }

    #[test]
    fn test_free_path() {
        let catalog = catalog();
        let mut career = catalog.career("military_officer").unwrap().clone();
        career.certification_required = false;
        let profile = make_profile(0.0);
        let rec = recommend(&profile, &[career], &RuleBasedScorer::default(), 1)
            .pop()
            .unwrap();
        let roadmap = RoadmapBuilder::new(&catalog).build(&profile, &rec);
        assert_eq!(roadmap.education_cost.tier, AffordabilityTier::Free);
    }

    #[test]
    fn test_unknown_institutions_skipped_and_costs_classified() {
        let catalog = catalog();
        // chef lists four institutions; only universitas_bina_nusantara exists
        let profile = make_profile(100_000_000.0);
        let rec = recommendation_for(&catalog, &profile, "chef");
        let roadmap = RoadmapBuilder::new(&catalog).build(&profile, &rec);

        assert_eq!(roadmap.institutions.len(), 1);
        let binus = &roadmap.institutions[0];
        assert_eq!(binus.key, "universitas_bina_nusantara");
        assert_eq!(binus.total_program_cost, 160_000_000.0);
        assert_eq!(binus.tier, AffordabilityTier::Partial);
    }

    #[test]
    fn test_free_institution_tier() {
        let catalog = catalog();
        let profile = make_profile(0.0);
        let rec = recommendation_for(&catalog, &profile, "military_officer");
        let roadmap = RoadmapBuilder::new(&catalog).build(&profile, &rec);

        let akmil = roadmap
            .institutions
            .iter()
            .find(|i| i.key == "akademi_militer")
            .unwrap();
        assert_eq!(akmil.tier, AffordabilityTier::Free);
        assert_eq!(akmil.institution_type, InstitutionType::Kedinasan);
    }

    #[test]
    fn test_outlook_includes_trends_and_idr_salary() {
        let catalog = catalog();
        let profile = make_profile(0.0);
        let rec = recommendation_for(&catalog, &profile, "software_developer");
        let roadmap = RoadmapBuilder::new(&catalog).build(&profile, &rec);

        assert_eq!(roadmap.title, "Software Developer");
        assert_eq!(roadmap.outlook.salary_idr_estimate, 85_000.0 * USD_TO_IDR);
        // "tech" has a trend entry, "finance" does not
        assert_eq!(roadmap.outlook.trends.len(), 1);
        assert_eq!(roadmap.outlook.trends[0].industry, "tech");
    }

    #[test]
    fn test_generic_steps_text() {
        let steps = generic_steps("Soil Science");
        assert_eq!(steps.len(), 2);
        assert!(steps[0].contains("'Soil Science' beginner course"));
        assert_eq!(steps[1], "Build a small project using Soil Science");
    }
}
