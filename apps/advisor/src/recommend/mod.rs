//! Recommender: scores every career in the catalog and returns the top N,
//! each with its skill gaps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::catalog::CareerEntry;
use crate::models::profile::UserProfile;
use crate::scoring::engine::{CareerScorer, ScoreBreakdown};

pub const DEFAULT_TOP_N: usize = 3;

/// One ranked career. Position in the returned list is the rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub career_key: String,
    pub score: f64,
    pub salary: f64,
    /// Required skills the user lacks, in declared order.
    pub missing_skills: Vec<String>,
    /// Emerging skills the user lacks, in declared order.
    pub emerging_gaps: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub career: CareerEntry,
}

/// Scores all careers and returns exactly `min(top_n, careers.len())` of them.
///
/// Sorting is stable: equal scores keep catalog order. Zero-scored careers are
/// never filtered out.
pub fn recommend(
    profile: &UserProfile,
    careers: &[CareerEntry],
    scorer: &dyn CareerScorer,
    top_n: usize,
) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = careers
        .iter()
        .map(|career| {
            let breakdown = scorer.score(profile, career);
            debug!(
                career = %career.key,
                total = breakdown.total,
                skill_match = breakdown.skill_match,
                affordability = breakdown.affordability,
                timeline = breakdown.timeline,
                environment = breakdown.environment,
                "Scored career"
            );
            Recommendation {
                career_key: career.key.clone(),
                score: breakdown.total,
                salary: career.avg_salary,
                missing_skills: skill_gaps(profile, &career.required_skills),
                emerging_gaps: skill_gaps(profile, &career.emerging_skills),
                breakdown,
                career: career.clone(),
            }
        })
        .collect();

    // Highest score first
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

fn skill_gaps(profile: &UserProfile, skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .filter(|skill| !profile.has_skill(skill))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::catalog::EducationRequirement;
    use crate::models::profile::Constraints;
    use crate::scoring::engine::RuleBasedScorer;

    fn make_career(key: &str, required: &[&str], emerging: &[&str]) -> CareerEntry {
        CareerEntry {
            key: key.to_string(),
            demand_score: 0.8,
            growth_rate: 0.1,
            avg_salary: 60_000.0,
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            emerging_skills: emerging.iter().map(|s| s.to_string()).collect(),
            industries: vec![],
            education_required: EducationRequirement::BachelorDegree,
            certification_required: false,
            work_environment: vec!["office".to_string()],
            institution_refs: vec![],
        }
    }

    fn make_profile() -> UserProfile {
        UserProfile::new(Constraints {
            time_availability_hours_per_week: 10.0,
            financial_investment_idr: 5_000_000.0,
            timeline_months: 24,
        })
    }

    #[test]
    fn test_returns_top_n_sorted() {
        let careers = vec![
            make_career("a", &["x", "y"], &[]),
            make_career("b", &["x"], &[]),
            make_career("c", &["z"], &[]),
            make_career("d", &["x", "z"], &[]),
        ];
        let profile = make_profile().with_skill("x", 0.9);
        let recs = recommend(&profile, &careers, &RuleBasedScorer::default(), 2);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].career_key, "b");
        assert!(recs[0].score >= recs[1].score);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let careers = vec![
            make_career("first", &["q"], &[]),
            make_career("second", &["r"], &[]),
            make_career("third", &["s"], &[]),
        ];
        let recs = recommend(&make_profile(), &careers, &RuleBasedScorer::default(), 3);
        let keys: Vec<_> = recs.iter().map(|r| r.career_key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_small_catalog_returns_all_including_zero_scores() {
        let careers = vec![make_career("only", &["q"], &[])];
        let recs = recommend(&make_profile(), &careers, &RuleBasedScorer::default(), 3);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_gaps_follow_declared_order() {
        let careers = vec![make_career("a", &["c3", "a1", "b2"], &["e2", "e1"])];
        let profile = make_profile().with_skill("a1", 0.8).with_skill("e1", 0.8);
        let recs = recommend(&profile, &careers, &RuleBasedScorer::default(), 1);
        assert_eq!(recs[0].missing_skills, vec!["c3", "b2"]);
        assert_eq!(recs[0].emerging_gaps, vec!["e2"]);
        assert_eq!(recs[0].salary, 60_000.0);
    }

    #[test]
    fn test_builtin_catalog_properties() {
        let catalog = Catalog::builtin().unwrap();
        let scorer = RuleBasedScorer::default();
        let profiles = vec![
            make_profile(),
            make_profile()
                .with_skill("programming", 0.2)
                .with_skill("legal_research", 0.9)
                .with_environment("office"),
            UserProfile::default().with_environment("farm"),
        ];

        for profile in &profiles {
            for top_n in [0, 1, 3, 50] {
                let recs = recommend(profile, catalog.careers(), &scorer, top_n);
                assert_eq!(recs.len(), top_n.min(catalog.careers().len()));
                for pair in recs.windows(2) {
                    assert!(pair[0].score >= pair[1].score, "not sorted");
                }
                for rec in &recs {
                    assert!((0.0..=100.0).contains(&rec.score));
                    assert!(((rec.score * 10.0).round() - rec.score * 10.0).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let catalog = Catalog::builtin().unwrap();
        let profile = make_profile()
            .with_skill("python", 0.9)
            .with_skill("statistics", 0.6);
        let scorer = RuleBasedScorer::default();

        let first = recommend(&profile, catalog.careers(), &scorer, 5);
        let second = recommend(&profile, catalog.careers(), &scorer, 5);
        let keys = |recs: &[Recommendation]| {
            recs.iter()
                .map(|r| (r.career_key.clone(), r.score))
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(&first), keys(&second));
    }
}
