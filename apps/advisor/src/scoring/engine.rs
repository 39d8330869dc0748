//! Career scoring: pluggable, trait-based scorer that measures a user profile
//! against one career entry.
//!
//! Default: `RuleBasedScorer` (deterministic, no I/O, fully testable).
//! The recommender holds a `&dyn CareerScorer`, so a different backend can be
//! swapped in without touching ranking or roadmap code.

use serde::{Deserialize, Serialize};

use crate::models::catalog::{CareerEntry, EducationRequirement};
use crate::models::profile::UserProfile;
use crate::scoring::cost::{estimate_education_cost, FULL_SHARE, MINIMAL_SHARE, PARTIAL_SHARE};

// ────────────────────────────────────────────────────────────────────────────
// Weights and output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill_match: f64,
    pub affordability: f64,
    /// Bonus when the timeline fits; penalties are capped at the same magnitude.
    pub timeline: f64,
    pub environment: f64,
    /// Matched skills below this proficiency are penalized.
    pub low_proficiency_threshold: f64,
    pub low_proficiency_penalty: f64,
    /// Scales the accumulated proficiency penalty against the match ratio.
    pub penalty_scale: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_match: 60.0,
            affordability: 10.0,
            timeline: 5.0,
            environment: 10.0,
            low_proficiency_threshold: 0.5,
            low_proficiency_penalty: 0.1,
            penalty_scale: 0.2,
        }
    }
}

/// Per-component contributions plus the final 0 – 100 score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_match: f64,
    pub affordability: f64,
    pub timeline: f64,
    pub environment: f64,
    /// Clamped to [0, 100], rounded to one decimal.
    pub total: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

pub trait CareerScorer: Send + Sync {
    fn score(&self, profile: &UserProfile, career: &CareerEntry) -> ScoreBreakdown;

    /// Backend label, reported in output for transparency.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Weighted four-factor scorer.
///
/// Algorithm:
/// 1. Skill match: |required ∩ user| / |required| (1.0 when nothing is
///    required), minus `penalty_scale` × 0.1 per matched skill held below
///    the proficiency threshold; × `skill_match`
/// 2. Affordability: full weight when free or budget ≥ cost, half at ≥ 50%,
///    a fifth at ≥ 25%, otherwise nothing
/// 3. Timeline: a fixed penalty when the degree takes longer than the stated
///    timeline, otherwise the bonus
/// 4. Environment: full weight when no preference is stated or preferences
///    intersect the career's environments
#[derive(Debug, Clone)]
pub struct RuleBasedScorer {
    weights: ScoringWeights,
}

impl RuleBasedScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl CareerScorer for RuleBasedScorer {
    fn score(&self, profile: &UserProfile, career: &CareerEntry) -> ScoreBreakdown {
        compute_score(profile, career, &self.weights)
    }

    fn backend(&self) -> &'static str {
        "rule_based"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_score(
    profile: &UserProfile,
    career: &CareerEntry,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let skill_match = (skill_match_ratio(profile, career, weights) * weights.skill_match)
        .max(0.0)
        .min(weights.skill_match);

    let affordability = affordability_points(
        profile.budget_idr(),
        estimate_education_cost(career),
        weights.affordability,
    );

    let timeline = timeline_points(
        profile.constraints.timeline_months,
        &career.education_required,
        weights.timeline,
    );

    let environment = environment_points(profile, career, weights.environment);

    let total = round_one_decimal(
        (skill_match + affordability + timeline + environment).clamp(0.0, 100.0),
    );

    ScoreBreakdown {
        skill_match,
        affordability,
        timeline,
        environment,
        total,
    }
}

/// Share of required skills the user holds, after the low-proficiency penalty.
fn skill_match_ratio(profile: &UserProfile, career: &CareerEntry, weights: &ScoringWeights) -> f64 {
    if career.required_skills.is_empty() {
        return 1.0;
    }

    let matched: Vec<f64> = career
        .required_skills
        .iter()
        .filter_map(|skill| profile.skills.get(skill).copied())
        .collect();

    let ratio = matched.len() as f64 / career.required_skills.len() as f64;
    let penalty: f64 = matched
        .iter()
        .filter(|level| **level < weights.low_proficiency_threshold)
        .map(|_| weights.low_proficiency_penalty)
        .sum();

    (ratio - weights.penalty_scale * penalty).max(0.0)
}

fn affordability_points(budget_idr: f64, cost_idr: f64, weight: f64) -> f64 {
    if cost_idr <= 0.0 || budget_idr >= cost_idr * FULL_SHARE {
        weight
    } else if budget_idr >= cost_idr * PARTIAL_SHARE {
        weight * 0.5
    } else if budget_idr >= cost_idr * MINIMAL_SHARE {
        weight * 0.2
    } else {
        0.0
    }
}

/// Minimum program length in months and the penalty for a shorter timeline.
/// Education paths without an entry always earn the bonus.
fn timeline_requirement(education: &EducationRequirement) -> Option<(u32, f64)> {
    match education {
        EducationRequirement::Doctorate => Some((60, 5.0)),
        EducationRequirement::LawDegree => Some((48, 3.0)),
        EducationRequirement::BachelorDegree => Some((36, 2.0)),
        EducationRequirement::AssociateDegree => Some((24, 1.0)),
        _ => None,
    }
}

fn timeline_points(timeline_months: u32, education: &EducationRequirement, bonus: f64) -> f64 {
    match timeline_requirement(education) {
        Some((min_months, penalty)) if timeline_months < min_months => (-penalty).max(-bonus),
        _ => bonus,
    }
}

fn environment_points(profile: &UserProfile, career: &CareerEntry, weight: f64) -> f64 {
    let preferred = &profile.preferences.work_environment;
    if preferred.is_empty()
        || career
            .work_environment
            .iter()
            .any(|env| preferred.contains(env))
    {
        weight
    } else {
        0.0
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
