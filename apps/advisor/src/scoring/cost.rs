//! Education cost policy shared by the scoring engine and the roadmap builder.
//!
//! `estimate_education_cost` and `AffordabilityTier::classify` are the only
//! places the cost table and the budget thresholds live.

use serde::{Deserialize, Serialize};

use crate::models::catalog::{CareerEntry, EducationRequirement};

pub const CERTIFICATION_SURCHARGE_IDR: f64 = 5_000_000.0;

/// Budget ≥ this share of cost counts as fully affordable.
pub const FULL_SHARE: f64 = 1.0;
/// Budget ≥ this share of cost is affordable with a scholarship.
pub const PARTIAL_SHARE: f64 = 0.5;
/// Budget ≥ this share of cost still earns minimal affordability points.
pub const MINIMAL_SHARE: f64 = 0.25;

/// Semesters assumed for an institution's full program.
pub const PROGRAM_SEMESTERS: f64 = 8.0;

/// Base education cost in IDR for an education path, before certification.
pub fn base_education_cost_idr(education: &EducationRequirement) -> f64 {
    match education {
        EducationRequirement::Kedinasan => 0.0,
        EducationRequirement::Doctorate => 150_000_000.0,
        EducationRequirement::LawDegree => 80_000_000.0,
        EducationRequirement::BachelorDegree => 50_000_000.0,
        EducationRequirement::AssociateDegree => 25_000_000.0,
        EducationRequirement::CulinarySchool => 30_000_000.0,
        EducationRequirement::Apprenticeship => 5_000_000.0,
        EducationRequirement::Other(_) => 10_000_000.0,
    }
}

/// Estimated cost in IDR to qualify for a career.
///
/// The certification surcharge applies to every path, so a government-funded
/// (`kedinasan`) career that requires certification is not free.
pub fn estimate_education_cost(career: &CareerEntry) -> f64 {
    let base = base_education_cost_idr(&career.education_required);
    if career.certification_required {
        base + CERTIFICATION_SURCHARGE_IDR
    } else {
        base
    }
}

/// Total cost of a full program at an institution.
pub fn program_cost(cost_per_semester: f64) -> f64 {
    cost_per_semester * PROGRAM_SEMESTERS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityTier {
    Free,
    Sufficient,
    /// Reachable with a scholarship.
    Partial,
    Insufficient,
}

impl AffordabilityTier {
    pub fn classify(budget_idr: f64, cost_idr: f64) -> Self {
        if cost_idr <= 0.0 {
            AffordabilityTier::Free
        } else if budget_idr >= cost_idr * FULL_SHARE {
            AffordabilityTier::Sufficient
        } else if budget_idr >= cost_idr * PARTIAL_SHARE {
            AffordabilityTier::Partial
        } else {
            AffordabilityTier::Insufficient
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AffordabilityTier::Free => "Free (government-funded)",
            AffordabilityTier::Sufficient => "Budget sufficient",
            AffordabilityTier::Partial => "Budget limited (scholarship needed)",
            AffordabilityTier::Insufficient => "Budget insufficient (consider alternatives)",
        }
    }
}
