use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Timeline assumed when a profile does not state one.
pub const DEFAULT_TIMELINE_MONTHS: u32 = 24;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Constraints {
    pub time_availability_hours_per_week: f64,
    /// `f64::INFINITY` when the user did not state a budget.
    #[serde(skip_serializing_if = "is_unbounded")]
    pub financial_investment_idr: f64,
    pub timeline_months: u32,
}

fn is_unbounded(budget: &f64) -> bool {
    !budget.is_finite()
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            time_availability_hours_per_week: 0.0,
            financial_investment_idr: f64::INFINITY,
            timeline_months: DEFAULT_TIMELINE_MONTHS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    pub work_environment: BTreeSet<String>,
}

/// A user's self-reported profile. Keys are canonical skill keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    /// skill → proficiency in [0, 1]
    pub skills: BTreeMap<String, f64>,
    /// skill → years of experience
    pub experience: BTreeMap<String, f64>,
    pub constraints: Constraints,
    pub preferences: Preferences,
}

impl UserProfile {
    pub fn new(constraints: Constraints) -> Self {
        Self {
            constraints,
            ..Default::default()
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains_key(skill)
    }

    pub fn budget_idr(&self) -> f64 {
        self.constraints.financial_investment_idr
    }
}

// Fixture builders for tests across the crate.
#[cfg(test)]
impl UserProfile {
    /// Later calls for the same skill overwrite earlier ones.
    pub fn with_skill(mut self, skill: &str, level: f64) -> Self {
        self.skills.insert(skill.to_string(), level);
        self
    }

    pub fn with_environment(mut self, environment: &str) -> Self {
        self.preferences
            .work_environment
            .insert(environment.to_string());
        self
    }
}
