//! Read-only reference data: skill graph, careers, institutions, learning
//! resources, industry trends, and the normalization tables.
//!
//! Built once at startup (see `loader`) and shared by reference afterwards.
//! Nothing mutates a `Catalog` after construction.

pub mod loader;

use std::collections::HashMap;

use crate::models::catalog::{
    CareerEntry, IndustryTrend, Institution, LearningResourceEntry, SkillNode,
};
use crate::normalize::{SkillLevelTable, SkillSynonymTable};

#[derive(Debug, Clone)]
pub struct Catalog {
    synonyms: SkillSynonymTable,
    levels: SkillLevelTable,
    skills: HashMap<String, SkillNode>,
    /// Catalog order is the ranking tie-break.
    careers: Vec<CareerEntry>,
    institutions: HashMap<String, Institution>,
    learning_resources: HashMap<String, LearningResourceEntry>,
    industry_trends: HashMap<String, IndustryTrend>,
}

impl Catalog {
    pub fn synonyms(&self) -> &SkillSynonymTable {
        &self.synonyms
    }

    pub fn levels(&self) -> &SkillLevelTable {
        &self.levels
    }

    pub fn careers(&self) -> &[CareerEntry] {
        &self.careers
    }

    #[cfg(test)]
    pub fn career(&self, key: &str) -> Option<&CareerEntry> {
        self.careers.iter().find(|c| c.key == key)
    }

    pub fn skill(&self, key: &str) -> Option<&SkillNode> {
        self.skills.get(key)
    }

    pub fn institution(&self, key: &str) -> Option<&Institution> {
        self.institutions.get(key)
    }

    pub fn learning_resource(&self, skill: &str) -> Option<&LearningResourceEntry> {
        self.learning_resources.get(skill)
    }

    pub fn industry_trend(&self, industry: &str) -> Option<&IndustryTrend> {
        self.industry_trends.get(industry)
    }
}
