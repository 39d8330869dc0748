//! Skill normalization: maps free-text skill names and level descriptors to
//! canonical keys and proficiencies.
//!
//! Both functions are total: unknown names become their own key, unknown
//! level descriptors fall back to `DEFAULT_SKILL_LEVEL`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Proficiency assigned to an unrecognized level descriptor.
pub const DEFAULT_SKILL_LEVEL: f64 = 0.5;

/// Many-to-one map from a cleaned variant to its canonical skill key.
#[derive(Debug, Clone, Default)]
pub struct SkillSynonymTable {
    synonyms: HashMap<String, String>,
}

impl SkillSynonymTable {
    /// Keys are cleaned on insert so lookups match `clean_skill_name` output.
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let synonyms = entries
            .into_iter()
            .map(|(variant, canonical)| (clean_skill_name(&variant), canonical))
            .collect();
        Self { synonyms }
    }

    pub fn canonical(&self, cleaned: &str) -> Option<&str> {
        self.synonyms.get(cleaned).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }
}

/// Text descriptor → proficiency in [0, 1].
#[derive(Debug, Clone, Default)]
pub struct SkillLevelTable {
    levels: HashMap<String, f64>,
}

impl SkillLevelTable {
    pub fn new(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        let levels = entries
            .into_iter()
            .map(|(descriptor, level)| (descriptor.trim().to_lowercase(), level))
            .collect();
        Self { levels }
    }

    pub fn get(&self, descriptor: &str) -> Option<f64> {
        self.levels.get(descriptor).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }
}

/// A raw level as supplied by the input collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelInput {
    Numeric(f64),
    Text(String),
}

impl LevelInput {
    /// Interprets a single input token; numeric tokens become numeric levels.
    pub fn from_token(token: &str) -> Self {
        match token.trim().parse::<f64>() {
            Ok(value) => LevelInput::Numeric(value),
            Err(_) => LevelInput::Text(token.to_string()),
        }
    }
}

/// Lower-cases, trims, and joins internal whitespace runs with `_`.
pub fn clean_skill_name(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

pub fn normalize_skill_name(raw: &str, synonyms: &SkillSynonymTable) -> String {
    let cleaned = clean_skill_name(raw);
    match synonyms.canonical(&cleaned) {
        Some(canonical) => canonical.to_string(),
        None => cleaned,
    }
}

pub fn normalize_skill_level(raw: &LevelInput, levels: &SkillLevelTable) -> f64 {
    match raw {
        LevelInput::Numeric(value) if value.is_nan() => DEFAULT_SKILL_LEVEL,
        LevelInput::Numeric(value) => value.clamp(0.0, 1.0),
        LevelInput::Text(text) => levels
            .get(&text.trim().to_lowercase())
            .unwrap_or(DEFAULT_SKILL_LEVEL),
    }
}

/// Title-cases a canonical key for display: `patient_care` → `Patient Care`.
pub fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
