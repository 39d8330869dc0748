use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::profile::{Constraints, UserProfile};
use crate::normalize::{
    clean_skill_name, normalize_skill_level, normalize_skill_name, LevelInput,
};

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub skills: Vec<SkillInput>,
    #[serde(default)]
    pub experience: Vec<ExperienceInput>,
    #[serde(default)]
    pub constraints: ConstraintsInput,
    #[serde(default)]
    pub preferences: PreferencesInput,
}

#[derive(Debug, Deserialize)]
pub struct SkillInput {
    pub name: String,
    pub level: LevelInput,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceInput {
    pub skill: String,
    pub years: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConstraintsInput {
    pub hours_per_week: Option<f64>,
    pub budget_idr: Option<f64>,
    pub timeline_months: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreferencesInput {
    #[serde(default)]
    pub work_environment: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Skills,
    Experience,
    Constraints,
    Preferences,
}

/// Loads a profile file: `.json` as a `ProfileRequest`, anything else as the
/// sectioned text format.
pub fn load_profile(path: &Path, catalog: &Catalog) -> Result<UserProfile, AppError> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let profile = if is_json {
        let request: ProfileRequest = serde_json::from_str(&text)?;
        build_profile(request, catalog)?
    } else {
        parse_profile_text(&text, catalog)?
    };

    info!(
        "Profile loaded from {}: {} skills, {} environment preferences",
        path.display(),
        profile.skills.len(),
        profile.preferences.work_environment.len()
    );
    Ok(profile)
}

/// Normalizes a raw request into a `UserProfile`. Duplicate skills resolve
/// last-write-wins.
pub fn build_profile(request: ProfileRequest, catalog: &Catalog) -> Result<UserProfile, AppError> {
    let constraints = build_constraints(&request.constraints)?;
    let mut profile = UserProfile::new(constraints);

    for skill in &request.skills {
        let key = normalize_skill_name(&skill.name, catalog.synonyms());
        if key.is_empty() {
            return Err(AppError::InvalidProfile("skill name is empty".to_string()));
        }
        let level = normalize_skill_level(&skill.level, catalog.levels());
        profile.skills.insert(key, level);
    }

    for entry in &request.experience {
        let key = normalize_skill_name(&entry.skill, catalog.synonyms());
        let years = non_negative("years of experience", entry.years)?;
        profile.experience.insert(key, years);
    }

    for env in &request.preferences.work_environment {
        let env = clean_skill_name(env);
        if !env.is_empty() {
            profile.preferences.work_environment.insert(env);
        }
    }

    Ok(profile)
}

fn build_constraints(input: &ConstraintsInput) -> Result<Constraints, AppError> {
    let mut constraints = Constraints::default();
    if let Some(hours) = input.hours_per_week {
        constraints.time_availability_hours_per_week = non_negative("hours_per_week", hours)?;
    }
    if let Some(budget) = input.budget_idr {
        constraints.financial_investment_idr = non_negative("budget_idr", budget)?;
    }
    if let Some(months) = input.timeline_months {
        constraints.timeline_months = months;
    }
    Ok(constraints)
}

fn non_negative(field: &str, value: f64) -> Result<f64, AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::InvalidProfile(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

/// Parses the sectioned text format:
///
/// ```text
/// [skills]
/// python advanced
/// data science 0.7
/// [experience]
/// python 2
/// [constraints]
/// hours_per_week = 10
/// budget_idr = 5.000.000
/// timeline_months = 24
/// [preferences]
/// remote
/// ```
pub fn parse_profile_text(text: &str, catalog: &Catalog) -> Result<UserProfile, AppError> {
    let mut request = ProfileRequest {
        skills: Vec::new(),
        experience: Vec::new(),
        constraints: ConstraintsInput::default(),
        preferences: PreferencesInput::default(),
    };
    let mut section = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(parse_section(name, line_no)?);
            continue;
        }

        match section {
            Some(Section::Skills) => {
                let (name, level) = split_last_token(line, line_no)?;
                request.skills.push(SkillInput {
                    name: name.to_string(),
                    level: LevelInput::from_token(level),
                });
            }
            Some(Section::Experience) => {
                let (skill, years) = split_last_token(line, line_no)?;
                let years = years.parse::<f64>().map_err(|_| {
                    AppError::InvalidProfile(format!(
                        "line {line_no}: '{years}' is not a number of years"
                    ))
                })?;
                request.experience.push(ExperienceInput {
                    skill: skill.to_string(),
                    years,
                });
            }
            Some(Section::Constraints) => {
                parse_constraint_line(line, line_no, &mut request.constraints)?
            }
            Some(Section::Preferences) => request
                .preferences
                .work_environment
                .push(line.to_string()),
            None => {
                return Err(AppError::InvalidProfile(format!(
                    "line {line_no}: content before any [section] header"
                )))
            }
        }
    }

    build_profile(request, catalog)
}

/// A `#` starts a comment at the beginning of a line or after whitespace, so
/// skill names such as `c#` survive.
fn strip_comment(raw_line: &str) -> &str {
    let line = raw_line.trim();
    if line.starts_with('#') {
        return "";
    }
    let mut prev_is_space = false;
    for (idx, ch) in line.char_indices() {
        if ch == '#' && prev_is_space {
            return line[..idx].trim_end();
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}

fn parse_section(name: &str, line_no: usize) -> Result<Section, AppError> {
    match name.trim().to_lowercase().as_str() {
        "skills" => Ok(Section::Skills),
        "experience" => Ok(Section::Experience),
        "constraints" => Ok(Section::Constraints),
        "preferences" => Ok(Section::Preferences),
        other => Err(AppError::InvalidProfile(format!(
            "line {line_no}: unknown section '{other}'"
        ))),
    }
}

/// Splits `"data science advanced"` into `("data science", "advanced")`.
fn split_last_token(line: &str, line_no: usize) -> Result<(&str, &str), AppError> {
    match line.rsplit_once(char::is_whitespace) {
        Some((head, last)) if !head.trim().is_empty() && !last.is_empty() => {
            Ok((head.trim(), last))
        }
        _ => Err(AppError::InvalidProfile(format!(
            "line {line_no}: expected '<skill> <value>', got '{line}'"
        ))),
    }
}

fn parse_constraint_line(
    line: &str,
    line_no: usize,
    constraints: &mut ConstraintsInput,
) -> Result<(), AppError> {
    let (key, value) = line.split_once('=').ok_or_else(|| {
        AppError::InvalidProfile(format!("line {line_no}: expected 'key = value'"))
    })?;
    let value = value.trim();

    match key.trim().to_lowercase().as_str() {
        "hours_per_week" | "hours" => {
            constraints.hours_per_week = Some(parse_number(value, line_no)?);
        }
        "budget_idr" | "budget" => {
            constraints.budget_idr = Some(parse_amount(value, line_no)?);
        }
        "timeline_months" | "timeline" => {
            let months = value.parse::<u32>().map_err(|_| {
                AppError::InvalidProfile(format!(
                    "line {line_no}: timeline must be a whole number of months"
                ))
            })?;
            constraints.timeline_months = Some(months);
        }
        other => {
            return Err(AppError::InvalidProfile(format!(
                "line {line_no}: unknown constraint '{other}'"
            )))
        }
    }
    Ok(())
}

fn parse_number(value: &str, line_no: usize) -> Result<f64, AppError> {
    value
        .parse::<f64>()
        .map_err(|_| AppError::InvalidProfile(format!("line {line_no}: '{value}' is not a number")))
}

/// Rupiah amounts are written with `.` or `,` thousands separators.
fn parse_amount(value: &str, line_no: usize) -> Result<f64, AppError> {
    let digits: String = value.chars().filter(|c| *c != '.' && *c != ',').collect();
    parse_number(&digits, line_no)
}
