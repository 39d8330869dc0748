//! Plain-text rendering of the profile summary and roadmaps for the console.

use std::fmt::Write;

use crate::models::profile::UserProfile;
use crate::normalize::display_name;
use crate::roadmap::builder::{GuidanceSource, Roadmap};

const RULE_WIDTH: usize = 70;

/// Formats an IDR amount with `.` thousands separators: `Rp 5.000.000`.
pub fn format_idr(amount: f64) -> String {
    if !amount.is_finite() {
        return "unlimited".to_string();
    }
    let rounded = amount.round().abs() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{sign}Rp {grouped}")
}

pub fn render_profile_summary(profile: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out, "YOUR PROFILE SUMMARY");
    let _ = writeln!(out, "{}", "=".repeat(50));

    let _ = writeln!(out, "\nSkills ({}):", profile.skills.len());
    for (skill, level) in &profile.skills {
        let _ = writeln!(out, "   - {}: {:.1}", display_name(skill), level);
    }

    if !profile.experience.is_empty() {
        let _ = writeln!(out, "\nExperience:");
        for (skill, years) in &profile.experience {
            let _ = writeln!(out, "   - {}: {} years", display_name(skill), years);
        }
    }

    let _ = writeln!(
        out,
        "\nConstraints: Budget {}, Timeline {} months, {} hours/week",
        format_idr(profile.constraints.financial_investment_idr),
        profile.constraints.timeline_months,
        profile.constraints.time_availability_hours_per_week
    );

    if !profile.preferences.work_environment.is_empty() {
        let envs: Vec<&str> = profile
            .preferences
            .work_environment
            .iter()
            .map(String::as_str)
            .collect();
        let _ = writeln!(out, "Preferred environments: {}", envs.join(", "));
    }

    out
}

pub fn render_roadmap(roadmap: &Roadmap, rank: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n#{rank} ROADMAP TO: {} (Match: {:.1}%)",
        roadmap.title, roadmap.score
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    let outlook = &roadmap.outlook;
    let _ = writeln!(
        out,
        "OUTLOOK: Salary {}/year | Growth {:.1}% | Demand {:.2}",
        format_idr(outlook.salary_idr_estimate),
        outlook.growth_rate * 100.0,
        outlook.demand_score
    );
    for trend in &outlook.trends {
        let _ = writeln!(
            out,
            "   {} trend: {} ({})",
            display_name(&trend.industry),
            trend.trend,
            trend.hot_topics.join(", ")
        );
    }

    let _ = writeln!(
        out,
        "ESTIMATED COST: {} - {}",
        format_idr(roadmap.education_cost.estimated_cost_idr),
        roadmap.education_cost.tier.label()
    );

    if roadmap.skill_plans.is_empty() {
        let _ = writeln!(out, "\nYou have all the core required skills!");
        if !roadmap.emerging_focus.is_empty() {
            let emerging: Vec<String> = roadmap
                .emerging_focus
                .iter()
                .map(|s| display_name(s))
                .collect();
            let _ = writeln!(out, "Focus on emerging skills: {}", emerging.join(", "));
        }
    } else {
        let _ = writeln!(
            out,
            "\nDETAILED ACTION PLAN ({} Skills to Learn):",
            roadmap.skill_plans.len()
        );
        for (i, plan) in roadmap.skill_plans.iter().enumerate() {
            let _ = writeln!(out, "\n   [{}] SKILL: {}", skill_letter(i), plan.display_name);
            if !plan.missing_prerequisites.is_empty() {
                let prereqs: Vec<String> = plan
                    .missing_prerequisites
                    .iter()
                    .map(|p| display_name(p))
                    .collect();
                let _ = writeln!(out, "       Prerequisites: {}", prereqs.join(", "));
            }
            let heading = match plan.source {
                GuidanceSource::Catalog => "Steps to Master:",
                GuidanceSource::Generic => "General Advice:",
            };
            let _ = writeln!(out, "       {heading}");
            for (n, step) in plan.steps.iter().enumerate() {
                let _ = writeln!(out, "          {}. {}", n + 1, step);
            }
            if !plan.resources.is_empty() {
                let _ = writeln!(out, "       Recommended Resources:");
                for resource in &plan.resources {
                    let _ = writeln!(out, "          - {resource}");
                }
            }
        }
    }

    if !roadmap.institutions.is_empty() {
        let _ = writeln!(out, "\nRECOMMENDED INSTITUTIONS:");
        for (i, inst) in roadmap.institutions.iter().enumerate() {
            let _ = writeln!(
                out,
                "   {}. {} ({})",
                i + 1,
                inst.name,
                inst.institution_type.label()
            );
            let _ = writeln!(out, "      {} | {}", inst.location, inst.ranking);
            let _ = writeln!(
                out,
                "      {}/semester - {}",
                format_idr(inst.cost_per_semester),
                inst.tier.label()
            );
            let _ = writeln!(out, "      {}", inst.website);
        }
    }

    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    out
}

/// A, B, C … then AA, AB … for long plans.
fn skill_letter(index: usize) -> String {
    let mut n = index;
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}
