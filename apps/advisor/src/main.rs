mod catalog;
mod config;
mod errors;
mod models;
mod normalize;
mod profile;
mod recommend;
mod roadmap;
mod scoring;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::{Config, OutputFormat};
use crate::errors::AppError;
use crate::recommend::{recommend, Recommendation};
use crate::roadmap::builder::{Roadmap, RoadmapBuilder};
use crate::roadmap::render::{render_profile_summary, render_roadmap};
use crate::scoring::engine::{CareerScorer, RuleBasedScorer};

/// JSON output document.
#[derive(Debug, Serialize)]
struct Report<'a> {
    generated_at: String,
    scorer: &'static str,
    recommendations: &'a [Recommendation],
    roadmaps: &'a [Roadmap],
}

fn main() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting advisor v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(&config) {
        error!(code = err.code(), "{err}");
        return Err(err.into());
    }
    Ok(())
}

fn run(config: &Config) -> Result<(), AppError> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };

    let profile = profile::load_profile(&config.profile_path, &catalog)?;

    let scorer = RuleBasedScorer::default();
    let recommendations = recommend(&profile, catalog.careers(), &scorer, config.top_n);
    info!(
        "Recommended {} of {} careers (scorer: {})",
        recommendations.len(),
        catalog.careers().len(),
        scorer.backend()
    );

    for (rank, rec) in recommendations.iter().enumerate() {
        info!(
            rank = rank + 1,
            career = %rec.career_key,
            score = rec.score,
            missing = rec.missing_skills.len(),
            "Recommendation"
        );
    }

    let builder = RoadmapBuilder::new(&catalog);
    let roadmaps: Vec<Roadmap> = recommendations
        .iter()
        .map(|rec| builder.build(&profile, rec))
        .collect();

    match config.format {
        OutputFormat::Text => {
            print!("{}", render_profile_summary(&profile));
            if roadmaps.is_empty() {
                println!("\nNo careers in the catalog to recommend.");
            }
            for (rank, roadmap) in roadmaps.iter().enumerate() {
                print!("{}", render_roadmap(roadmap, rank + 1));
            }
        }
        OutputFormat::Json => {
            let report = Report {
                generated_at: chrono::Utc::now().to_rfc3339(),
                scorer: scorer.backend(),
                recommendations: &recommendations,
                roadmaps: &roadmaps,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
