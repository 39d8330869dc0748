//! Command-line and environment configuration.
//!
//! Every flag has an `ADVISOR_*` environment fallback. A `.env` file in the
//! working directory is loaded before arguments are parsed.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::recommend::DEFAULT_TOP_N;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable profile summary and roadmaps
    Text,
    /// One JSON document with recommendations and roadmaps
    Json,
}

/// Career path advisor: ranks careers against a skill profile and builds
/// learning roadmaps for the best matches.
#[derive(Parser, Debug, Clone)]
#[command(name = "advisor", version)]
pub struct Args {
    /// Profile file (`.json`, or the sectioned text format)
    #[arg(long, env = "ADVISOR_PROFILE")]
    pub profile: PathBuf,

    /// Catalog JSON overriding the built-in reference data
    #[arg(long, env = "ADVISOR_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Number of careers to recommend
    #[arg(long, env = "ADVISOR_TOP_N", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Output format
    #[arg(long, env = "ADVISOR_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub top_n: usize,
    pub format: OutputFormat,
    pub rust_log: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        // clap prints usage and exits on --help or a bad flag
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        if let Some(path) = &args.catalog {
            anyhow::ensure!(
                path.is_file(),
                "Catalog file '{}' does not exist",
                path.display()
            );
        }

        Ok(Config {
            profile_path: args.profile,
            catalog_path: args.catalog,
            top_n: args.top_n,
            format: args.format,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
