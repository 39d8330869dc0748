use thiserror::Error;

/// Application-level error type.
///
/// Scoring, recommendation and roadmap assembly are total functions; every
/// variant here is raised while loading catalogs or ingesting a profile.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed catalog entry ({kind} '{key}'): {reason}")]
    MalformedCatalogEntry {
        kind: &'static str,
        key: String,
        reason: String,
    },

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn malformed(kind: &'static str, key: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::MalformedCatalogEntry {
            kind,
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, printed alongside the message on failure.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MalformedCatalogEntry { .. } => "MALFORMED_CATALOG_ENTRY",
            AppError::InvalidProfile(_) => "INVALID_PROFILE",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
