//! Error types for loading and validating forecast inputs
//!
//! The projection engine itself cannot fail. Everything here is raised at the
//! boundary where deals and expenses are read and checked.

use thiserror::Error;

/// Errors raised while loading or validating pipeline and ledger records
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Text that is not a `YYYY-MM`, `YYYY-MM-DD` or RFC 3339 value
    #[error("invalid month '{0}'")]
    InvalidMonth(String),

    /// A record that parsed but breaks a domain rule
    #[error("invalid {kind} '{id}': {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("unsupported input format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

impl ForecastError {
    pub fn invalid(kind: &'static str, id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            kind,
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;
