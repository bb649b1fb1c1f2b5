//! Error types for casecheck
//!
//! All modules use `CaseCheckResult<T>` as their return type, except the
//! path walk itself, which only ever fails with a [`CaseMismatch`].

use std::path::PathBuf;
use thiserror::Error;

/// Stable tag prefixed to every case diagnostic so host tooling can filter them
pub const PLUGIN_NAME: &str = "CaseSensitivePathsPlugin";

/// Result type alias for casecheck operations
pub type CaseCheckResult<T> = Result<T, CaseCheckError>;

/// A path segment whose casing differs from the entry on disk
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "[{}] `{}` does not match the corresponding path on disk `{actual}`",
    PLUGIN_NAME,
    .resource.display()
)]
pub struct CaseMismatch {
    /// Resource whose resolved path contains the mis-cased segment
    pub resource: PathBuf,

    /// Segment as written in the resolved path
    pub expected: String,

    /// Real casing of the entry on disk
    pub actual: String,
}

/// All errors that can occur in casecheck
#[derive(Error, Debug)]
pub enum CaseCheckError {
    // Verification errors
    #[error(transparent)]
    CaseMismatch(#[from] CaseMismatch),

    #[error("{count} resource(s) do not match the casing on disk")]
    MismatchesFound { count: usize },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CaseCheckError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CaseMismatch(_) | Self::MismatchesFound { .. } => {
                Some("Rename the import to match the file name on disk")
            }
            Self::ConfigInvalid { .. } => Some("Run: casecheck config show"),
            Self::PathInvalid { .. } => Some("Set project.root or --root to an absolute directory"),
            _ => None,
        }
    }
}
