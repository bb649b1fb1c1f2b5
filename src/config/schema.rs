//! Configuration schema for casecheck
//!
//! Global configuration lives at `~/.config/casecheck/config.toml`; a
//! project may carry its own `.casecheck.toml`.

use crate::checker::filter::{DEPENDENCY_DIR, INLINE_ASSET_KIND};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project settings
    pub project: ProjectConfig,

    /// Verification settings
    pub check: CheckConfig,
}

/// Project settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project root; nothing at or above it is inspected.
    /// Defaults to the current working directory.
    pub root: Option<PathBuf>,
}

/// Verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Directory names holding third-party code, skipped entirely
    pub dependency_dirs: Vec<String>,

    /// Resource kinds with no file on disk (inlined assets)
    pub inline_kinds: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            dependency_dirs: vec![DEPENDENCY_DIR.to_string()],
            inline_kinds: vec![INLINE_ASSET_KIND.to_string()],
        }
    }
}
