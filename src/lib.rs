//! casecheck - Case-sensitive path verification for build pipelines
//!
//! On case-insensitive filesystems a build can resolve `Foo.js` when the
//! file on disk is `foo.js`. The [`Checker`] walks every resolved path up
//! to the project root and reports segments whose casing differs from the
//! directory entry.

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod ui;

pub use checker::{Checker, CheckerOptions, ResolvedResource};
pub use error::{CaseCheckError, CaseCheckResult, CaseMismatch, PLUGIN_NAME};
pub use fs::{DirectoryReader, MemoryFs, TokioFs};
