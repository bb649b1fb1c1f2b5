//! Terminal output helpers for the casecheck binary
//!
//! Diagnostics go to stdout; summaries and hints follow the same
//! `[TAG] message` layout so output stays grep-friendly in CI logs.

mod output;

pub use output::{key_value, section, step_error, step_info, step_ok, step_warn_hint};
