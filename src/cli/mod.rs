//! Command-line interface for the casecheck binary

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
