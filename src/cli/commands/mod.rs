//! CLI command implementations

pub mod check;
pub mod config;

pub use check::execute as check;
pub use config::execute as config;
