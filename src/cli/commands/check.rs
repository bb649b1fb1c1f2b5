//! Check command - verify resolved paths against the disk

use crate::checker::{normalize_path, split_query, Checker, CheckerOptions, ResolvedResource};
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::Config;
use crate::error::{CaseCheckError, CaseCheckResult, CaseMismatch};
use crate::fs::TokioFs;
use crate::ui;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Serialize)]
struct CheckReport<'a> {
    root: String,
    checked: usize,
    mismatches: Vec<MismatchEntry<'a>>,
}

#[derive(Serialize)]
struct MismatchEntry<'a> {
    resource: String,
    expected: &'a str,
    actual: &'a str,
    message: String,
}

/// Execute the check command
pub async fn execute(args: CheckArgs, config: &Config) -> CaseCheckResult<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| CaseCheckError::io("getting current directory", e))?;

    let mut options = CheckerOptions::from_config(config, &cwd)?;
    if let Some(root) = &args.root {
        options = options.with_root(root, &cwd)?;
    }

    let mut paths = args.paths;
    if args.stdin {
        paths.extend(read_stdin_paths().await?);
    }

    let resources: Vec<ResolvedResource> = paths
        .iter()
        .map(|path| ResolvedResource::new(absolutize(&cwd, path)))
        .collect();

    let checker = Checker::new(options, Arc::new(TokioFs));
    checker.begin_cycle();
    let mismatches = checker.check_many(&resources).await;
    checker.end_cycle();

    match args.format {
        OutputFormat::Text => print_text(checker.root(), resources.len(), &mismatches),
        OutputFormat::Json => print_json(checker.root(), resources.len(), &mismatches)?,
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(CaseCheckError::MismatchesFound {
            count: mismatches.len(),
        })
    }
}

async fn read_stdin_paths() -> CaseCheckResult<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut paths = Vec::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| CaseCheckError::io("reading paths from stdin", e))?
    {
        let line = line.trim();
        if !line.is_empty() {
            paths.push(line.to_string());
        }
    }

    debug!("Read {} paths from stdin", paths.len());
    Ok(paths)
}

/// Resolved resources are absolute and normalized; relative arguments are
/// taken from `cwd`. A `?query` suffix is carried through untouched.
fn absolutize(cwd: &Path, path: &str) -> String {
    let (file, query) = split_query(path);
    let absolute = normalize_path(&cwd.join(file));
    format!("{}{}", absolute.to_string_lossy(), query)
}

fn print_text(root: &Path, checked: usize, mismatches: &[CaseMismatch]) {
    ui::section(&format!("Checking {} resource(s)", checked));
    ui::key_value("root", &root.display().to_string());

    if checked == 0 {
        ui::step_info("No resources to check");
        return;
    }

    for mismatch in mismatches {
        ui::step_error(&mismatch.to_string());
    }

    if mismatches.is_empty() {
        ui::step_ok("All paths match the casing on disk");
    }
}

fn print_json(root: &Path, checked: usize, mismatches: &[CaseMismatch]) -> CaseCheckResult<()> {
    let report = CheckReport {
        root: root.display().to_string(),
        checked,
        mismatches: mismatches
            .iter()
            .map(|mismatch| MismatchEntry {
                resource: mismatch.resource.display().to_string(),
                expected: &mismatch.expected,
                actual: &mismatch.actual,
                message: mismatch.to_string(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
