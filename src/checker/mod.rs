//! Case-sensitivity verification for resolved resources
//!
//! A [`Checker`] lives for the whole host process and is driven through
//! build cycles by the host:
//!
//! 1. `begin_cycle()` when a build starts
//! 2. `on_resolved()` for every resource the build resolves
//! 3. `end_cycle()` once every check of the build has been reported
//!
//! Directory listings are cached for the length of one cycle only, since
//! files may be renamed between incremental rebuilds.
//!
//! The host must not call `end_cycle()` or `reset()` while a check is still
//! in flight; the checker does not enforce this.

pub mod filter;
pub mod listing;
pub mod walker;

pub use filter::{normalize_path, normalize_resource, split_query, CheckFilter};
pub use listing::{CacheStats, DirectoryCache, Listing};
pub use walker::{ancestry_levels, AncestryLevel};

use crate::config::Config;
use crate::error::{CaseCheckError, CaseCheckResult, CaseMismatch};
use crate::fs::DirectoryReader;
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Settings a [`Checker`] is built from
#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Absolute project root
    pub root: PathBuf,

    /// Directory names holding third-party code
    pub dependency_dirs: Vec<String>,

    /// Resource kinds with no file on disk
    pub inline_kinds: Vec<String>,
}

impl CheckerOptions {
    /// Options for `root` with the default exclusions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = crate::config::schema::CheckConfig::default();
        Self {
            root: normalize_path(&root.into()),
            dependency_dirs: defaults.dependency_dirs,
            inline_kinds: defaults.inline_kinds,
        }
    }

    /// Options from configuration, rooted at `cwd` unless a root is set
    pub fn from_config(config: &Config, cwd: &Path) -> CaseCheckResult<Self> {
        let root = match &config.project.root {
            Some(root) => resolve_root(cwd, root)?,
            None => resolve_root(cwd, Path::new("."))?,
        };

        Ok(Self {
            root,
            dependency_dirs: config.check.dependency_dirs.clone(),
            inline_kinds: config.check.inline_kinds.clone(),
        })
    }

    /// Replace the root, resolving a relative `root` against `cwd`
    pub fn with_root(mut self, root: &Path, cwd: &Path) -> CaseCheckResult<Self> {
        self.root = resolve_root(cwd, root)?;
        Ok(self)
    }
}

/// Absolute, lexically normalized project root
fn resolve_root(cwd: &Path, root: &Path) -> CaseCheckResult<PathBuf> {
    let resolved = normalize_path(&cwd.join(root));
    if !resolved.is_absolute() {
        return Err(CaseCheckError::PathInvalid {
            path: root.to_path_buf(),
            reason: "project root must resolve to an absolute path".to_string(),
        });
    }

    Ok(resolved)
}

/// Metadata the host's resolver reports for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedResource {
    /// Resolved resource string, possibly with a `?query`
    pub resource: String,

    /// Module type assigned by the host, if any
    pub kind: Option<String>,

    /// Resource that requested this one, if any
    pub issuer: Option<String>,
}

impl ResolvedResource {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// Case-sensitivity checker owning one cycle's listing cache
pub struct Checker {
    filter: CheckFilter,
    cache: DirectoryCache,
    cycle: AtomicU64,
}

impl Checker {
    /// Create a checker reading directories through `reader`
    pub fn new(options: CheckerOptions, reader: Arc<dyn DirectoryReader>) -> Self {
        let filter = CheckFilter::new(options.root)
            .with_dependency_dirs(options.dependency_dirs)
            .with_inline_kinds(options.inline_kinds);

        Self {
            filter,
            cache: DirectoryCache::new(reader),
            cycle: AtomicU64::new(0),
        }
    }

    /// Project root; nothing at or above it is inspected
    pub fn root(&self) -> &Path {
        self.filter.root()
    }

    /// Listing cache of the current cycle
    pub fn cache(&self) -> &DirectoryCache {
        &self.cache
    }

    /// Number of cycles started so far
    pub fn cycle(&self) -> u64 {
        self.cycle.load(Ordering::Relaxed)
    }

    /// Whether a resource should be verified at all
    pub fn is_checkable(&self, resource: &str, kind: Option<&str>, issuer: Option<&str>) -> bool {
        self.filter.is_checkable(resource, kind, issuer)
    }

    /// Verify every segment of `resource` below the project root
    pub async fn check_path(&self, resource: &Path) -> Result<(), CaseMismatch> {
        walker::check_path(&self.cache, self.root(), resource).await
    }

    /// Resolution hook: filter, normalize and verify one resource
    pub async fn on_resolved(&self, resolved: &ResolvedResource) -> Result<(), CaseMismatch> {
        if resolved.resource.is_empty()
            || !self.is_checkable(
                &resolved.resource,
                resolved.kind.as_deref(),
                resolved.issuer.as_deref(),
            )
        {
            debug!("Skipping {}", resolved.resource);
            return Ok(());
        }

        self.check_path(&normalize_resource(&resolved.resource)).await
    }

    /// Run the resolution hook for many resources concurrently
    ///
    /// Returns one mismatch per offending resource, in input order.
    pub async fn check_many(&self, resources: &[ResolvedResource]) -> Vec<CaseMismatch> {
        let results = join_all(resources.iter().map(|resolved| self.on_resolved(resolved))).await;
        results.into_iter().filter_map(Result::err).collect()
    }

    /// Start a build cycle
    pub fn begin_cycle(&self) -> u64 {
        let cycle = self.cycle.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Starting build cycle {} under {}", cycle, self.root().display());
        cycle
    }

    /// Finish a build cycle and forget everything read during it
    pub fn end_cycle(&self) {
        let stats = self.cache.stats();
        info!(
            "Build cycle {} done: {} reads, {} cache hits, {} shared reads",
            self.cycle(),
            stats.reads,
            stats.hits,
            stats.shared
        );
        self.reset();
    }

    /// Clear the listing cache and the in-flight read table
    pub fn reset(&self) {
        self.cache.clear();
    }
}
