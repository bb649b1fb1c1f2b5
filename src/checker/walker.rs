//! Upward path walk
//!
//! Splits a resource path into (parent directory, expected name) levels up
//! to the project root, lists every parent concurrently through the
//! [`DirectoryCache`], and compares each expected name against the real
//! entries.

use super::listing::DirectoryCache;
use crate::error::CaseMismatch;
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// One step between a resource and the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestryLevel {
    /// Directory to list
    pub dir: PathBuf,

    /// Entry name the resolved path expects inside `dir`
    pub name: String,
}

/// Levels from `resource` up to, but not including, `root`
///
/// Empty when `resource` is `root` itself or lies outside it.
pub fn ancestry_levels(resource: &Path, root: &Path) -> Vec<AncestryLevel> {
    let mut levels = Vec::new();
    let mut current = resource;

    while current != root && current.starts_with(root) {
        let (Some(dir), Some(name)) = (current.parent(), current.file_name()) else {
            break;
        };

        levels.push(AncestryLevel {
            dir: dir.to_path_buf(),
            name: name.to_string_lossy().into_owned(),
        });
        current = dir;
    }

    levels
}

/// Verify every level of `resource` against the listings on disk
///
/// All levels are dispatched at once and joined; the first mismatch to be
/// detected is the one reported, and the remaining reads still run to
/// completion. A name missing from its directory under any casing passes.
pub async fn check_path(
    cache: &DirectoryCache,
    root: &Path,
    resource: &Path,
) -> Result<(), CaseMismatch> {
    let levels = ancestry_levels(resource, root);
    let first_error: OnceLock<CaseMismatch> = OnceLock::new();
    let slot = &first_error;

    let pending = levels.iter().map(move |level| async move {
        let listing = cache.list(&level.dir).await;

        if slot.get().is_some() || listing.iter().any(|entry| *entry == level.name) {
            return;
        }

        let expected = level.name.to_lowercase();
        if let Some(actual) = listing.iter().find(|entry| entry.to_lowercase() == expected) {
            debug!(
                "{}: expected `{}` in {}, found `{}`",
                resource.display(),
                level.name,
                level.dir.display(),
                actual
            );
            // Losing writers are dropped
            let _ = slot.set(CaseMismatch {
                resource: resource.to_path_buf(),
                expected: level.name.clone(),
                actual: actual.clone(),
            });
        }
    });
    join_all(pending).await;

    match first_error.into_inner() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{DirectoryReader, MemoryFs};
    use std::sync::Arc;

    fn cache_over(fs: MemoryFs) -> (Arc<MemoryFs>, DirectoryCache) {
        let fs = Arc::new(fs);
        let cache = DirectoryCache::new(Arc::clone(&fs) as Arc<dyn DirectoryReader>);
        (fs, cache)
    }

    #[test]
    fn levels_stop_below_root() {
        let levels = ancestry_levels(Path::new("/proj/Child/index.js"), Path::new("/proj"));
        assert_eq!(
            levels,
            vec![
                AncestryLevel {
                    dir: PathBuf::from("/proj/Child"),
                    name: "index.js".to_string(),
                },
                AncestryLevel {
                    dir: PathBuf::from("/proj"),
                    name: "Child".to_string(),
                },
            ]
        );
    }

    #[test]
    fn levels_empty_outside_root() {
        assert!(ancestry_levels(Path::new("/other/a.js"), Path::new("/proj")).is_empty());
        assert!(ancestry_levels(Path::new("/proj"), Path::new("/proj")).is_empty());
        assert!(ancestry_levels(Path::new("/projects/a.js"), Path::new("/proj")).is_empty());
    }

    #[tokio::test]
    async fn exact_casing_passes() {
        let fs = MemoryFs::new();
        fs.add_file("/proj/Child/index.js");
        let (_fs, cache) = cache_over(fs);

        let result = check_path(&cache, Path::new("/proj"), Path::new("/proj/Child/index.js")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn miscased_directory_is_reported() {
        let fs = MemoryFs::new();
        fs.add_file("/proj/Child/index.js");
        let (_fs, cache) = cache_over(fs);

        let err = check_path(&cache, Path::new("/proj"), Path::new("/proj/child/index.js"))
            .await
            .unwrap_err();
        assert_eq!(err.expected, "child");
        assert_eq!(err.actual, "Child");
        assert_eq!(err.resource, PathBuf::from("/proj/child/index.js"));
    }

    #[tokio::test]
    async fn miscased_file_is_reported() {
        let fs = MemoryFs::new();
        fs.add_file("/proj/src/other.js");
        let (_fs, cache) = cache_over(fs);

        let err = check_path(&cache, Path::new("/proj"), Path::new("/proj/src/Other.js"))
            .await
            .unwrap_err();
        assert_eq!(err.expected, "Other.js");
        assert_eq!(err.actual, "other.js");
    }

    #[tokio::test]
    async fn several_miscased_levels_report_one() {
        let fs = MemoryFs::new();
        fs.add_file("/proj/Son/Deep/A.js");
        let (_fs, cache) = cache_over(fs);

        let err = check_path(&cache, Path::new("/proj"), Path::new("/proj/son/deep/a.js"))
            .await
            .unwrap_err();
        let candidates = [("son", "Son"), ("deep", "Deep"), ("a.js", "A.js")];
        assert!(candidates.contains(&(err.expected.as_str(), err.actual.as_str())));
    }

    #[tokio::test]
    async fn missing_segment_passes() {
        let fs = MemoryFs::new();
        fs.add_file("/proj/src/a.js");
        let (_fs, cache) = cache_over(fs);

        let result = check_path(&cache, Path::new("/proj"), Path::new("/proj/src/ghost.js")).await;
        assert!(result.is_ok());

        let result = check_path(&cache, Path::new("/proj"), Path::new("/proj/nope/a.js")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn never_reads_above_root() {
        let fs = MemoryFs::new();
        fs.add_file("/proj/Child/index.js");
        let (fs, cache) = cache_over(fs);

        check_path(&cache, Path::new("/proj/Child"), Path::new("/proj/Child/index.js"))
            .await
            .unwrap();
        assert_eq!(fs.read_count("/proj/Child"), 1);
        assert_eq!(fs.read_count("/proj"), 0);
        assert_eq!(fs.read_count("/"), 0);
    }

    #[tokio::test]
    async fn all_levels_are_read_even_after_a_mismatch() {
        let fs = MemoryFs::new();
        fs.add_file("/proj/a/b/c/Leaf.js");
        let (fs, cache) = cache_over(fs);

        let result = check_path(&cache, Path::new("/proj"), Path::new("/proj/a/b/c/leaf.js")).await;
        assert!(result.is_err());
        assert_eq!(fs.total_reads(), 4);
    }
}
