//! Checkability filter and resource normalization
//!
//! Decides from resolver metadata alone whether a resource is worth
//! walking. Pure: no I/O, no shared state.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Resource kind used by bundlers for assets inlined as data URLs
pub const INLINE_ASSET_KIND: &str = "asset/inline";

/// Directory holding third-party packages
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Rules for skipping resources that cannot or should not be verified
#[derive(Debug, Clone)]
pub struct CheckFilter {
    root: PathBuf,
    dependency_dirs: Vec<String>,
    inline_kinds: Vec<String>,
}

impl CheckFilter {
    /// Create a filter for `root` with the default exclusions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dependency_dirs: vec![DEPENDENCY_DIR.to_string()],
            inline_kinds: vec![INLINE_ASSET_KIND.to_string()],
        }
    }

    /// Replace the directory names treated as dependency libraries
    pub fn with_dependency_dirs(mut self, dirs: Vec<String>) -> Self {
        self.dependency_dirs = dirs;
        self
    }

    /// Replace the resource kinds treated as inlined assets
    pub fn with_inline_kinds(mut self, kinds: Vec<String>) -> Self {
        self.inline_kinds = kinds;
        self
    }

    /// Project boundary this filter admits resources under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `resource` should be verified
    ///
    /// Skips inlined assets, anything outside the project root, anything
    /// inside a dependency directory, and resources resolved as their own
    /// issuer.
    pub fn is_checkable(&self, resource: &str, kind: Option<&str>, issuer: Option<&str>) -> bool {
        if kind.is_some_and(|kind| self.inline_kinds.iter().any(|k| k == kind)) {
            return false;
        }

        let path = Path::new(resource);
        if path == self.root || !path.starts_with(&self.root) {
            return false;
        }

        if self.in_dependency_dir(path) {
            return false;
        }

        issuer != Some(resource)
    }

    fn in_dependency_dir(&self, path: &Path) -> bool {
        let Some(parent) = path.parent() else {
            return false;
        };

        parent.components().any(|component| match component {
            Component::Normal(name) => self.is_dependency_dir(name),
            _ => false,
        })
    }

    fn is_dependency_dir(&self, name: &OsStr) -> bool {
        self.dependency_dirs.iter().any(|dir| OsStr::new(dir) == name)
    }
}

/// Turn a resolver's resource string into the on-disk path to verify
///
/// Drops a trailing `?query` and unescapes the resolver's `\0#` escape
/// for a literal `#` in file names.
pub fn normalize_resource(raw: &str) -> PathBuf {
    let (path, _query) = split_query(raw);
    PathBuf::from(path.replacen("\0#", "#", 1))
}

/// Split a resource string into its path and `?query` parts
///
/// A lone trailing `?` belongs to the path.
pub fn split_query(raw: &str) -> (&str, &str) {
    match raw.find('?') {
        Some(idx) if idx + 1 < raw.len() => raw.split_at(idx),
        _ => (raw, ""),
    }
}

/// Lexically fold `.` and `..` components without touching the disk
///
/// `..` at the filesystem root stays at the root; leading `..` of a
/// relative path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
