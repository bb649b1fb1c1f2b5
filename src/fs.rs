//! Directory reader abstraction
//!
//! The checker never touches the disk directly. Hosts inject a
//! [`DirectoryReader`]; [`TokioFs`] reads the real filesystem and
//! [`MemoryFs`] serves a virtual tree for tests and embedding hosts.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Lists the entry names of one directory
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    /// Read the names of all entries directly inside `dir`
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// Reader backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl DirectoryReader for TokioFs {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }
}

#[derive(Debug, Default)]
struct MemoryTree {
    dirs: HashMap<PathBuf, Vec<String>>,
    unreadable: HashSet<PathBuf>,
    reads: HashMap<PathBuf, usize>,
}

/// In-memory directory tree with read accounting
///
/// Entry names keep their exact casing; lookups on directory keys are
/// byte-for-byte, like a case-sensitive filesystem.
#[derive(Debug, Default)]
pub struct MemoryFs {
    tree: Mutex<MemoryTree>,
    latency: Option<Duration>,
}

impl MemoryFs {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every read by `latency`, so concurrent reads overlap
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add a file, creating every ancestor directory entry on the way
    pub fn add_file(&self, path: impl AsRef<Path>) -> &Self {
        let mut tree = self.lock();
        let mut current = path.as_ref();

        while let (Some(parent), Some(name)) = (current.parent(), current.file_name()) {
            let name = name.to_string_lossy().into_owned();
            let listing = tree.dirs.entry(parent.to_path_buf()).or_default();
            if !listing.contains(&name) {
                listing.push(name);
            }
            current = parent;
        }

        self
    }

    /// Rename the final entry of `from` to `new_name`, moving any subtree
    pub fn rename(&self, from: impl AsRef<Path>, new_name: &str) -> &Self {
        let from = from.as_ref();
        let (Some(parent), Some(old_name)) = (from.parent(), from.file_name()) else {
            return self;
        };
        let old_name = old_name.to_string_lossy().into_owned();
        let to = parent.join(new_name);

        let mut tree = self.lock();
        if let Some(listing) = tree.dirs.get_mut(parent) {
            for entry in listing.iter_mut().filter(|entry| **entry == old_name) {
                *entry = new_name.to_string();
            }
        }

        let moved: Vec<PathBuf> = tree
            .dirs
            .keys()
            .filter(|dir| dir.starts_with(from))
            .cloned()
            .collect();
        for dir in moved {
            if let Some(listing) = tree.dirs.remove(&dir) {
                let moved_to = match dir.strip_prefix(from) {
                    Ok(rest) if !rest.as_os_str().is_empty() => to.join(rest),
                    _ => to.clone(),
                };
                tree.dirs.insert(moved_to, listing);
            }
        }

        self
    }

    /// Make reads of `dir` fail with `PermissionDenied`
    pub fn mark_unreadable(&self, dir: impl AsRef<Path>) -> &Self {
        self.lock().unreadable.insert(dir.as_ref().to_path_buf());
        self
    }

    /// Number of reads issued for `dir` so far
    pub fn read_count(&self, dir: impl AsRef<Path>) -> usize {
        self.lock().reads.get(dir.as_ref()).copied().unwrap_or(0)
    }

    /// Number of reads issued across all directories
    pub fn total_reads(&self) -> usize {
        self.lock().reads.values().sum()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryTree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DirectoryReader for MemoryFs {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        *self.lock().reads.entry(dir.to_path_buf()).or_default() += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let tree = self.lock();
        if tree.unreadable.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", dir.display()),
            ));
        }

        tree.dirs.get(dir).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", dir.display()),
            )
        })
    }
}
