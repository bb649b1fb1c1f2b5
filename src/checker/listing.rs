//! Per-cycle directory listing cache
//!
//! One table holds both cached listings and in-flight reads, so the
//! "already read" and "being read" checks happen under a single lock and a
//! directory can never be read twice in the same cycle.
//!
//! # Entry States
//!
//! | State | Meaning |
//! |-------|---------|
//! | absent | Never requested this cycle |
//! | Pending | One read in flight; later callers wait on it |
//! | Resolved | Listing stored; served without touching the reader |

use crate::fs::DirectoryReader;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::debug;

/// Entry names of one directory, exactly as read from disk
pub type Listing = Arc<[String]>;

enum CacheEntry {
    Pending(Arc<OnceCell<Listing>>),
    Resolved(Listing),
}

#[derive(Default)]
struct CacheTable {
    entries: HashMap<PathBuf, CacheEntry>,
    generation: u64,
}

/// Counters for the current cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from a resolved listing
    pub hits: u64,

    /// Lookups that attached to a read already in flight
    pub shared: u64,

    /// Reads issued to the underlying reader
    pub reads: u64,
}

#[derive(Default)]
struct StatCounters {
    hits: AtomicU64,
    shared: AtomicU64,
    reads: AtomicU64,
}

/// Directory listing cache with in-flight read deduplication
pub struct DirectoryCache {
    reader: Arc<dyn DirectoryReader>,
    table: Mutex<CacheTable>,
    stats: StatCounters,
}

impl DirectoryCache {
    /// Create an empty cache reading through `reader`
    pub fn new(reader: Arc<dyn DirectoryReader>) -> Self {
        Self {
            reader,
            table: Mutex::new(CacheTable::default()),
            stats: StatCounters::default(),
        }
    }

    /// List `dir`, reading it at most once per cycle
    ///
    /// An unreadable directory yields an empty listing.
    pub async fn list(&self, dir: &Path) -> Listing {
        let (cell, generation) = {
            let mut table = self.lock();
            let generation = table.generation;

            match table.entries.get(dir) {
                Some(CacheEntry::Resolved(listing)) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    return Arc::clone(listing);
                }
                Some(CacheEntry::Pending(cell)) => {
                    self.stats.shared.fetch_add(1, Ordering::Relaxed);
                    debug!("Waiting on in-flight read of {}", dir.display());
                    (Arc::clone(cell), generation)
                }
                None => {
                    let cell = Arc::new(OnceCell::new());
                    table
                        .entries
                        .insert(dir.to_path_buf(), CacheEntry::Pending(Arc::clone(&cell)));
                    (cell, generation)
                }
            }
        };

        let listing = cell.get_or_init(|| self.read(dir, generation)).await;
        Arc::clone(listing)
    }

    async fn read(&self, dir: &Path, generation: u64) -> Listing {
        self.stats.reads.fetch_add(1, Ordering::Relaxed);

        let listing: Listing = match self.reader.read_dir(dir).await {
            Ok(names) => {
                debug!("Read {} entries from {}", names.len(), dir.display());
                names.into()
            }
            Err(e) => {
                debug!("Treating {} as empty: {}", dir.display(), e);
                Vec::new().into()
            }
        };

        // A reset while this read was in flight starts a new cycle; the
        // stale listing must not leak into it.
        let mut table = self.lock();
        if table.generation == generation {
            table
                .entries
                .insert(dir.to_path_buf(), CacheEntry::Resolved(Arc::clone(&listing)));
        }

        listing
    }

    /// Whether a resolved listing for `dir` is cached
    pub fn is_cached(&self, dir: &Path) -> bool {
        matches!(self.lock().entries.get(dir), Some(CacheEntry::Resolved(_)))
    }

    /// Whether a read of `dir` is in flight
    pub fn is_pending(&self, dir: &Path) -> bool {
        matches!(self.lock().entries.get(dir), Some(CacheEntry::Pending(_)))
    }

    /// Number of directories known this cycle, resolved or pending
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of this cycle's counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.stats.hits.load(Ordering::Relaxed),
            shared: self.stats.shared.load(Ordering::Relaxed),
            reads: self.stats.reads.load(Ordering::Relaxed),
        }
    }

    /// Drop every listing and in-flight entry, starting a new cycle
    pub fn clear(&self) {
        let mut table = self.lock();
        let dropped = table.entries.len();
        table.entries.clear();
        table.generation += 1;

        self.stats.hits.store(0, Ordering::Relaxed);
        self.stats.shared.store(0, Ordering::Relaxed);
        self.stats.reads.store(0, Ordering::Relaxed);

        debug!("Cleared {} cached directories", dropped);
    }

    fn lock(&self) -> MutexGuard<'_, CacheTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
