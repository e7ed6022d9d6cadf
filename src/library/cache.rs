//! Watermark-keyed snapshot cache.
//!
//! A [`Watermark`] fingerprints the media and metadata trees by entry count
//! and newest modification time. Adding, removing, renaming or editing
//! anything below either root changes it, so a snapshot stored under a
//! watermark stays valid for as long as the watermark does.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;
use vidshelf_common::{Error, LibrarySnapshot, Result};
use walkdir::WalkDir;

/// Fingerprint of a set of directory trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark {
    pub entries: u64,
    pub newest: Option<SystemTime>,
}

impl Watermark {
    /// Walk `roots` recursively (following symlinks) and fingerprint them.
    ///
    /// Missing roots and unreadable entries are left out of the count.
    pub fn compute(roots: &[PathBuf]) -> Self {
        let mut entries = 0u64;
        let mut newest: Option<SystemTime> = None;

        for root in roots {
            for entry in WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                entries += 1;
                let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
                if let Some(modified) = modified {
                    newest = Some(newest.map_or(modified, |n| n.max(modified)));
                }
            }
        }

        Self { entries, newest }
    }

    /// [`Watermark::compute`] on the blocking thread pool.
    pub async fn compute_async(roots: Vec<PathBuf>) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::compute(&roots))
            .await
            .map_err(|e| Error::internal(format!("watermark task failed: {}", e)))
    }
}

/// Last snapshot together with the watermark it was built under.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: RwLock<Option<(Watermark, Arc<LibrarySnapshot>)>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached snapshot if it was stored under `watermark`.
    pub fn get(&self, watermark: &Watermark) -> Option<Arc<LibrarySnapshot>> {
        let slot = self.slot.read();
        match slot.as_ref() {
            Some((stored, snapshot)) if stored == watermark => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }

    pub fn store(&self, watermark: Watermark, snapshot: Arc<LibrarySnapshot>) {
        *self.slot.write() = Some((watermark, snapshot));
    }

    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}
