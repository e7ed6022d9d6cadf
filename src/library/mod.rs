//! Lookup service over catalog snapshots.
//!
//! Every query works against a freshly built snapshot unless the snapshot
//! cache is enabled, in which case the last snapshot is reused while the
//! filesystem watermark is unchanged.

pub mod cache;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;
use vidshelf_common::{Error, LibrarySnapshot, Playable, Result, Show};

use crate::config::Config;
use crate::metadata;
use crate::scanner::Scanner;

pub use cache::{SnapshotCache, Watermark};

/// Point queries against the catalog.
#[derive(Debug)]
pub struct Library {
    scanner: Scanner,
    cache: Option<SnapshotCache>,
}

impl Library {
    /// Lookup service that rebuilds on every query.
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            cache: None,
        }
    }

    /// Reuse snapshots while the watermark is unchanged.
    pub fn with_snapshot_cache(mut self) -> Self {
        self.cache = Some(SnapshotCache::new());
        self
    }

    /// Build the lookup service described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = metadata::store_from_config(config)?;
        let library = Self::new(Scanner::new(config.library.media_dir.clone(), store));
        Ok(if config.library.cache_snapshots {
            library.with_snapshot_cache()
        } else {
            library
        })
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Current catalog.
    pub async fn snapshot(&self) -> Result<Arc<LibrarySnapshot>> {
        let Some(ref cache) = self.cache else {
            return Ok(Arc::new(self.scanner.build().await?));
        };

        let roots = vec![
            self.scanner.media_root().to_path_buf(),
            self.scanner.store().root().to_path_buf(),
        ];
        let watermark = Watermark::compute_async(roots).await?;
        if let Some(snapshot) = cache.get(&watermark) {
            debug!(entries = watermark.entries, "Reusing cached snapshot");
            return Ok(snapshot);
        }

        let snapshot = Arc::new(self.scanner.build().await?);
        cache.store(watermark, Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Show with the given ID.
    pub async fn find_show_by_id(&self, id: &str) -> Result<Option<Show>> {
        Ok(self.snapshot().await?.find_show(id).cloned())
    }

    /// Movie or episode with the given ID; movies are searched first.
    pub async fn find_playable_by_id(&self, id: &str) -> Result<Option<Playable>> {
        Ok(self.snapshot().await?.find_playable(id))
    }

    /// On-disk video for a playable ID.
    pub async fn resolve_stream_path(&self, id: &str) -> Result<PathBuf> {
        self.find_playable_by_id(id)
            .await?
            .map(|p| p.video_path().to_path_buf())
            .ok_or_else(|| Error::not_found(id))
    }
}
