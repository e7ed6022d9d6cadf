//! Catalog builder.
//!
//! Walks the media root and turns it into a [`LibrarySnapshot`]:
//!
//! ```text
//! media/
//! ├── Inception.mkv          -> Movie "inception"
//! ├── Inception.vtt          -> its subtitles
//! └── Breaking Bad/          -> Show "breaking-bad"
//!     └── Season 1/
//!         └── S01E01.mkv     -> Episode "breaking-bad-s1-e1"
//! ```
//!
//! The tree is re-read on every build. A failure on one entry is logged and
//! that entry skipped; only an unreadable media root fails the build.

pub mod identifier;
mod movie;
mod show;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};
use vidshelf_common::{Error, LibraryItem, LibrarySnapshot, MediaId, Result};

use crate::metadata::MetadataStore;

pub use identifier::{media_url, MediaIdentifier};

/// Builds catalog snapshots from a media root and a metadata store.
#[derive(Debug, Clone)]
pub struct Scanner {
    media_root: PathBuf,
    store: MetadataStore,
    identifier: MediaIdentifier,
}

/// Counters reported at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub movies: usize,
    pub shows: usize,
    pub episodes: usize,
    pub skipped: usize,
}

/// What a directory entry turned out to be after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    Directory,
    File,
    Other,
}

/// A listed directory entry with a UTF-8 name.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Scanner {
    /// Create a scanner for `media_root` backed by `store`.
    pub fn new(media_root: impl Into<PathBuf>, store: MetadataStore) -> Self {
        Self {
            media_root: media_root.into(),
            store,
            identifier: MediaIdentifier::new(),
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// Build a fresh snapshot.
    pub async fn build(&self) -> Result<LibrarySnapshot> {
        self.build_with_stats().await.map(|(snapshot, _)| snapshot)
    }

    /// Build a fresh snapshot and report what was indexed.
    pub async fn build_with_stats(&self) -> Result<(LibrarySnapshot, ScanStats)> {
        let started = Instant::now();

        tokio::fs::create_dir_all(&self.media_root)
            .await
            .map_err(|e| Error::filesystem(&self.media_root, e))?;
        tokio::fs::create_dir_all(self.store.root())
            .await
            .map_err(|e| Error::filesystem(self.store.root(), e))?;

        let entries = list_dir(&self.media_root)
            .await
            .map_err(|e| Error::filesystem(&self.media_root, e))?;

        let mut items = Vec::new();
        let mut claimed: HashSet<MediaId> = HashSet::new();
        let mut stats = ScanStats::default();

        // Movies claim their IDs first so they win collisions with episodes.
        for entry in entries.iter().filter(|e| e.kind == EntryKind::File) {
            if vidshelf_parser::classify_extension(&entry.name).is_none() {
                continue;
            }

            let identity = self.identifier.identify_movie(&entry.name);
            if claimed.contains(&identity.id) {
                warn!(id = %identity.id, file = %entry.name, "Duplicate ID, skipping movie");
                stats.skipped += 1;
                continue;
            }

            match self.process_movie(entry, identity).await {
                Ok(movie) => {
                    debug!(id = %movie.id, "Indexed movie");
                    claimed.insert(movie.id.clone());
                    stats.movies += 1;
                    items.push(LibraryItem::Movie(movie));
                }
                Err(e) => {
                    warn!(file = %entry.name, error = %e, "Failed to index movie, skipping");
                    stats.skipped += 1;
                }
            }
        }

        for entry in entries.iter().filter(|e| e.kind == EntryKind::Directory) {
            match self.process_show(entry, &mut claimed).await {
                Ok(Some(show)) => {
                    debug!(id = %show.id, episodes = show.episode_count(), "Indexed show");
                    stats.shows += 1;
                    stats.episodes += show.episode_count();
                    items.push(LibraryItem::Show(show));
                }
                Ok(None) => {
                    debug!(dir = %entry.name, "Directory has no episodes, skipping");
                }
                Err(e) => {
                    warn!(dir = %entry.name, error = %e, "Failed to index show, skipping");
                    stats.skipped += 1;
                }
            }
        }

        let snapshot = LibrarySnapshot::new(items);
        info!(
            movies = stats.movies,
            shows = stats.shows,
            episodes = stats.episodes,
            skipped = stats.skipped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog built from {:?}",
            self.media_root
        );

        Ok((snapshot, stats))
    }
}

/// Sibling subtitle file for a video, if it exists.
pub(crate) async fn find_subtitles(dir: &Path, video_file_name: &str) -> Option<(String, PathBuf)> {
    let name = vidshelf_parser::subtitle_file_name(video_file_name);
    let path = dir.join(&name);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => Some((name, path)),
        _ => None,
    }
}

/// List a directory sorted by name, following symlinks.
///
/// Entries whose names are not UTF-8 are skipped.
pub(crate) async fn list_dir(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = ?path, "Skipping entry with non UTF-8 name");
            continue;
        };

        let kind = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(_) => EntryKind::Other,
            Err(e) => {
                debug!(path = ?path, error = %e, "Cannot stat entry (dangling symlink?)");
                EntryKind::Other
            }
        };

        entries.push(Entry { name, path, kind });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
