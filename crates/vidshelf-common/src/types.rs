//! Catalog entity types.
//!
//! The catalog is a tree of closed variants: the top level holds movies and
//! shows ([`LibraryItem`]), shows hold seasons, and seasons hold episodes.
//! Anything that can be streamed is a [`Playable`]. Both unions serialize with
//! a `"type"` discriminant so API consumers have to handle every kind.

use crate::ids::MediaId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Thumbnail used for records nobody has enriched yet.
pub const PLACEHOLDER_THUMBNAIL_URL: &str = "https://placehold.co/600x400.png";

/// Image-search hint for anything that belongs to a TV show.
pub const SHOW_AI_HINT: &str = "tv show";

/// Image-search hint for standalone movies.
pub const MOVIE_AI_HINT: &str = "movie video";

/// Discriminant shared by all entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Standalone video at the media root.
    Movie,
    /// Directory with season subdirectories.
    Show,
    /// Video inside a season directory.
    Episode,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Show => write!(f, "show"),
            Self::Episode => write!(f, "episode"),
        }
    }
}

/// Side-car metadata persisted as `{metadata_dir}/{id}.json`.
///
/// Documents are read back as-is; missing keys fall back to empty strings
/// and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataRecord {
    pub title: String,
    pub description: String,
    pub ai_hint: String,
    pub thumbnail_url: String,
}

impl MetadataRecord {
    /// Generic record for an ID seen for the first time.
    ///
    /// `is_show` is true for show records and for episodes of a show.
    pub fn placeholder(default_title: &str, is_show: bool) -> Self {
        Self {
            title: default_title.to_string(),
            description: format!("A video titled \"{}\".", default_title),
            ai_hint: if is_show { SHOW_AI_HINT } else { MOVIE_AI_HINT }.to_string(),
            thumbnail_url: PLACEHOLDER_THUMBNAIL_URL.to_string(),
        }
    }

    /// Placeholder for the show-level record of a series directory.
    pub fn show_placeholder(default_title: &str) -> Self {
        Self {
            description: format!("A TV show titled \"{}\".", default_title),
            ..Self::placeholder(default_title, true)
        }
    }
}

/// A standalone video file at the media root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MediaId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub ai_hint: String,
    /// URL path of the video under `/media`.
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subtitles_url: Option<String>,
    /// On-disk location of the video.
    #[serde(skip)]
    pub video_path: PathBuf,
    #[serde(skip)]
    pub subtitles_path: Option<PathBuf>,
}

/// A video inside `{show}/Season N/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: MediaId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub ai_hint: String,
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subtitles_url: Option<String>,
    pub episode_number: u32,
    pub season_number: u32,
    pub show_id: MediaId,
    #[serde(skip)]
    pub video_path: PathBuf,
    #[serde(skip)]
    pub subtitles_path: Option<PathBuf>,
}

/// Episodes sharing a season number, sorted by episode number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_number: u32,
    pub episodes: Vec<Episode>,
}

/// A series directory with at least one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: MediaId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub ai_hint: String,
    /// Seasons sorted by season number.
    pub seasons: Vec<Season>,
}

impl Show {
    /// Iterate over every episode of every season, in order.
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.seasons.iter().flat_map(|s| s.episodes.iter())
    }

    /// Total number of episodes across seasons.
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

/// Top-level catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LibraryItem {
    Movie(Movie),
    Show(Show),
}

impl LibraryItem {
    pub fn id(&self) -> &MediaId {
        match self {
            Self::Movie(m) => &m.id,
            Self::Show(s) => &s.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Movie(m) => &m.title,
            Self::Show(s) => &s.title,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Movie(_) => MediaKind::Movie,
            Self::Show(_) => MediaKind::Show,
        }
    }
}

/// Anything the stream endpoint can serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Playable {
    Movie(Movie),
    Episode(Episode),
}

impl Playable {
    pub fn id(&self) -> &MediaId {
        match self {
            Self::Movie(m) => &m.id,
            Self::Episode(e) => &e.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Movie(m) => &m.title,
            Self::Episode(e) => &e.title,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Movie(_) => MediaKind::Movie,
            Self::Episode(_) => MediaKind::Episode,
        }
    }

    /// On-disk video file.
    pub fn video_path(&self) -> &Path {
        match self {
            Self::Movie(m) => &m.video_path,
            Self::Episode(e) => &e.video_path,
        }
    }
}

/// Ordered top-level catalog produced by one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibrarySnapshot {
    items: Vec<LibraryItem>,
}

impl LibrarySnapshot {
    /// Build a snapshot, sorting entries by title.
    ///
    /// Titles compare accent-folded and case-insensitively, so `Édith` sorts
    /// with the `e`s. Ties fall back to the lowercase title, the exact title
    /// and then the ID so that two scans of the same tree produce identical
    /// snapshots.
    pub fn new(mut items: Vec<LibraryItem>) -> Self {
        items.sort_by_cached_key(|item| {
            (
                title_sort_key(item.title()),
                item.title().to_lowercase(),
                item.title().to_string(),
                item.id().clone(),
            )
        });
        Self { items }
    }

    pub fn items(&self) -> &[LibraryItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LibraryItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.items.iter().filter_map(|item| match item {
            LibraryItem::Movie(m) => Some(m),
            LibraryItem::Show(_) => None,
        })
    }

    pub fn shows(&self) -> impl Iterator<Item = &Show> {
        self.items.iter().filter_map(|item| match item {
            LibraryItem::Show(s) => Some(s),
            LibraryItem::Movie(_) => None,
        })
    }

    /// Top-level show with the given ID.
    pub fn find_show(&self, id: &str) -> Option<&Show> {
        self.shows().find(|s| s.id == id)
    }

    /// Movie with the given ID, else an episode of any show.
    ///
    /// Movies win over episodes should the two ever share an ID.
    pub fn find_playable(&self, id: &str) -> Option<Playable> {
        if let Some(movie) = self.movies().find(|m| m.id == id) {
            return Some(Playable::Movie(movie.clone()));
        }

        self.shows()
            .flat_map(|s| s.episodes())
            .find(|e| e.id == id)
            .map(|e| Playable::Episode(e.clone()))
    }
}

/// Collation key for catalog titles: transliterated to ASCII, then lowercased.
fn title_sort_key(title: &str) -> String {
    deunicode::deunicode(title).to_lowercase()
}
