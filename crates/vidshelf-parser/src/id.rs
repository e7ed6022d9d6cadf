//! Canonical ID grammar.
//!
//! ```text
//! movie-id   = slug(stem(file-name))
//! show-id    = slug(dir-name)
//! episode-id = show-id "-s" season "-e" episode
//! slug(s)    = lowercase(s) with every ' ' replaced by '-'
//! ```
//!
//! Both the catalog scanner and stream resolution derive IDs through these
//! functions, so the two can never disagree.

use vidshelf_common::MediaId;

use crate::title::stem;

/// Lowercase `name` and replace each space with a hyphen.
///
/// Other characters (dots, parentheses, existing hyphens) are kept as-is.
pub fn slugify(name: &str) -> String {
    name.replace(' ', "-").to_lowercase()
}

/// ID of a movie file at the media root.
pub fn movie_id(file_name: &str) -> MediaId {
    MediaId::new(slugify(stem(file_name)))
}

/// ID of a show directory.
pub fn show_id(dir_name: &str) -> MediaId {
    MediaId::new(slugify(dir_name))
}

/// ID of an episode within a show.
pub fn episode_id(show: &MediaId, season: u32, episode: u32) -> MediaId {
    MediaId::new(format!("{}-s{}-e{}", show, season, episode))
}
