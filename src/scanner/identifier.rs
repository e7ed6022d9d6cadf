//! Media identification using vidshelf-parser.
//!
//! Turns file and directory names into canonical IDs, default titles and
//! episode numbering. Stream resolution relies on the same derivation, so
//! every name-to-ID decision in the crate goes through here.

use vidshelf_common::MediaId;
use vidshelf_parser::{
    episode_id, episode_number, format_dir_title, format_title, movie_id,
    parse_episode_filename, show_id,
};

/// Media identifier that parses file and directory names.
#[derive(Debug, Default, Clone, Copy)]
pub struct MediaIdentifier;

/// Identity of a movie file at the media root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieIdentity {
    pub id: MediaId,
    pub default_title: String,
}

/// Identity of a show directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowIdentity {
    pub id: MediaId,
    pub default_title: String,
}

/// Identity of a video inside a season directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeIdentity {
    pub id: MediaId,
    pub season: u32,
    pub episode: u32,
    pub default_title: String,
    /// Season named by an `SxxEyy` marker in the file name, if any.
    pub marker_season: Option<u32>,
}

impl EpisodeIdentity {
    /// The file name claims a different season than its directory.
    pub fn season_mismatch(&self) -> bool {
        self.marker_season.is_some_and(|s| s != self.season)
    }
}

impl MediaIdentifier {
    /// Create a new media identifier.
    pub fn new() -> Self {
        Self
    }

    pub fn identify_movie(&self, file_name: &str) -> MovieIdentity {
        MovieIdentity {
            id: movie_id(file_name),
            default_title: format_title(file_name),
        }
    }

    pub fn identify_show(&self, dir_name: &str) -> ShowIdentity {
        ShowIdentity {
            id: show_id(dir_name),
            default_title: format_dir_title(dir_name),
        }
    }

    /// Identify an episode; `season` always comes from the directory.
    pub fn identify_episode(
        &self,
        show: &MediaId,
        season: u32,
        file_name: &str,
    ) -> EpisodeIdentity {
        let episode = episode_number(file_name);
        EpisodeIdentity {
            id: episode_id(show, season, episode),
            season,
            episode,
            default_title: format_title(file_name),
            marker_season: parse_episode_filename(file_name).map(|n| n.season),
        }
    }
}

/// URL path under `/media` for a file at `segments` below the media root.
///
/// Each segment is percent-encoded on its own so that spaces and reserved
/// characters survive the round trip through the static file service.
pub fn media_url(segments: &[&str]) -> String {
    let mut url = String::from("/media");
    for segment in segments {
        url.push('/');
        url.push_str(&encode_segment(segment));
    }
    url
}

/// Percent-encode everything except RFC 3986 unreserved characters.
fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0x0f) as usize]));
            }
        }
    }
    out
}

const HEX: [u8; 16] = *b"0123456789ABCDEF";
