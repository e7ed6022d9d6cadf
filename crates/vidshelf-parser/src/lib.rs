//! # vidshelf-parser
//!
//! Pure functions that turn raw file and directory names into the facts the
//! catalog is built from: display titles, season and episode numbers, video
//! kinds and the canonical ID grammar.
//!
//! Nothing in this crate touches the filesystem.
//!
//! ## Quick Start
//!
//! ```
//! use vidshelf_parser::{episode_number, format_title, parse_episode_filename, EpisodeNumbers};
//!
//! assert_eq!(format_title("my_movie-name.mp4"), "My Movie Name");
//! assert_eq!(
//!     parse_episode_filename("Show.S02E05.mkv"),
//!     Some(EpisodeNumbers { season: 2, episode: 5 })
//! );
//! assert_eq!(episode_number("Pilot.mkv"), 0);
//! ```
//!
//! ## Canonical IDs
//!
//! ```
//! use vidshelf_parser::{episode_id, movie_id, show_id};
//!
//! assert_eq!(movie_id("Inception.mkv"), "inception");
//! let show = show_id("Breaking Bad");
//! assert_eq!(show, "breaking-bad");
//! assert_eq!(episode_id(&show, 1, 1), "breaking-bad-s1-e1");
//! ```

mod episode;
mod id;
mod title;
mod video;

pub use episode::{
    episode_number, first_number, parse_episode_filename, parse_season_dir, EpisodeNumbers,
};
pub use id::{episode_id, movie_id, show_id, slugify};
pub use title::{format_dir_title, format_title, stem};
pub use video::{
    classify_extension, extension, mime_type, subtitle_file_name, VideoKind, SUBTITLE_EXTENSION,
};
