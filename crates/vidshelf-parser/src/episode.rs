//! Season and episode numbering.
//!
//! Episode numbers are resolved with a fixed fallback order:
//!
//! 1. an `S<season>E<episode>` marker anywhere in the name (case-insensitive),
//! 2. the first run of digits in the file stem,
//! 3. `0`.
//!
//! Season numbers come from the enclosing `Season N` directory.

use regex::Regex;
use std::sync::LazyLock;

use crate::title::stem;

static SEASON_EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)S(\d+)E(\d+)").expect("valid season/episode pattern"));

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

const SEASON_PREFIX: &str = "season";

/// Season and episode captured from an `S01E02` style marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpisodeNumbers {
    pub season: u32,
    pub episode: u32,
}

/// Find an `S<season>E<episode>` marker anywhere in `name`.
///
/// Only the first marker counts. A marker whose numbers do not fit in a
/// `u32` is treated as absent.
///
/// ```
/// use vidshelf_parser::{parse_episode_filename, EpisodeNumbers};
///
/// assert_eq!(
///     parse_episode_filename("Show.S02E05.mkv"),
///     Some(EpisodeNumbers { season: 2, episode: 5 })
/// );
/// assert_eq!(parse_episode_filename("random.mkv"), None);
/// ```
pub fn parse_episode_filename(name: &str) -> Option<EpisodeNumbers> {
    let caps = SEASON_EPISODE.captures(name)?;
    let season = caps.get(1)?.as_str().parse().ok()?;
    let episode = caps.get(2)?.as_str().parse().ok()?;
    Some(EpisodeNumbers { season, episode })
}

/// First run of ASCII digits in `name`, if it fits in a `u32`.
pub fn first_number(name: &str) -> Option<u32> {
    DIGITS.find(name)?.as_str().parse().ok()
}

/// Episode number for a video file inside a season directory.
pub fn episode_number(file_name: &str) -> u32 {
    if let Some(numbers) = parse_episode_filename(file_name) {
        return numbers.episode;
    }
    first_number(stem(file_name)).unwrap_or(0)
}

/// Season number of a `Season N` directory.
///
/// The name must start with `season` (any case). Whitespace after the prefix
/// is skipped and the leading digits are parsed; `Season 1 (2008)` is season
/// 1, `Season01` is season 1, and `Seasonal` or `Season X` are not seasons.
pub fn parse_season_dir(name: &str) -> Option<u32> {
    let head = name.get(..SEASON_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(SEASON_PREFIX) {
        return None;
    }

    let rest = name[SEASON_PREFIX.len()..].trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..digits_end].parse().ok()
}
