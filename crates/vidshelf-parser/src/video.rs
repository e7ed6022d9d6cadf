//! Video extension classification and MIME types.

use std::fmt;
use std::path::Path;

/// Extension of side-car subtitle files.
pub const SUBTITLE_EXTENSION: &str = "vtt";

/// Recognized video container kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoKind {
    Mp4,
    Webm,
    Ogg,
    Mkv,
    Hevc,
    Mov,
}

impl VideoKind {
    /// All recognized kinds.
    pub const ALL: [VideoKind; 6] = [
        VideoKind::Mp4,
        VideoKind::Webm,
        VideoKind::Ogg,
        VideoKind::Mkv,
        VideoKind::Hevc,
        VideoKind::Mov,
    ];

    /// Canonical lowercase extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::Mkv => "mkv",
            Self::Hevc => "hevc",
            Self::Mov => "mov",
        }
    }

    /// MIME type served for this kind.
    pub fn mime_type(&self) -> &'static str {
        mime_type(self.extension())
    }
}

impl fmt::Display for VideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Extension of `name` as written, without the dot.
pub fn extension(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|e| e.to_str())
}

/// Classify a file name by its extension.
///
/// Returns `None` for anything that is not a recognized video, including
/// subtitle side-cars.
///
/// ```
/// use vidshelf_parser::{classify_extension, VideoKind};
///
/// assert_eq!(classify_extension("Inception.MKV"), Some(VideoKind::Mkv));
/// assert_eq!(classify_extension("Inception.vtt"), None);
/// ```
pub fn classify_extension(name: &str) -> Option<VideoKind> {
    let ext = extension(name)?.to_ascii_lowercase();
    VideoKind::ALL
        .into_iter()
        .find(|kind| kind.extension() == ext)
}

/// MIME type for a video extension (with or without the leading dot).
///
/// Unknown extensions are served as `video/mp4`.
pub fn mime_type(extension: &str) -> &'static str {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    match ext.as_str() {
        "mp4" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "ogg" => "video/ogg",
        "mov" => "video/quicktime",
        "hevc" => "video/mp4",
        _ => "video/mp4",
    }
}

/// Name of the subtitle side-car that belongs to a video file.
pub fn subtitle_file_name(video_file_name: &str) -> String {
    format!(
        "{}.{}",
        crate::title::stem(video_file_name),
        SUBTITLE_EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_recognized() {
        for (name, kind) in [
            ("a.mp4", VideoKind::Mp4),
            ("a.webm", VideoKind::Webm),
            ("a.ogg", VideoKind::Ogg),
            ("a.mkv", VideoKind::Mkv),
            ("a.hevc", VideoKind::Hevc),
            ("a.mov", VideoKind::Mov),
        ] {
            assert_eq!(classify_extension(name), Some(kind), "{}", name);
        }
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify_extension("Movie.MP4"), Some(VideoKind::Mp4));
        assert_eq!(classify_extension("Movie.MkV"), Some(VideoKind::Mkv));
    }

    #[test]
    fn test_classify_rejects() {
        assert_eq!(classify_extension("movie.vtt"), None);
        assert_eq!(classify_extension("movie.avi"), None);
        assert_eq!(classify_extension("notes.txt"), None);
        assert_eq!(classify_extension("mp4"), None);
        assert_eq!(classify_extension(".mp4"), None);
        assert_eq!(classify_extension(""), None);
    }

    #[test]
    fn test_mime_type_table() {
        assert_eq!(mime_type("mp4"), "video/mp4");
        assert_eq!(mime_type("mkv"), "video/x-matroska");
        assert_eq!(mime_type("webm"), "video/webm");
        assert_eq!(mime_type("ogg"), "video/ogg");
        assert_eq!(mime_type("mov"), "video/quicktime");
        assert_eq!(mime_type("hevc"), "video/mp4");
        assert_eq!(mime_type(".MKV"), "video/x-matroska");
        assert_eq!(mime_type("avi"), "video/mp4");
        assert_eq!(VideoKind::Mov.mime_type(), "video/quicktime");
    }

    #[test]
    fn test_subtitle_file_name() {
        assert_eq!(subtitle_file_name("Inception.mkv"), "Inception.vtt");
        assert_eq!(
            subtitle_file_name("Breaking Bad S01E01.mkv"),
            "Breaking Bad S01E01.vtt"
        );
    }
}
