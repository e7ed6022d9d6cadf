//! Display titles derived from file and directory names.

use std::path::Path;

/// File name without its final extension.
///
/// Follows [`Path::file_stem`]: `a.b.mp4` → `a.b`, `.hidden` → `.hidden`.
pub fn stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// Turn a file name into a display title.
///
/// Strips the extension, replaces `-` and `_` with spaces and title-cases
/// each word.
///
/// ```
/// use vidshelf_parser::format_title;
///
/// assert_eq!(format_title("my_movie-name.mp4"), "My Movie Name");
/// assert_eq!(format_title("THE MATRIX.mkv"), "The Matrix");
/// ```
pub fn format_title(name: &str) -> String {
    format_dir_title(stem(name))
}

/// Like [`format_title`] but keeps everything after the last dot.
///
/// Directory names such as `Mr. Robot` have no extension to strip.
pub fn format_dir_title(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ");
    title_case(&spaced)
}

/// Title-case every whitespace-delimited run from its first word character.
///
/// Characters before the first ASCII word character of a run are left
/// alone, so `(2008)` stays `(2008)` and `'em` becomes `'Em`.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    // True once the current run has reached its first word character.
    let mut in_word = false;

    for c in input.chars() {
        if c.is_whitespace() {
            in_word = false;
            out.push(c);
        } else if in_word {
            out.push(c.to_ascii_lowercase());
        } else if is_word_char(c) {
            in_word = true;
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
