//! Canonical media identifiers.
//!
//! A [`MediaId`] is a plain string derived from file and directory names (see
//! the `vidshelf-parser` crate for the grammar). It doubles as the file name
//! of the side-car metadata document, so it is kept as an opaque newtype to
//! avoid mixing it up with titles or paths.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::path::{Component, Path};

/// Stable identifier for a movie, show or episode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    /// Wrap an already-derived identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name `{id}.{extension}`, if that is a single plain path
    /// component.
    ///
    /// IDs come from directory entries, so they never contain a separator in
    /// practice; IDs supplied by HTTP clients go through this check before
    /// they are joined onto the metadata directory. A dot-only ID such as
    /// `..` is fine here because the extension is always appended.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> Option<String> {
        if self.0.is_empty() || self.0.contains('\0') {
            return None;
        }

        let name = format!("{}.{}", self.0, extension);
        let mut components = Path::new(&name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(name),
            _ => None,
        }
    }
}

impl From<String> for MediaId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for MediaId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<MediaId> for String {
    fn from(id: MediaId) -> Self {
        id.0
    }
}

impl AsRef<str> for MediaId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MediaId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for MediaId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MediaId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
