//! Common error types used throughout vidshelf.
//!
//! The variants follow the failure classes of the catalog: the media root
//! cannot be listed, an ID does not resolve, a side-car document is corrupt,
//! or the metadata provider failed.

use std::path::PathBuf;

/// Common error type for vidshelf.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A library root could not be created or listed.
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The requested ID does not resolve to anything in the catalog.
    #[error("Media not found: {0}")]
    NotFound(String),

    /// A side-car metadata document exists but cannot be parsed.
    #[error("Corrupt metadata for {id}: {source}")]
    MetadataCorrupt {
        /// ID whose document is corrupt.
        id: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The metadata provider failed to produce a record.
    #[error("Metadata provider error: {0}")]
    Provider(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Filesystem error for `path`.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new MetadataCorrupt error.
    pub fn metadata_corrupt<S: Into<String>>(id: S, source: serde_json::Error) -> Self {
        Self::MetadataCorrupt {
            id: id.into(),
            source,
        }
    }

    /// Create a new Provider error.
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code this error maps to.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::Provider(_) => 502,
            Self::Filesystem { .. }
            | Self::MetadataCorrupt { .. }
            | Self::Io(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Filesystem { .. } => "filesystem_error",
            Self::NotFound(_) => "not_found",
            Self::MetadataCorrupt { .. } => "metadata_corrupt",
            Self::Provider(_) => "provider_error",
            Self::Io(_) => "io_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether this is an expected "nothing here" outcome rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
