//! Vidshelf-Common: Shared types and errors.
//!
//! This crate provides the vocabulary used across vidshelf:
//!
//! - **Canonical IDs**: [`MediaId`], the stable string identifier derived from
//!   file and directory names
//! - **Catalog entities**: movies, shows, seasons and episodes, plus the
//!   closed unions [`LibraryItem`] and [`Playable`]
//! - **Metadata records**: the side-car document attached to every ID
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use vidshelf_common::{Error, MediaId, MetadataRecord, Result};
//!
//! let id = MediaId::new("inception");
//! let record = MetadataRecord::placeholder("Inception", false);
//! assert_eq!(record.ai_hint, "movie video");
//!
//! fn lookup() -> Result<()> {
//!     Err(Error::not_found("inception"))
//! }
//! assert!(lookup().is_err());
//! # let _ = id;
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::MediaId;
pub use types::*;
