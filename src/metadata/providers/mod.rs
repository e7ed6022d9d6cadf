//! Concrete metadata provider implementations.
//!
//! Each submodule wraps a single external service and implements the
//! [`MetadataProvider`](super::MetadataProvider) trait.

pub mod http;

pub use http::HttpMetadataProvider;
