//! Side-car metadata for catalog entities.
//!
//! # Module layout
//!
//! - [`store`] -- Reads and lazily creates `{metadata_dir}/{id}.json`.
//! - [`provider`] -- Trait definition and wire types for metadata generators.
//! - [`providers`] -- Concrete provider implementations.
//! - [`data_uri`] -- Base64 `data:` URI helpers for provider payloads.

pub mod data_uri;
pub mod provider;
pub mod providers;
pub mod store;

pub use provider::{GenerateRequest, GeneratedMetadata, MetadataProvider};
pub use providers::HttpMetadataProvider;
pub use store::{MetadataRequest, MetadataStore, DEFAULT_MAX_VIDEO_BYTES};

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;

/// Build the metadata store described by `config`.
///
/// The HTTP provider is attached only when `[provider]` is enabled.
pub fn store_from_config(config: &Config) -> Result<MetadataStore> {
    let store = MetadataStore::new(config.library.metadata_dir.clone())
        .with_max_video_bytes(config.provider.max_video_bytes);

    if !config.provider.enabled {
        return Ok(store);
    }

    let provider = HttpMetadataProvider::from_config(&config.provider)?;
    tracing::info!(endpoint = %provider.endpoint(), "Metadata provider enabled");
    Ok(store.with_provider(Arc::new(provider)))
}
