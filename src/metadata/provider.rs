//! Trait definition and wire types for metadata providers.
//!
//! A provider turns a video file into a title, description, image hint and
//! thumbnail. The store only asks a provider when an ID has no side-car
//! document yet.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Input sent to a provider for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// File name of the video, including its extension.
    pub file_name: String,
    /// Video content as a `data:<mime>;base64,<payload>` URI.
    pub video_data_uri: String,
}

/// Metadata produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMetadata {
    pub title: String,
    pub description: String,
    /// One or two keywords for an image search.
    pub ai_hint: String,
    /// Thumbnail image as a data URI.
    pub thumbnail_data_uri: String,
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Async trait that all metadata providers must implement.
///
/// Providers are shared behind an `Arc` by the metadata store, so they must
/// be `Send + Sync`.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"http"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when the provider is configured and ready to serve
    /// requests.
    fn is_available(&self) -> bool;

    /// Generate metadata for one video.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GeneratedMetadata>;
}
