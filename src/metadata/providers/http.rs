//! Generative metadata provider reached over HTTP.
//!
//! Implements [`MetadataProvider`] by POSTing a [`GenerateRequest`] as JSON to
//! a configured endpoint and reading a [`GeneratedMetadata`] document back.
//!
//! Features:
//! - Optional bearer API key.
//! - Configurable request timeout.
//! - Responses with blank text fields or no thumbnail are rejected.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::metadata::provider::{GenerateRequest, GeneratedMetadata, MetadataProvider};

// ---------------------------------------------------------------------------
// Response type (private)
// ---------------------------------------------------------------------------

/// Lenient view of the response so that missing fields surface as the
/// provider's own failure messages instead of JSON errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProviderResponse {
    title: String,
    description: String,
    ai_hint: String,
    thumbnail_data_uri: String,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// HTTP metadata provider.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use vidshelf::metadata::providers::HttpMetadataProvider;
///
/// let provider = HttpMetadataProvider::new(
///     "http://localhost:3400/generate",
///     None,
///     Duration::from_secs(120),
/// )
/// .unwrap();
/// ```
pub struct HttpMetadataProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpMetadataProvider {
    /// Create a provider that POSTs to `endpoint`.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client for metadata provider")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Build the provider from the `[provider]` config section.
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .context("provider endpoint is not configured")?;
        Self::new(
            endpoint,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Endpoint the provider posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MetadataProvider for HttpMetadataProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    fn is_available(&self) -> bool {
        !self.endpoint.is_empty()
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GeneratedMetadata> {
        debug!(
            endpoint = %self.endpoint,
            file = %request.file_name,
            payload_bytes = request.video_data_uri.len(),
            "Requesting generated metadata"
        );

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let body: ProviderResponse = builder
            .send()
            .await
            .with_context(|| format!("metadata provider request failed: {}", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("metadata provider returned error: {}", self.endpoint))?
            .json()
            .await
            .context("failed to parse metadata provider response")?;

        if body.title.trim().is_empty()
            || body.description.trim().is_empty()
            || body.ai_hint.trim().is_empty()
        {
            bail!("could not generate text metadata");
        }
        if body.thumbnail_data_uri.trim().is_empty() {
            bail!("could not generate thumbnail");
        }

        Ok(GeneratedMetadata {
            title: body.title,
            description: body.description,
            ai_hint: body.ai_hint,
            thumbnail_data_uri: body.thumbnail_data_uri,
        })
    }
}
