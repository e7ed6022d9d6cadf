//! `data:` URI encoding for provider payloads.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        extension_for_mime(&self.mime)
    }
}

/// Encode bytes as a base64 data URI.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Parse a base64 data URI.
///
/// Only the base64 form is accepted; media-type parameters such as
/// `;charset=` are dropped.
pub fn decode(uri: &str) -> Result<DataUri> {
    let rest = uri.strip_prefix("data:").context("not a data URI")?;
    let (header, payload) = rest
        .split_once(',')
        .context("data URI has no payload separator")?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        bail!("data URI is not base64 encoded");
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .context("invalid base64 payload in data URI")?;

    let mime = if mime.is_empty() {
        "application/octet-stream".to_string()
    } else {
        mime
    };

    Ok(DataUri { mime, bytes })
}

/// Extension used when persisting an image of the given MIME type.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime.to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}
