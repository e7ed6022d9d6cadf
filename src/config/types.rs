use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metadata::DEFAULT_MAX_VIDEO_BYTES;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    9002
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Root scanned for movies and show directories
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Where side-car JSON documents and thumbnails are kept
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: PathBuf,

    /// Reuse the last snapshot while the media and metadata trees are unchanged
    #[serde(default)]
    pub cache_snapshots: bool,
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("./public/media")
}

fn default_metadata_dir() -> PathBuf {
    PathBuf::from("./public/metadata")
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
            metadata_dir: default_metadata_dir(),
            cache_snapshots: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Ask the generative provider for metadata of new videos
    #[serde(default)]
    pub enabled: bool,

    /// URL the provider request is POSTed to
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Sent as `Authorization: Bearer <key>` when set
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Videos larger than this are not sent (default: 20 MiB)
    #[serde(default = "default_max_video_bytes")]
    pub max_video_bytes: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_video_bytes() -> u64 {
    DEFAULT_MAX_VIDEO_BYTES
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_video_bytes: default_max_video_bytes(),
        }
    }
}
