//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which owns a temporary media tree, a matching
//! config, and a full [`AppContext`]. The [`TestHarness::with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use tempfile::TempDir;

use vidshelf::config::Config;
use vidshelf::server::{create_router, AppContext};

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// temporary directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a harness with an empty media tree and default settings.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a harness, letting `customize` adjust the config after the
    /// media and metadata directories have been pointed at the tempdir.
    pub fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let dir = TempDir::new().expect("failed to create tempdir");
        let mut config = Config::default();
        config.library.media_dir = dir.path().join("media");
        config.library.metadata_dir = dir.path().join("metadata");
        customize(&mut config);

        std::fs::create_dir_all(&config.library.media_dir).unwrap();

        let ctx = AppContext::from_config(config).expect("failed to build context");
        Self { ctx, dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::new().serve().await
    }

    /// Start serving this harness on a random port.
    pub async fn serve(self) -> (Self, SocketAddr) {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (self, addr)
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    pub fn media_dir(&self) -> &Path {
        &self.ctx.config.library.media_dir
    }

    pub fn metadata_dir(&self) -> &Path {
        &self.ctx.config.library.metadata_dir
    }

    /// Write `bytes` at `rel` under the media root, creating parents.
    pub fn add_media(&self, rel: &str, bytes: &[u8]) -> PathBuf {
        let path = self.media_dir().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Write a side-car record for `id` before the first build sees it.
    pub fn add_metadata(&self, id: &str, json: &str) -> PathBuf {
        std::fs::create_dir_all(self.metadata_dir()).unwrap();
        let path = self.metadata_dir().join(format!("{id}.json"));
        std::fs::write(&path, json).unwrap();
        path
    }
}

/// Deterministic payload used as fake video content.
pub fn video_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
