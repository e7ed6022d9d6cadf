//! Media streaming module.
//!
//! # Routes
//!
//! - `GET /api/stream/{id}` - Movie or episode with range support

mod direct;

pub use direct::{parse_range_header, stream_media, ByteRange};

use axum::{routing::get, Router};

use crate::server::AppContext;

/// Create direct streaming router.
pub fn stream_router() -> Router<AppContext> {
    Router::new().route("/:id", get(stream_media))
}
