//! Direct streaming with HTTP range requests.
//!
//! Serves catalog videos straight from disk. The body is streamed in chunks
//! from a seeked file handle, so memory use does not depend on file size and
//! a client disconnect drops the handle.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use std::io::SeekFrom;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tracing::debug;
use vidshelf_common::Error;

use crate::server::{AppContext, AppError};

/// Inclusive byte range within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered; never zero.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value for a file of `file_size` bytes.
    pub fn content_range(&self, file_size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, file_size)
    }
}

/// Serve a movie or episode with range request support.
pub async fn stream_media(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let file_path = ctx.library.resolve_stream_path(&id).await?;

    // The catalog may be older than the file system.
    let metadata = match tokio::fs::metadata(&file_path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::not_found(id).into());
        }
        Err(e) => return Err(Error::from(e).into()),
    };
    let file_size = metadata.len();

    // Parse range header if present
    let range = headers
        .get(header::RANGE)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| parse_range_header(s, file_size));

    let extension = file_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let content_type = vidshelf_parser::mime_type(extension);

    let mut file = File::open(&file_path).await.map_err(Error::from)?;

    let response = match range {
        Some(range) => {
            debug!(id = %id, start = range.start, end = range.end, "Serving partial content");

            file.seek(SeekFrom::Start(range.start))
                .await
                .map_err(Error::from)?;

            let body = Body::from_stream(ReaderStream::new(file.take(range.length())));

            Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, range.length().to_string())
                .header(header::CONTENT_RANGE, range.content_range(file_size))
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
        }
        None => {
            let body = Body::from_stream(ReaderStream::new(file));

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, file_size.to_string())
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
        }
    };

    response.map_err(|e| Error::internal(format!("failed to build response: {}", e)).into())
}

/// Parse an HTTP `Range` header against a file of `file_size` bytes.
///
/// Supports formats:
/// - bytes=0-499
/// - bytes=500- (to the end)
/// - bytes=-500 (last 500 bytes)
///
/// Anything else, including multiple ranges and ranges that cannot be
/// satisfied, yields `None` and the whole file is served.
pub fn parse_range_header(header: &str, file_size: u64) -> Option<ByteRange> {
    let ranges = header.trim().strip_prefix("bytes=")?;
    if ranges.contains(',') || file_size == 0 {
        return None;
    }

    let (start, end) = ranges.split_once('-')?;
    let start = start.trim();
    let end = end.trim();
    let last = file_size - 1;

    match (start.is_empty(), end.is_empty()) {
        // bytes=-500 (last 500 bytes)
        (true, false) => {
            let suffix_len: u64 = end.parse().ok()?;
            if suffix_len == 0 {
                return None;
            }
            Some(ByteRange {
                start: file_size.saturating_sub(suffix_len),
                end: last,
            })
        }
        // bytes=500- (from 500 to end)
        (false, true) => {
            let start: u64 = start.parse().ok()?;
            if start > last {
                return None;
            }
            Some(ByteRange { start, end: last })
        }
        // bytes=0-499
        (false, false) => {
            let start: u64 = start.parse().ok()?;
            let end: u64 = end.parse().ok()?;
            if start > last || start > end {
                return None;
            }
            Some(ByteRange {
                start,
                end: end.min(last),
            })
        }
        // bytes=- (invalid)
        (true, true) => None,
    }
}
