//! Error-to-HTTP response conversion.
//!
//! Route handlers return `Result<T, AppError>` and use `?` on
//! [`vidshelf_common::Error`] directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vidshelf_common::Error;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Error {
        &self.inner
    }

    /// Message safe to show clients. Filesystem and I/O failures carry
    /// server paths and OS detail, so those are replaced.
    fn public_message(&self) -> String {
        match &self.inner {
            Error::Filesystem { .. } => "Media library is unavailable".to_string(),
            Error::Io(_) => "I/O error while reading media".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let body = json!({
            "error": self.public_message(),
            "code": self.inner.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}
