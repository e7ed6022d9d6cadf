//! Library API routes.
//!
//! JSON views of the catalog: the full top-level listing, one show with its
//! seasons, and one playable item (movie or episode).

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use vidshelf_common::{Error, LibraryItem, Playable, Show};

use super::{AppContext, AppError};

/// Create library routes.
pub fn library_routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(api_health))
        .route("/library", get(list_library))
        .route("/shows/:id", get(get_show))
        .route("/media/:id", get(get_media))
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/health
pub async fn api_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/library -- top-level movies and shows in snapshot order.
pub async fn list_library(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<LibraryItem>>, AppError> {
    let snapshot = ctx.library.snapshot().await?;
    Ok(Json(snapshot.items().to_vec()))
}

/// GET /api/shows/:id
pub async fn get_show(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Show>, AppError> {
    let found = ctx.library.find_show_by_id(&id).await?;
    found.map(Json).ok_or_else(|| Error::not_found(id).into())
}

/// GET /api/media/:id -- a movie or an episode.
pub async fn get_media(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Playable>, AppError> {
    let found = ctx.library.find_playable_by_id(&id).await?;
    found.map(Json).ok_or_else(|| Error::not_found(id).into())
}
