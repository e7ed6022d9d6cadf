use crate::config::Config;
use crate::library::Library;
use crate::streaming;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod error;
pub mod routes_library;

pub use error::AppError;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub library: Arc<Library>,
    pub config: Arc<Config>,
}

impl AppContext {
    /// Build the context described by `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let library = Library::from_config(&config)?;
        Ok(Self {
            library: Arc::new(library),
            config: Arc::new(config),
        })
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers([header::CONTENT_TYPE, header::RANGE]);

    // Static trees behind videoUrl, subtitlesUrl and generated thumbnails
    let media_files = ServeDir::new(ctx.library.scanner().media_root());
    let metadata_files = ServeDir::new(ctx.library.scanner().store().root());

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // API routes
        .nest("/api", routes_library::library_routes())
        .nest("/api/stream", streaming::stream_router())
        .nest_service("/media", media_files)
        .nest_service("/metadata", metadata_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::from_config(config)?;

    // Fail fast on an unusable media root instead of on the first request.
    let snapshot = ctx
        .library
        .snapshot()
        .await
        .context("Failed to build the initial catalog")?;
    tracing::info!("Library contains {} top-level items", snapshot.len());

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
