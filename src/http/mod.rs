//! HTTP server exposing the site directory as a small JSON API.

pub mod dto;
pub mod handlers;

pub use dto::{HealthResponse, SiteListResponse, SiteStatus};

use crate::error::{server_error, ServiceResult};
use crate::sites::SiteDirectoryHandle;
use axum::routing::get;
use axum::Router;
use chrono_tz::Tz;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Directory of drop-off sites
    pub directory: SiteDirectoryHandle,
    /// Timezone the schedule texts are written in
    pub timezone: Tz,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/sites", get(handlers::sites_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the listener and serve the API
pub async fn serve(state: AppState, port: u16) -> ServiceResult<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| server_error(&format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| server_error(&format!("Server error: {}", e)))?;

    Ok(())
}
