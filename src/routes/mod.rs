//! API Routes
//!
//! HTTP endpoints of the service:
//! - `/` - Welcome message
//! - `/health` - Liveness check
//! - `/process-file/` - Document upload and summarization
//! - `/chat` - Single-turn chat
//!
//! Both hosting adapters (standalone server and Azure Functions custom
//! handler) serve this exact router.

pub mod chat;
pub mod error;
pub mod files;
pub mod health;
pub mod root;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!(hosting = ?state.config.server.hosting, "Creating application router");

    let max_upload_bytes = state.config.server.max_upload_bytes;
    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(root::router(state.clone()))
        .merge(health::router(state.clone()))
        .merge(files::router(state.clone()))
        .merge(chat::router(state))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
