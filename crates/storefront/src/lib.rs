//! Ventanas Perfectas Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod gemini;
pub mod routes;
pub mod sessions;
pub mod state;

use axum::{Router, routing::get};

/// Build the full application router over a prepared state.
///
/// The binary and the integration tests share this assembly.
#[must_use]
pub fn app(state: state::AppState) -> Router {
    let session_layer = sessions::create_session_layer(state.config().session_ttl_minutes);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
