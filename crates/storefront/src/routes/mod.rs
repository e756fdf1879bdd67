//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Session & lifecycle
//! GET  /api/session            - Current step, cart and invoice
//! POST /api/session/reset      - Start a new order (clears cart and order)
//!
//! # Configurator & cart
//! POST /api/quote              - Price a configuration (no state change)
//! POST /api/cart/add           - Add a configured window to the cart
//! POST /api/cart/remove        - Remove a cart line
//!
//! # Checkout
//! POST /api/checkout           - Proceed to checkout (guard: cart non-empty)
//! POST /api/checkout/back      - Return to the configurator
//! POST /api/order              - Place the order (guard: all contact fields)
//! POST /api/payment/proof      - Upload proof of payment (multipart)
//!
//! # AI assistant
//! POST /api/assistant          - {type: "config"|"chat", payload: ...}
//!                                config -> JSON partial configuration
//!                                chat   -> SSE stream of {"text": ...}
//!
//! # Content
//! GET  /api/content/faq        - FAQ entries
//! ```

pub mod assistant;
pub mod cart;
pub mod checkout;
pub mod content;
pub mod payment;
pub mod session;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Session & lifecycle
        .route("/api/session", get(session::show))
        .route("/api/session/reset", post(session::reset))
        // Configurator & cart
        .route("/api/quote", post(cart::quote))
        .nest("/api/cart", cart_routes())
        // Checkout
        .route("/api/checkout", post(checkout::proceed))
        .route("/api/checkout/back", post(checkout::back))
        .route("/api/order", post(checkout::place_order))
        .route("/api/payment/proof", post(payment::upload_proof))
        // AI assistant
        .route("/api/assistant", post(assistant::assistant))
        // Content
        .route("/api/content/faq", get(content::faq))
}
