//! Quote and cart route handlers.
//!
//! The cart belongs to the session's order flow; handlers only drive
//! transitions and reshape the result for the rendering layer.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use ventanas_perfectas_core::order::{Cart, CartLine};
use ventanas_perfectas_core::pricing;
use ventanas_perfectas_core::{CartLineId, WindowConfig};

use crate::error::Result;
use crate::sessions::session_flow;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub id: CartLineId,
    /// e.g. "Corredera de PVC"
    pub summary: String,
    /// e.g. "120cm x 100cm | Veka Softline 70 | Doble | Color: Blanco"
    pub detail: String,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    #[serde(rename = "displayPrice")]
    pub display_price: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            summary: line.config.summary(),
            detail: line.config.detail(),
            unit_price: line.unit_price,
            display_price: pricing::display_eur(line.unit_price),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    #[serde(rename = "itemCount")]
    pub item_count: usize,
    /// Sum of the VAT-inclusive line prices.
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
    #[serde(rename = "displayTotal")]
    pub display_total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            item_count: cart.len(),
            total_cost: cart.total_cost(),
            display_total: pricing::display_eur(cart.total_cost()),
        }
    }
}

/// Quote request body.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub config: WindowConfig,
}

/// Quote response body.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// Final VAT-inclusive price, unrounded.
    pub price: f64,
    /// Price formatted for display, e.g. "596.12 €".
    pub display: String,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub config: WindowConfig,
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    #[serde(rename = "lineId")]
    pub line_id: CartLineId,
}

/// Quote a configuration without touching the cart.
///
/// POST /api/quote
#[instrument(skip(state, session, request))]
pub async fn quote(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let flow = session_flow(&session, state.flows()).await?;
    let price = flow.lock().await.quote(&request.config);

    Ok(Json(QuoteResponse {
        price,
        display: pricing::display_eur(price),
    }))
}

/// Add a configured window to the cart.
///
/// POST /api/cart/add
#[instrument(skip(state, session, request))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let flow = session_flow(&session, state.flows()).await?;
    let mut flow = flow.lock().await;

    let id = flow.add_to_cart(request.config)?;
    tracing::info!(line_id = %id, items = flow.cart().len(), "Cart line added");

    Ok(Json(CartView::from(flow.cart())))
}

/// Remove a cart line.
///
/// POST /api/cart/remove
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let flow = session_flow(&session, state.flows()).await?;
    let mut flow = flow.lock().await;

    flow.remove_from_cart(request.line_id)?;

    Ok(Json(CartView::from(flow.cart())))
}
