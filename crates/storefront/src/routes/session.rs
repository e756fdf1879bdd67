//! Session overview and reset route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use ventanas_perfectas_core::flow::Step;

use crate::content;
use crate::error::Result;
use crate::routes::cart::CartView;
use crate::routes::checkout::InvoiceView;
use crate::sessions::session_flow;
use crate::state::AppState;

/// Everything the rendering layer needs to draw the current screen.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub step: Step,
    #[serde(rename = "stepLabel")]
    pub step_label: &'static str,
    pub cart: CartView,
    /// Present once an order has been placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<InvoiceView>,
    /// Seed message for the assistant chat widget.
    #[serde(rename = "chatGreeting")]
    pub chat_greeting: &'static str,
}

/// Current session state.
///
/// GET /api/session
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<SessionView>> {
    let flow = session_flow(&session, state.flows()).await?;
    let flow = flow.lock().await;

    Ok(Json(SessionView {
        step: flow.step(),
        step_label: flow.step().label(),
        cart: CartView::from(flow.cart()),
        invoice: flow.order().map(InvoiceView::from),
        chat_greeting: content::CHAT_GREETING,
    }))
}

/// Discard the confirmed order and start a new one.
///
/// POST /api/session/reset
#[instrument(skip(state, session))]
pub async fn reset(State(state): State<AppState>, session: Session) -> Result<Json<SessionView>> {
    let flow = session_flow(&session, state.flows()).await?;
    let mut flow = flow.lock().await;

    flow.start_new_order()?;

    Ok(Json(SessionView {
        step: flow.step(),
        step_label: flow.step().label(),
        cart: CartView::from(flow.cart()),
        invoice: None,
        chat_greeting: content::CHAT_GREETING,
    }))
}
