//! Checkout and order placement route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use ventanas_perfectas_core::flow::Step;
use ventanas_perfectas_core::order::{ContactInfo, Order};
use ventanas_perfectas_core::pricing;

use crate::content::{self, PaymentInstructions};
use crate::error::Result;
use crate::sessions::session_flow;
use crate::state::AppState;

/// Current step, as returned by bare transition endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: Step,
    pub label: &'static str,
}

impl From<Step> for StepView {
    fn from(step: Step) -> Self {
        Self {
            step,
            label: step.label(),
        }
    }
}

/// The invoice payload rendered after order placement.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceView {
    pub company: CompanyView,
    pub order: Order,
    #[serde(rename = "displaySubtotal")]
    pub display_subtotal: String,
    #[serde(rename = "displayVat")]
    pub display_vat: String,
    #[serde(rename = "displayTotal")]
    pub display_total: String,
    pub payment: PaymentInstructions,
}

/// Company block printed at the top of the invoice.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyView {
    pub name: &'static str,
    pub address: &'static str,
}

impl From<&Order> for InvoiceView {
    fn from(order: &Order) -> Self {
        Self {
            company: CompanyView {
                name: content::COMPANY_NAME,
                address: content::COMPANY_ADDRESS,
            },
            order: order.clone(),
            display_subtotal: pricing::display_eur(order.subtotal),
            display_vat: pricing::display_eur(order.vat_amount),
            display_total: pricing::display_eur(order.total_cost),
            payment: PaymentInstructions::for_order(&order.order_number),
        }
    }
}

/// Move the session to checkout.
///
/// POST /api/checkout
#[instrument(skip(state, session))]
pub async fn proceed(State(state): State<AppState>, session: Session) -> Result<Json<StepView>> {
    let flow = session_flow(&session, state.flows()).await?;
    let mut flow = flow.lock().await;

    flow.proceed_to_checkout()?;

    Ok(Json(StepView::from(flow.step())))
}

/// Return from checkout to the configurator.
///
/// POST /api/checkout/back
#[instrument(skip(state, session))]
pub async fn back(State(state): State<AppState>, session: Session) -> Result<Json<StepView>> {
    let flow = session_flow(&session, state.flows()).await?;
    let mut flow = flow.lock().await;

    flow.back()?;

    Ok(Json(StepView::from(flow.step())))
}

/// Place the order and return the invoice.
///
/// POST /api/order
#[instrument(skip(state, session, contact), fields(email = %contact.email))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Json(contact): Json<ContactInfo>,
) -> Result<Json<InvoiceView>> {
    let flow = session_flow(&session, state.flows()).await?;
    let mut flow = flow.lock().await;

    let order = flow.place_order(contact)?;
    tracing::info!(
        order_number = %order.order_number,
        lines = order.lines.len(),
        "Order placed"
    );

    Ok(Json(InvoiceView::from(order)))
}
