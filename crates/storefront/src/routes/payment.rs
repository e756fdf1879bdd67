//! Proof-of-payment route handler.
//!
//! Storage of the uploaded file is simulated: the file is read and
//! discarded, only its name and size drive the transition.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use ventanas_perfectas_core::flow::Step;
use ventanas_perfectas_core::order::PaymentProof;

use crate::error::{AppError, Result};
use crate::sessions::session_flow;
use crate::state::AppState;

/// Confirmation payload after a successful proof upload.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationView {
    pub step: Step,
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    pub proof: PaymentProof,
    pub message: String,
}

/// Receive the proof-of-payment upload and confirm the order.
///
/// POST /api/payment/proof (multipart, field "file")
#[instrument(skip(state, session, multipart))]
pub async fn upload_proof(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Json<ConfirmationView>> {
    let mut proof = PaymentProof {
        file_name: String::new(),
        size_bytes: 0,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        proof = PaymentProof {
            file_name,
            size_bytes: bytes.len() as u64,
        };
    }

    let flow = session_flow(&session, state.flows()).await?;
    let mut flow = flow.lock().await;

    flow.confirm_payment(&proof)?;

    let order_number = flow
        .order()
        .map(|order| order.order_number.clone())
        .unwrap_or_default();
    tracing::info!(
        order_number = %order_number,
        file = %proof.file_name,
        size = proof.size_bytes,
        "Payment proof received"
    );

    Ok(Json(ConfirmationView {
        step: flow.step(),
        message: format!(
            "Hemos recibido tu comprobante para el pedido {order_number}. \
             ¡Nos ponemos manos a la obra!"
        ),
        order_number,
        proof,
    }))
}
