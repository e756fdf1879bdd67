//! AI assistant route handler.
//!
//! One endpoint serves both assistant operations behind a typed envelope:
//! structured config extraction (JSON response) and the chat relay (SSE
//! response). The envelope mirrors what the configurator frontend sends.

use std::convert::Infallible;

use async_stream::stream;
use axum::{
    Json,
    extract::State,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ventanas_perfectas_core::catalog;
use ventanas_perfectas_core::{ChatMessage, PartialWindowConfig};

use crate::content;
use crate::error::Result;
use crate::state::AppState;

/// Request envelope, `{"type": ..., "payload": ...}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum AssistantRequest {
    /// Extract a window configuration from a free-text description.
    Config { prompt: String },
    /// Stream a chat reply for the transcript so far.
    Chat { history: Vec<ChatMessage> },
}

/// One SSE chat fragment, `{"text": "..."}`.
#[derive(Debug, Serialize)]
struct ChatFragment {
    text: String,
}

/// Drive the AI assistant.
///
/// POST /api/assistant
#[instrument(skip(state, request))]
pub async fn assistant(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Result<Response> {
    match request {
        AssistantRequest::Config { prompt } => extract_config(&state, &prompt).await,
        AssistantRequest::Chat { history } => chat(&state, history).await,
    }
}

/// Handle a config-extraction request.
///
/// The extracted partial config merges over the client's current form;
/// failures surface as a transient message and leave it untouched.
async fn extract_config(state: &AppState, prompt: &str) -> Result<Response> {
    let mut partial: PartialWindowConfig = state.gemini().extract_config(prompt).await?;

    // Snap loose color descriptions onto the palette.
    if let Some(color) = partial.color.take() {
        partial.color = Some(catalog::normalize_color(&color));
    }

    tracing::info!(?partial, "Configuration extracted");
    Ok(Json(partial).into_response())
}

/// Handle a chat request: relay the upstream token stream as SSE.
///
/// If the upstream stream drops mid-response the fragments already sent
/// stand, the fixed apology note goes out as a final fragment, and the
/// stream ends; the customer may simply send a new message.
async fn chat(state: &AppState, history: Vec<ChatMessage>) -> Result<Response> {
    let upstream = state.gemini().chat_stream(&history).await?;

    let events = stream! {
        let mut upstream = upstream;

        while let Some(item) = upstream.next().await {
            match item {
                Ok(text) => {
                    if let Ok(event) = Event::default().json_data(ChatFragment { text }) {
                        yield Ok::<Event, Infallible>(event);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Chat stream dropped mid-response");
                    if let Ok(event) = Event::default().json_data(ChatFragment {
                        text: content::CHAT_ERROR_NOTE.to_string(),
                    }) {
                        yield Ok(event);
                    }
                    break;
                }
            }
        }
    };

    Ok(Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_config_request() {
        let json = r#"{"type": "config", "payload": {"prompt": "una ventana abatible"}}"#;
        let request: AssistantRequest = serde_json::from_str(json).expect("deserialize");
        assert!(matches!(
            request,
            AssistantRequest::Config { prompt } if prompt == "una ventana abatible"
        ));
    }

    #[test]
    fn test_envelope_chat_request() {
        let json = r#"{
            "type": "chat",
            "payload": {"history": [
                {"role": "assistant", "text": "¡Hola!"},
                {"role": "user", "text": "¿Plazo de entrega?"}
            ]}
        }"#;
        let request: AssistantRequest = serde_json::from_str(json).expect("deserialize");
        match request {
            AssistantRequest::Chat { history } => {
                assert_eq!(history.len(), 2);
                assert_eq!(history[1].text, "¿Plazo de entrega?");
            }
            AssistantRequest::Config { .. } => panic!("expected chat"),
        }
    }

    #[test]
    fn test_envelope_rejects_unknown_type() {
        let json = r#"{"type": "image", "payload": {}}"#;
        assert!(serde_json::from_str::<AssistantRequest>(json).is_err());
    }

    #[test]
    fn test_chat_fragment_wire_shape() {
        let fragment = ChatFragment {
            text: "Hola".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&fragment).expect("serialize"),
            r#"{"text":"Hola"}"#
        );
    }
}
