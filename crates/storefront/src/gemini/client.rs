//! Gemini API client.
//!
//! Provides structured config extraction and a streaming chat relay over
//! the `generateContent` / `streamGenerateContent` endpoints.

use std::sync::Arc;

use async_stream::stream;
use futures::stream::BoxStream;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use ventanas_perfectas_core::{ChatMessage, PartialWindowConfig};

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::prompts;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
///
/// Cheap to clone; the underlying HTTP client is shared.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    config_model: String,
    chat_model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &GeminiConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(GeminiClientInner {
                client,
                config_model: config.config_model.clone(),
                chat_model: config.chat_model.clone(),
            }),
        }
    }

    /// Extract a partial window configuration from a free-text description.
    ///
    /// Any subset of fields may come back; unrecognized values degrade to
    /// absent fields at the parsing layer rather than failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns an error response
    /// or produces unparseable content.
    #[instrument(skip(self, description), fields(model = %self.inner.config_model))]
    pub async fn extract_config(
        &self,
        description: &str,
    ) -> Result<PartialWindowConfig, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::with_role(
                "user",
                prompts::extraction_prompt(description),
            )],
            system_instruction: Some(Content::text(prompts::EXTRACTION_SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(prompts::extraction_response_schema()),
            }),
        };

        let url = format!(
            "{GEMINI_API_BASE}/{}:generateContent",
            self.inner.config_model
        );
        let response = self.inner.client.post(&url).json(&request).send().await?;
        let body: GenerateContentResponse = self.handle_response(response).await?;

        let text = body.text().ok_or(GeminiError::MissingContent)?;
        serde_json::from_str(text.trim())
            .map_err(|e| GeminiError::Parse(format!("extraction was not valid JSON: {e}")))
    }

    /// Stream a chat response for a transcript.
    ///
    /// Returns the assistant's reply as a forward-only sequence of text
    /// fragments, detached from the client's lifetime; the stream ends when
    /// the backend finishes. Transport failures mid-stream surface as an
    /// `Err` item and terminate the sequence without discarding fragments
    /// already yielded.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial request fails.
    #[instrument(skip(self, history), fields(model = %self.inner.chat_model, turns = history.len()))]
    pub async fn chat_stream(
        &self,
        history: &[ChatMessage],
    ) -> Result<BoxStream<'static, Result<String, GeminiError>>, GeminiError> {
        let request = GenerateContentRequest {
            contents: history.iter().map(Content::from).collect(),
            system_instruction: Some(Content::text(prompts::chat_system_instruction())),
            generation_config: None,
        };

        let url = format!(
            "{GEMINI_API_BASE}/{}:streamGenerateContent?alt=sse",
            self.inner.chat_model
        );
        let response = self.inner.client.post(&url).json(&request).send().await?;

        // Check for error responses before streaming
        let status = response.status();
        if !status.is_success() {
            return Err(self.handle_error_status(status, response).await);
        }

        // Return a stream that parses SSE events into text fragments
        Ok(Box::pin(stream! {
            use futures::StreamExt;

            let mut buffer = String::new();
            let mut byte_stream = std::pin::pin!(response.bytes_stream());

            while let Some(chunk_result) = byte_stream.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        let text = match std::str::from_utf8(&chunk) {
                            Ok(t) => t,
                            Err(e) => {
                                yield Err(GeminiError::Parse(format!("Invalid UTF-8: {e}")));
                                continue;
                            }
                        };

                        buffer.push_str(text);

                        // Process complete SSE events
                        while let Some(event) = extract_sse_event(&mut buffer) {
                            if let Some(parsed) = parse_sse_fragment(&event) {
                                match parsed {
                                    Ok(fragment) => yield Ok(fragment),
                                    Err(e) => yield Err(e),
                                }
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(GeminiError::Stream(e.to_string()));
                    }
                }
            }
        }))
    }

    /// Handle a successful response.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        match response.text().await {
            Ok(body) => {
                let message = serde_json::from_str::<ApiErrorResponse>(&body)
                    .map_or(body, |api_error| api_error.error.message);
                GeminiError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
            Err(e) => GeminiError::Http(e),
        }
    }
}

/// Extract a complete SSE event from the buffer.
///
/// Returns `Some(event)` if a complete event was found (and removes it from
/// buffer), or `None` if no complete event is available yet.
fn extract_sse_event(buffer: &mut String) -> Option<String> {
    // SSE events are separated by double newlines
    buffer.find("\n\n").map(|idx| {
        let event = buffer[..idx].to_string();
        *buffer = buffer[idx + 2..].to_string();
        event
    })
}

/// Parse an SSE event into the text fragment it carries.
///
/// Returns `None` for empty events, the `[DONE]` marker and frames without
/// candidate text (finish metadata); `Some(Err(_))` for unparseable data.
fn parse_sse_fragment(event: &str) -> Option<Result<String, GeminiError>> {
    // Skip empty events
    if event.trim().is_empty() {
        return None;
    }

    // Parse SSE format: "data: <json>"
    let mut data_line = None;

    for line in event.lines() {
        if let Some(stripped) = line.strip_prefix("data: ") {
            data_line = Some(stripped);
        }
    }

    let data = data_line?;

    if data == "[DONE]" {
        return None;
    }

    match serde_json::from_str::<GenerateContentResponse>(data) {
        Ok(response) => {
            let text = response.text()?;
            if text.is_empty() { None } else { Some(Ok(text)) }
        }
        Err(e) => Some(Err(GeminiError::Parse(format!(
            "Failed to parse stream event: {e}"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_extract_sse_event() {
        let mut buffer = "data: {\"candidates\":[]}\n\ndata: {\"candidates\":[]}\n\n".to_string();

        let event1 = extract_sse_event(&mut buffer);
        assert!(event1.is_some());

        let event2 = extract_sse_event(&mut buffer);
        assert!(event2.is_some());

        let event3 = extract_sse_event(&mut buffer);
        assert!(event3.is_none());
    }

    #[test]
    fn test_extract_sse_event_incomplete() {
        let mut buffer = "data: {\"partial".to_string();
        let event = extract_sse_event(&mut buffer);
        assert!(event.is_none());
        assert_eq!(buffer, "data: {\"partial");
    }

    #[test]
    fn test_extract_sse_event_split_across_chunks() {
        let mut buffer = "data: {\"candidates\":".to_string();
        assert!(extract_sse_event(&mut buffer).is_none());

        buffer.push_str("[]}\n\n");
        let event = extract_sse_event(&mut buffer);
        assert_eq!(event.as_deref(), Some("data: {\"candidates\":[]}"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_parse_sse_fragment_text() {
        let event = r#"data: {"candidates":[{"content":{"role":"model","parts":[{"text":"Hola"}]}}]}"#;
        let fragment = parse_sse_fragment(event).expect("fragment").expect("ok");
        assert_eq!(fragment, "Hola");
    }

    #[test]
    fn test_parse_sse_fragment_skips_metadata_frames() {
        // Final frames carry no candidates, only usage metadata.
        let event = r#"data: {"usageMetadata":{"totalTokenCount":42}}"#;
        assert!(parse_sse_fragment(event).is_none());
    }

    #[test]
    fn test_parse_sse_fragment_empty_event() {
        assert!(parse_sse_fragment("").is_none());
        assert!(parse_sse_fragment("data: [DONE]").is_none());
    }

    #[test]
    fn test_parse_sse_fragment_malformed_json() {
        let result = parse_sse_fragment("data: {not json");
        assert!(matches!(result, Some(Err(GeminiError::Parse(_)))));
    }

    #[test]
    fn test_gemini_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<GeminiClient>();
        assert_send_sync::<GeminiClient>();
    }

    #[test]
    fn test_client_construction() {
        let config = GeminiConfig {
            api_key: SecretString::from("AIzaTestKey1234567890"),
            config_model: "gemini-2.5-flash".to_string(),
            chat_model: "gemini-flash-latest".to_string(),
        };
        let client = GeminiClient::new(&config);
        assert_eq!(client.inner.config_model, "gemini-2.5-flash");
        assert_eq!(client.inner.chat_model, "gemini-flash-latest");
    }
}
