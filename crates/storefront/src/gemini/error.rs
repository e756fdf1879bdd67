//! Error types for the Gemini API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API.
///
/// All of these are recoverable: the assistant surfaces them as a transient
/// message and the customer may simply retry.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini API returned an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status returned by the API.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Stream error mid-response.
    #[error("stream error: {0}")]
    Stream(String),

    /// The response carried no candidate content.
    #[error("response carried no content")]
    MissingContent,
}

/// API error response envelope from Gemini.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Numeric status code.
    pub code: u16,
    /// Error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_error_display() {
        let err = GeminiError::Api {
            status: 400,
            message: "Invalid JSON payload".to_string(),
        };
        assert_eq!(err.to_string(), "API error (400): Invalid JSON payload");

        let err = GeminiError::MissingContent;
        assert_eq!(err.to_string(), "response carried no content");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "code": 429,
                "message": "Resource has been exhausted",
                "status": "RESOURCE_EXHAUSTED"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.code, 429);
        assert_eq!(response.error.message, "Resource has been exhausted");
    }
}
