//! Gemini API client for the AI design assistant.
//!
//! Two operations back the assistant: structured extraction of a window
//! configuration from free text, and a streamed chat grounded in the
//! product knowledge base.

pub mod client;
pub mod error;
pub mod prompts;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
