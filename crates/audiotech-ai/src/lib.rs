//! AI engine for the AudioTech support assistant.
//!
//! Provides:
//! - the `AiClient` seam and a Google Gemini implementation
//! - the session manager owning the single conversational session
//! - the support persona's system instruction
//! - token usage tracking

pub mod gemini;
pub mod prompt;
pub mod session;
pub mod token_tracker;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use audiotech_common::Role;

pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::SYSTEM_INSTRUCTION;
pub use session::{ChatSession, SessionError, SessionManager, SessionSettings};
pub use token_tracker::TokenTracker;

/// A remote conversational model.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Generate the next model turn for `request`.
    async fn send_message(&self, request: &ChatRequest<'_>) -> Result<AiResponse, AiError>;

    /// Confirm the service is reachable and accepts this client's
    /// configuration. Called once when a session is created.
    async fn check_model(&self) -> Result<(), AiError>;

    /// Model identifier, for logs and the status line.
    fn model_name(&self) -> &str;
}

/// Everything one generate call needs.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system_instruction: &'a str,
    pub contents: &'a [Content],
    pub generation: &'a GenerationConfig,
}

/// Sampling settings sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_output_tokens: 4096,
        }
    }
}

/// One turn of the conversation as the remote model sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text(text.into())],
        }
    }
}

/// A piece of a turn: text or an inline binary attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Part {
    Text(String),
    InlineData {
        mime_type: String,
        /// Raw base64, no data-URL prefix.
        data: String,
    },
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Not configured: {0}")]
    NotConfigured(String),
    #[error("Model returned an empty reply")]
    EmptyReply,
}
