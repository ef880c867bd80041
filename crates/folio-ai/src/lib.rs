//! AI engine for Folio.
//!
//! Provides the portfolio chat assistant:
//! - Gemini API client with streaming (SSE) support
//! - System prompt built from the resume record
//! - A single-flight chat `Session` that streams replies into its transcript
//! - Token usage tracking

pub mod gemini;
pub mod prompt;
pub mod session;
pub mod streaming;
pub mod token_tracker;

use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiConfig};
pub use session::{
    IgnoreReason, SendOutcome, Session, SessionError, SessionOptions, SessionState, Transcript,
};
pub use token_tracker::TokenTracker;

/// A hosted chat-completion provider.
///
/// `messages` may start with a single `Role::System` entry carrying the
/// system prompt; the rest alternate user/assistant turns and end with the
/// user message to answer.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Model identifier used for requests.
    fn model(&self) -> &str;

    /// Stream a reply, calling `on_chunk` with each text fragment in the
    /// order the provider emits it. Returns the complete reply.
    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<AiResponse, AiError>;

    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        self.send_message_streaming(messages, &mut |_: &str| {}).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Default)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
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
    #[error("Timeout")]
    Timeout,
    #[error("Client configuration error: {0}")]
    Config(String),
}
