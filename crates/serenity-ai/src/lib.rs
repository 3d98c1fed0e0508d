//! Conversation engine for Serenity.
//!
//! Provides:
//! - A [`ModelBackend`] boundary with whole-reply and streaming sends
//! - A Gemini implementation over the Generative Language REST API
//! - Server-Sent Events parsing for streamed replies
//! - The [`ConversationManager`] turn-taking state machine

pub mod backend;
pub mod conversation;
pub mod gemini;
pub mod streaming;

pub use backend::{ChatSession, FragmentStream, ModelBackend, SessionOptions};
pub use conversation::{
    ConversationEvent, ConversationManager, DeliveryMode, RejectReason, SubmitOutcome, Turn,
    APOLOGY_TEXT, EMPTY_REPLY_TEXT,
};
pub use gemini::{GeminiClient, GeminiConfig};

/// A single entry of backend-side chat history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Author of a turn. System instructions travel separately and are never
/// stored as turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limited")]
    RateLimited,
    #[error("API error: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("backend not configured: {0}")]
    NotConfigured(String),
}
