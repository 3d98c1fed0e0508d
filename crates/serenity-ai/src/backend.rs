//! The boundary between the conversation manager and a language-model service.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::BackendError;

/// Lazy, finite, non-restartable sequence of reply fragments.
///
/// Yields `Err` at most once; the stream ends after the first error.
pub type FragmentStream<'a> = Pin<Box<dyn Stream<Item = Result<String, BackendError>> + Send + 'a>>;

/// Persona and sampling settings fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub system_instruction: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl SessionOptions {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            temperature: 0.8,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Creates conversational sessions.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn create_session(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn ChatSession>, BackendError>;
}

/// Backend-held conversational context. Each successful exchange becomes
/// part of the context used for the next one.
#[async_trait]
pub trait ChatSession: Send {
    /// Send one utterance and wait for the complete reply.
    async fn send(&mut self, text: &str) -> Result<String, BackendError>;

    /// Send one utterance and receive the reply incrementally.
    async fn send_streaming<'a>(
        &'a mut self,
        text: &str,
    ) -> Result<FragmentStream<'a>, BackendError>;
}
