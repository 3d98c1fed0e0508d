//! Google Gemini backend.
//!
//! Implements [`ModelBackend`](crate::ModelBackend) for Gemini models via
//! the Generative Language API. Each session keeps its own history and
//! replays it with every request.

mod api;
mod chat;
mod client;
mod config;

pub use chat::GeminiChat;
pub use client::GeminiClient;
pub use config::GeminiConfig;
