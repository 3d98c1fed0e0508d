//! A single message in the transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serenity_common::TurnId;

use crate::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    /// For a streamed reply, everything received so far.
    pub text: String,
    /// When the turn entered the transcript, not when it completed.
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }
}
