//! Chat front-end configuration: persona, greeting, and reply delivery.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are Serenity, a warm and empathetic \
wellness companion. Listen carefully, reflect the user's feelings back to them, and offer \
gentle, practical coping ideas such as breathing exercises, grounding, or journaling. Keep \
replies short and conversational. You are not a therapist and never diagnose. If the user \
mentions self-harm or being in danger, encourage them to contact local emergency services \
or a crisis line right away.";

pub const DEFAULT_GREETING: &str = "Hello, I'm Serenity. I'm here to listen and support you \
in any way I can. How are you feeling today?";

/// How model replies reach the transcript.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum DeliveryMode {
    /// One complete reply per exchange.
    #[default]
    Whole,
    /// Incremental fragments appended as they arrive.
    Streaming,
}

/// Chat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub delivery: DeliveryMode,
    /// Persona preamble sent with every session.
    pub system_instruction: String,
    /// Shown by the front-end before the first exchange; never sent to the model.
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            delivery: DeliveryMode::Whole,
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.into(),
            greeting: DEFAULT_GREETING.into(),
        }
    }
}
