//! Configuration schema types for Serenity.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod model;
mod system;

pub use chat::*;
pub use model::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Serenity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct SerenityConfig {
    pub model: ModelConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
