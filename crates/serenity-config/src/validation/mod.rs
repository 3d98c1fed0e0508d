//! Full configuration validation.
//!
//! Validates numeric ranges and required text fields. Each section has its
//! own submodule; this orchestrator calls them all and collects errors into
//! a single `ConfigError`.

mod chat;
mod helpers;
mod model;


use crate::schema::SerenityConfig;
use serenity_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SerenityConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    model::validate_model(&mut errors, config);
    chat::validate_chat(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
