//! Startup wiring: config resolution, CLI overrides, and manager construction.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serenity_ai::{ConversationManager, DeliveryMode, GeminiClient, GeminiConfig, SessionOptions};
use serenity_common::{ConfigError, SerenityError};
use serenity_config::schema;
use serenity_config::SerenityConfig;
use tracing::info;

use crate::cli::Args;

/// Load the `--config` file when given, otherwise the platform default.
pub(crate) fn load_config(path: Option<&str>) -> Result<SerenityConfig, ConfigError> {
    match path {
        Some(path) => serenity_config::load_config_from(Path::new(path)),
        None => serenity_config::load_config(),
    }
}

/// Command-line flags win over the config file.
pub(crate) fn apply_overrides(config: &mut SerenityConfig, args: &Args) {
    if let Some(ref model) = args.model {
        config.model.name = model.clone();
    }
    if args.stream {
        config.chat.delivery = schema::DeliveryMode::Streaming;
    }
}

pub(crate) fn session_options(config: &SerenityConfig) -> SessionOptions {
    SessionOptions::new(config.chat.system_instruction.clone())
        .with_temperature(config.model.temperature)
        .with_top_p(config.model.top_p)
        .with_max_output_tokens(config.model.max_output_tokens)
}

pub(crate) fn delivery_mode(config: &SerenityConfig) -> DeliveryMode {
    match config.chat.delivery {
        schema::DeliveryMode::Whole => DeliveryMode::Whole,
        schema::DeliveryMode::Streaming => DeliveryMode::Streaming,
    }
}

/// Build the Gemini-backed conversation manager. Fails only when the
/// backend cannot be configured (missing API key, HTTP client setup).
pub(crate) fn build_manager(config: &SerenityConfig) -> serenity_common::Result<ConversationManager> {
    let gemini = GeminiConfig::from_env()
        .map_err(|e| SerenityError::Backend(e.to_string()))?
        .with_model(config.model.name.clone())
        .with_request_timeout(Duration::from_secs(config.model.request_timeout_secs.into()));
    let client = GeminiClient::new(gemini).map_err(|e| SerenityError::Backend(e.to_string()))?;

    let delivery = delivery_mode(config);
    info!(model = client.model(), ?delivery, "conversation ready");

    Ok(ConversationManager::new(Arc::new(client), session_options(config)).with_delivery(delivery))
}
