//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Serenity Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The Gemini API key is read from GEMINI_API_KEY (or API_KEY), never from this file.

[model]
# name = "gemini-3-flash-preview"
# temperature = 0.8          # 0.0-2.0
# top_p = 0.95               # 0.0-1.0
# max_output_tokens = 2048   # 1-65536
# request_timeout_secs = 120 # 5-600

[chat]
# delivery = "whole"         # whole, streaming
# system_instruction = "You are Serenity, a warm and empathetic wellness companion. ..."
# greeting = "Hello, I'm Serenity. I'm here to listen and support you in any way I can. How are you feeling today?"

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
