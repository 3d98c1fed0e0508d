//! Model backend configuration: model id, sampling, and request limits.

use serde::{Deserialize, Serialize};

/// Generative model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Gemini model id.
    pub name: String,
    /// Sampling randomness (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Nucleus-sampling mass (valid range: 0.0-1.0).
    pub top_p: f64,
    /// Upper bound on reply length (valid range: 1-65536).
    pub max_output_tokens: u32,
    /// Whole-request timeout in seconds (valid range: 5-600).
    pub request_timeout_secs: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-3-flash-preview".into(),
            temperature: 0.8,
            top_p: 0.95,
            max_output_tokens: 2048,
            request_timeout_secs: 120,
        }
    }
}
