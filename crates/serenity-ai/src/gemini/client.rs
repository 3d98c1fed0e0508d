//! Gemini HTTP client: endpoint URLs and status mapping.

use async_trait::async_trait;
use tracing::debug;

use crate::backend::{ChatSession, ModelBackend, SessionOptions};
use crate::BackendError;

use super::chat::GeminiChat;
use super::config::GeminiConfig;

/// Gemini API client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BackendError::NotConfigured(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn api_url(&self, stream: bool) -> String {
        if stream {
            format!(
                "{}/{}:streamGenerateContent?alt=sse",
                self.config.base_url, self.config.model
            )
        } else {
            format!("{}/{}:generateContent", self.config.base_url, self.config.model)
        }
    }

    /// POST a JSON body and map non-success statuses to [`BackendError`].
    pub(crate) async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, BackendError> {
        debug!(model = %self.config.model, %url, "Gemini API request");

        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited,
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                BackendError::Auth(format!("HTTP {status}: {text}"))
            }
            _ => BackendError::Api(format!("HTTP {status}: {text}")),
        })
    }
}

#[async_trait]
impl ModelBackend for GeminiClient {
    async fn create_session(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn ChatSession>, BackendError> {
        debug!(model = %self.config.model, "creating Gemini chat session");
        Ok(Box::new(GeminiChat::new(self.clone(), options.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(
            GeminiConfig::new("test-key")
                .with_model("gemini-test")
                .with_base_url("http://localhost:9"),
        )
        .unwrap()
    }

    #[test]
    fn whole_reply_url() {
        assert_eq!(
            client().api_url(false),
            "http://localhost:9/gemini-test:generateContent"
        );
    }

    #[test]
    fn streaming_url_requests_sse() {
        assert_eq!(
            client().api_url(true),
            "http://localhost:9/gemini-test:streamGenerateContent?alt=sse"
        );
    }

    #[tokio::test]
    async fn create_session_needs_no_network() {
        let backend = client();
        let session = backend
            .create_session(&SessionOptions::new("be kind"))
            .await;
        assert!(session.is_ok());
    }
}
