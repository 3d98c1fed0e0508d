//! Gemini chat session: history replay, whole and streamed sends.

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::backend::{ChatSession, FragmentStream, SessionOptions};
use crate::streaming::sse_events;
use crate::{BackendError, Message, Role};

use super::api::{build_request_body, parse_response, parse_stream_chunk};
use super::client::GeminiClient;

/// One Gemini conversation. The REST API is stateless, so the session is
/// the accumulated history sent with every request.
pub struct GeminiChat {
    client: GeminiClient,
    options: SessionOptions,
    history: Vec<Message>,
}

impl GeminiChat {
    pub fn new(client: GeminiClient, options: SessionOptions) -> Self {
        Self {
            client,
            options,
            history: Vec::new(),
        }
    }

    /// Exchanges that completed successfully, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }
}

/// Appends a user/model pair to the history; failed exchanges leave no trace.
fn commit(history: &mut Vec<Message>, user_text: String, reply: String) {
    history.push(Message {
        role: Role::User,
        content: user_text,
    });
    history.push(Message {
        role: Role::Model,
        content: reply,
    });
}

struct PendingReply<'a> {
    history: &'a mut Vec<Message>,
    user_text: String,
    reply: String,
}

#[async_trait]
impl ChatSession for GeminiChat {
    async fn send(&mut self, text: &str) -> Result<String, BackendError> {
        let body = build_request_body(&self.options, &self.history, text);
        let url = self.client.api_url(false);

        let response = self.client.post_json(&url, &body).await?;
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        let reply = parse_response(&json)?;
        commit(&mut self.history, text.to_string(), reply.clone());
        Ok(reply)
    }

    async fn send_streaming<'a>(
        &'a mut self,
        text: &str,
    ) -> Result<FragmentStream<'a>, BackendError> {
        let body = build_request_body(&self.options, &self.history, text);
        let url = self.client.api_url(true);

        let response = self.client.post_json(&url, &body).await?;
        let events = Box::pin(sse_events(response));
        let pending = PendingReply {
            history: &mut self.history,
            user_text: text.to_string(),
            reply: String::new(),
        };

        let fragments = futures_util::stream::unfold(Some((events, pending)), |state| async move {
            let (mut events, mut pending) = state?;
            loop {
                match events.next().await {
                    Some(Ok(event)) => match parse_stream_chunk(&event.data) {
                        Ok(chunk) if chunk.is_empty() => continue,
                        Ok(chunk) => {
                            pending.reply.push_str(&chunk);
                            return Some((Ok(chunk), Some((events, pending))));
                        }
                        Err(e) => return Some((Err(e), None)),
                    },
                    Some(Err(e)) => return Some((Err(e), None)),
                    None => {
                        commit(pending.history, pending.user_text, pending.reply);
                        return None;
                    }
                }
            }
        });

        Ok(Box::pin(fragments))
    }
}
