//! Gemini request building and response parsing.

use crate::backend::SessionOptions;
use crate::{BackendError, Message, Role};

/// Build the JSON request body for one exchange: prior history followed by
/// the new user utterance.
pub(crate) fn build_request_body(
    options: &SessionOptions,
    history: &[Message],
    user_text: &str,
) -> serde_json::Value {
    let contents: Vec<_> = history
        .iter()
        .map(|msg| (msg.role, msg.content.as_str()))
        .chain(std::iter::once((Role::User, user_text)))
        .map(|(role, text)| {
            let role = match role {
                Role::User => "user",
                Role::Model => "model",
            };
            serde_json::json!({
                "role": role,
                "parts": [{ "text": text }]
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "contents": contents,
        "generationConfig": {
            "temperature": options.temperature,
            "topP": options.top_p,
            "maxOutputTokens": options.max_output_tokens,
        }
    });

    if !options.system_instruction.trim().is_empty() {
        body["systemInstruction"] = serde_json::json!({
            "parts": [{ "text": options.system_instruction }]
        });
    }

    body
}

/// Parse a `generateContent` response into the reply text.
///
/// A candidate without text parts (e.g. blocked by safety filters) yields
/// an empty string.
pub(crate) fn parse_response(json: &serde_json::Value) -> Result<String, BackendError> {
    if let Some(err) = api_error(json) {
        return Err(err);
    }

    let candidates = json["candidates"]
        .as_array()
        .ok_or_else(|| BackendError::Malformed("no candidates in response".to_string()))?;

    let first = candidates
        .first()
        .ok_or_else(|| BackendError::Malformed("empty candidates".to_string()))?;

    Ok(candidate_text(first))
}

/// Parse one SSE `data` payload of a `streamGenerateContent` response into
/// the text it carries. Usage-only chunks yield an empty string.
pub(crate) fn parse_stream_chunk(data: &str) -> Result<String, BackendError> {
    let json: serde_json::Value =
        serde_json::from_str(data).map_err(|e| BackendError::Malformed(e.to_string()))?;

    if let Some(err) = api_error(&json) {
        return Err(err);
    }

    Ok(json["candidates"]
        .as_array()
        .map(|candidates| candidates.iter().map(candidate_text).collect())
        .unwrap_or_default())
}

fn candidate_text(candidate: &serde_json::Value) -> String {
    candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect()
        })
        .unwrap_or_default()
}

fn api_error(json: &serde_json::Value) -> Option<BackendError> {
    let err = json.get("error")?;
    let message = err["message"].as_str().unwrap_or("unknown error");
    Some(match err["code"].as_u64() {
        Some(429) => BackendError::RateLimited,
        Some(401) | Some(403) => BackendError::Auth(message.to_string()),
        _ => BackendError::Api(message.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> SessionOptions {
        SessionOptions::new("You are Serenity.")
            .with_temperature(0.8)
            .with_top_p(0.95)
            .with_max_output_tokens(512)
    }

    #[test]
    fn request_body_appends_user_text_after_history() {
        let history = vec![
            Message {
                role: Role::User,
                content: "hi".into(),
            },
            Message {
                role: Role::Model,
                content: "hello!".into(),
            },
        ];
        let body = build_request_body(&options(), &history, "I feel anxious today");

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "hello!");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "I feel anxious today");
    }

    #[test]
    fn request_body_carries_sampling_options() {
        let body = build_request_body(&options(), &[], "hey");
        assert_eq!(body["generationConfig"]["temperature"], 0.8);
        assert_eq!(body["generationConfig"]["topP"], 0.95);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are Serenity."
        );
    }

    #[test]
    fn blank_system_instruction_is_omitted() {
        let body = build_request_body(&SessionOptions::new("  "), &[], "hey");
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn parse_response_concatenates_parts() {
        let json = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Take a " }, { "text": "deep breath." }] }
            }]
        });
        assert_eq!(parse_response(&json).unwrap(), "Take a deep breath.");
    }

    #[test]
    fn parse_response_without_candidates_is_malformed() {
        let err = parse_response(&json!({ "usageMetadata": {} })).unwrap_err();
        assert!(matches!(err, BackendError::Malformed(_)));

        let err = parse_response(&json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, BackendError::Malformed(_)));
    }

    #[test]
    fn parse_response_blocked_candidate_is_empty() {
        let json = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
        assert_eq!(parse_response(&json).unwrap(), "");
    }

    #[test]
    fn parse_response_error_object() {
        let json = json!({ "error": { "code": 429, "message": "quota" } });
        assert_eq!(parse_response(&json).unwrap_err(), BackendError::RateLimited);

        let json = json!({ "error": { "code": 400, "message": "bad request" } });
        assert_eq!(
            parse_response(&json).unwrap_err(),
            BackendError::Api("bad request".into())
        );
    }

    #[test]
    fn stream_chunk_text() {
        let data = r#"{"candidates":[{"content":{"parts":[{"text":"Hel"},{"text":"lo"}]}}]}"#;
        assert_eq!(parse_stream_chunk(data).unwrap(), "Hello");
    }

    #[test]
    fn stream_chunk_usage_only_is_empty() {
        let data = r#"{"usageMetadata":{"promptTokenCount":3}}"#;
        assert_eq!(parse_stream_chunk(data).unwrap(), "");
    }

    #[test]
    fn stream_chunk_invalid_json_is_malformed() {
        let err = parse_stream_chunk("{not json").unwrap_err();
        assert!(matches!(err, BackendError::Malformed(_)));
    }

    #[test]
    fn stream_chunk_error_object() {
        let data = r#"{"error":{"code":403,"message":"key revoked"}}"#;
        assert_eq!(
            parse_stream_chunk(data).unwrap_err(),
            BackendError::Auth("key revoked".into())
        );
    }
}
