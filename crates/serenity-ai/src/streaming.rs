//! Server-Sent Events (SSE) streaming parser.
//!
//! Gemini streams replies as SSE when called with `alt=sse`. Parsing is
//! split into a pure line decoder and a lazy stream adapter over a
//! `reqwest::Response`.

use futures_util::{Stream, StreamExt};
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::BackendError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The event type, when the server names one.
    pub event: Option<String>,
    /// The event data (JSON string for Gemini).
    pub data: String,
}

/// Incremental line-oriented SSE decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    event: Option<String>,
    data: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without its terminator). Returns an event when the
    /// line completes one.
    pub fn push_line(&mut self, line: &str) -> Option<SseEvent> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            // Empty line = end of event
            return self.take_event();
        }

        if let Some(event_type) = line.strip_prefix("event:") {
            self.event = Some(event_type.trim_start().to_string());
        } else if let Some(data) = line.strip_prefix("data:") {
            let data = data.strip_prefix(' ').unwrap_or(data);
            if !self.data.is_empty() {
                self.data.push('\n');
            }
            self.data.push_str(data);
        }
        // Ignore other fields (id:, retry:, comments)
        None
    }

    /// Flush a trailing event that was not followed by a blank line.
    pub fn finish(&mut self) -> Option<SseEvent> {
        self.take_event()
    }

    fn take_event(&mut self) -> Option<SseEvent> {
        if self.data.is_empty() {
            self.event = None;
            return None;
        }
        Some(SseEvent {
            event: self.event.take(),
            data: std::mem::take(&mut self.data),
        })
    }
}

/// Lazily decode the body of `response` into SSE events.
///
/// A transport failure is yielded once as `BackendError::Network` and ends
/// the stream.
pub fn sse_events(
    response: reqwest::Response,
) -> impl Stream<Item = Result<SseEvent, BackendError>> + Send {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let lines = tokio::io::BufReader::new(StreamReader::new(byte_stream)).lines();

    futures_util::stream::unfold(
        Some((lines, SseDecoder::new())),
        |state| async move {
            let (mut lines, mut decoder) = state?;
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if let Some(event) = decoder.push_line(&line) {
                            return Some((Ok(event), Some((lines, decoder))));
                        }
                    }
                    Ok(None) => return decoder.finish().map(|event| (Ok(event), None)),
                    Err(e) => return Some((Err(BackendError::Network(e.to_string())), None)),
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(input: &str) -> Vec<SseEvent> {
        let mut decoder = SseDecoder::new();
        let mut events: Vec<SseEvent> = input
            .split('\n')
            .filter_map(|line| decoder.push_line(line))
            .collect();
        events.extend(decoder.finish());
        events
    }

    #[test]
    fn single_data_event() {
        let events = decode_all("data: {\"a\":1}\n\n");
        assert_eq!(
            events,
            vec![SseEvent {
                event: None,
                data: "{\"a\":1}".into()
            }]
        );
    }

    #[test]
    fn named_event_and_multiline_data() {
        let events = decode_all("event: delta\ndata: one\ndata: two\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.as_deref(), Some("delta"));
        assert_eq!(events[0].data, "one\ntwo");
    }

    #[test]
    fn consecutive_events_keep_order() {
        let events = decode_all("data: first\n\ndata: second\n\ndata: third\n\n");
        let data: Vec<_> = events.iter().map(|e| e.data.as_str()).collect();
        assert_eq!(data, ["first", "second", "third"]);
    }

    #[test]
    fn trailing_event_is_flushed() {
        let events = decode_all("data: first\n\ndata: tail");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].data, "tail");
    }

    #[test]
    fn ignores_comments_and_other_fields() {
        let events = decode_all(": keep-alive\nid: 7\nretry: 100\ndata: x\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "x");
    }

    #[test]
    fn crlf_lines_are_accepted() {
        let events = decode_all("data: x\r\n\r\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "x");
    }

    #[test]
    fn event_name_without_data_is_dropped() {
        let events = decode_all("event: ping\n\ndata: y\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, None);
        assert_eq!(events[0].data, "y");
    }

    #[test]
    fn data_without_space_after_colon() {
        let events = decode_all("data:compact\n\n");
        assert_eq!(events[0].data, "compact");
    }
}
