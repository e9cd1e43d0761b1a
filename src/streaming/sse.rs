//! SSE JSON streaming helpers
//!
//! Streaming endpoints emit one JSON object per SSE `data:` payload and close
//! with a `[DONE]` marker. Callers parse the yielded values into whatever
//! chunk type they need.

use crate::error::LlmError;
use crate::execution::http::transport::ByteStream;
use eventsource_stream::Eventsource;
use futures::Stream;
use futures_util::StreamExt;
use std::pin::Pin;

#[derive(Debug, Clone)]
pub struct SseJsonStreamConfig {
    /// Label used in error messages (e.g. "chat completions").
    pub label: String,
    /// `data` payloads that end the stream.
    pub done_markers: Vec<String>,
}

impl SseJsonStreamConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            done_markers: vec!["[DONE]".to_string()],
        }
    }
}

pub type JsonSseStream = Pin<Box<dyn Stream<Item = Result<serde_json::Value, LlmError>> + Send>>;

/// Convert a byte stream into a stream of JSON values.
///
/// - Empty payloads are skipped.
/// - A done marker ends the stream; anything after it is ignored.
/// - The first framing or JSON error is yielded and ends the stream.
pub fn stream_sse_json_values(byte_stream: ByteStream, cfg: SseJsonStreamConfig) -> JsonSseStream {
    let SseJsonStreamConfig {
        label,
        done_markers,
    } = cfg;

    let out = async_stream::stream! {
        let mut events = byte_stream.eventsource();

        while let Some(item) = events.next().await {
            let event = match item {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(LlmError::StreamError(format!("SSE stream error ({label}): {e}")));
                    return;
                }
            };

            let data = event.data.trim();
            if data.is_empty() {
                continue;
            }
            if done_markers.iter().any(|m| m == data) {
                tracing::trace!(label = %label, "stream finished");
                return;
            }

            match serde_json::from_str::<serde_json::Value>(data) {
                Ok(payload) => yield Ok(payload),
                Err(e) => {
                    yield Err(LlmError::ParseError(format!(
                        "Failed to parse SSE JSON ({label}): {e}"
                    )));
                    return;
                }
            }
        }
    };

    Box::pin(out)
}
