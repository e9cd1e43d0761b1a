//! Server-sent event decoding for streaming endpoints.

pub mod sse;

pub use sse::{JsonSseStream, SseJsonStreamConfig, stream_sse_json_values};
