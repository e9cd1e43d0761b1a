//! HTTP transport abstraction.
//!
//! The request builders stop at a fully formed [`HttpRequest`]; sending it is
//! the job of an injectable transport. [`ReqwestTransport`] is the default.
//! Tests and embedders can supply their own implementation to observe the
//! final URL/headers/body or return synthetic responses.

use super::request::HttpRequest;
use crate::auth::{API_KEY_HEADER, AUTHORIZATION_HEADER};
use crate::error::LlmError;
use crate::types::HttpConfig;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::pin::Pin;

/// Streamed response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, LlmError>> + Send>>;

/// Transport-level response with a fully read body.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpTransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level response whose body arrives in chunks.
pub struct HttpStreamResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: ByteStream,
}

impl std::fmt::Debug for HttpStreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStreamResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Sends built requests over the network.
///
/// Implementations report any status code as a response; mapping non-2xx
/// statuses to errors is left to the caller.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpTransportResponse, LlmError>;

    async fn execute_stream(&self, request: HttpRequest)
    -> Result<HttpStreamResponse, LlmError>;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Transport whose client applies the timeouts, proxy, user agent and
    /// default headers of `config`.
    ///
    /// Content type, length and credentials are set on each request by the
    /// builders, so `config.headers` may not name them.
    pub fn from_config(config: &HttpConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| LlmError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if !config.headers.is_empty() {
            builder = builder.default_headers(default_headers(&config.headers)?);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::HttpError(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::new(client))
    }

    async fn send(&self, request: HttpRequest) -> Result<reqwest::Response, LlmError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let mut builder = self.client.request(method.into(), url).headers(headers);
        // A `Bytes` body has a known length, so reqwest emits Content-Length.
        if let Some(bytes) = body.as_bytes() {
            builder = builder.body(bytes.clone());
        }
        builder
            .send()
            .await
            .map_err(|e| LlmError::HttpError(format!("Request failed: {e}")))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpTransportResponse, LlmError> {
        let resp = self.send(request).await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| LlmError::HttpError(format!("Failed to read response body: {e}")))?;
        Ok(HttpTransportResponse {
            status,
            headers,
            body,
        })
    }

    async fn execute_stream(
        &self,
        request: HttpRequest,
    ) -> Result<HttpStreamResponse, LlmError> {
        let resp = self.send(request).await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| LlmError::HttpError(format!("Stream read error: {e}"))));
        Ok(HttpStreamResponse {
            status,
            headers,
            body: Box::pin(body),
        })
    }
}

fn default_headers(headers: &HashMap<String, String>) -> Result<HeaderMap, LlmError> {
    let mut map = HeaderMap::new();
    for (k, v) in headers {
        let name = HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid header name '{k}': {e}"))
        })?;
        let reserved = [CONTENT_TYPE, CONTENT_LENGTH].contains(&name)
            || name.as_str().eq_ignore_ascii_case(AUTHORIZATION_HEADER)
            || name.as_str().eq_ignore_ascii_case(API_KEY_HEADER);
        if reserved {
            return Err(LlmError::ConfigurationError(format!(
                "'{k}' is set per request and cannot be a default header"
            )));
        }
        let value = HeaderValue::from_str(v).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid header value for '{k}': {e}"))
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Drain a byte stream into one buffer (used for error bodies of streaming calls).
pub async fn collect_body(mut stream: ByteStream) -> Result<Bytes, LlmError> {
    let mut buf = Vec::new();
    while let Some(chunk) = stream.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn collect_body_concatenates_chunks() {
        let chunks: Vec<Result<Bytes, LlmError>> =
            vec![Ok(Bytes::from_static(b"he")), Ok(Bytes::from_static(b"llo"))];
        let stream: ByteStream = Box::pin(futures::stream::iter(chunks));
        assert_eq!(collect_body(stream).await.unwrap(), Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn collect_body_propagates_errors() {
        let chunks: Vec<Result<Bytes, LlmError>> = vec![
            Ok(Bytes::from_static(b"he")),
            Err(LlmError::HttpError("reset".into())),
        ];
        let stream: ByteStream = Box::pin(futures::stream::iter(chunks));
        assert!(matches!(
            collect_body(stream).await,
            Err(LlmError::HttpError(_))
        ));
    }

    #[test]
    fn from_config_applies_default_settings() {
        assert!(ReqwestTransport::from_config(&HttpConfig::default()).is_ok());

        let config = HttpConfig::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("test-agent/1.0")
            .header("X-Request-Source", "batch")
            .build();
        assert!(ReqwestTransport::from_config(&config).is_ok());
    }

    #[test]
    fn invalid_default_header_name_is_configuration_error() {
        let config = HttpConfig::builder()
            .header("Invalid Header Name", "value")
            .build();
        assert!(matches!(
            ReqwestTransport::from_config(&config),
            Err(LlmError::ConfigurationError(_))
        ));
    }

    #[test]
    fn per_request_headers_cannot_be_defaults() {
        for name in ["authorization", "API-KEY", "Content-Type", "content-length"] {
            let config = HttpConfig::builder().header(name, "x").build();
            assert!(
                matches!(
                    ReqwestTransport::from_config(&config),
                    Err(LlmError::ConfigurationError(_))
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn success_range() {
        let resp = HttpTransportResponse {
            status: 204,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        };
        assert!(resp.is_success());
        let resp = HttpTransportResponse { status: 404, ..resp };
        assert!(!resp.is_success());
    }
}
