//! Endpoint descriptors and request construction.
//!
//! An [`Endpoint`] is a fixed `(base, path)` pair naming one remote
//! operation. The two builders turn it into a transport-ready [`HttpRequest`]:
//!
//! - [`build_request`]: JSON body (or none), with optional organization,
//!   beta flag and caller-supplied headers.
//! - [`build_multipart_request`]: `multipart/form-data` body with a fresh
//!   boundary. This path takes no beta flag and no extra headers.
//!
//! Both are synchronous and hold no state.

use super::headers::HttpHeaderBuilder;
use super::multipart::{MultipartFormDataParameters, generate_boundary};
use crate::auth::Authorization;
use crate::error::LlmError;
use bytes::Bytes;
use reqwest::Url;
use reqwest::header::HeaderMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One `name=value` query parameter. Order and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    pub name: String,
    pub value: String,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Defaulted knobs of the JSON request builder.
///
/// Defaults: `GET`, no query items, no beta flag, no extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub query_items: Vec<QueryItem>,
    pub beta_header: Option<String>,
    pub extra_headers: Option<BTreeMap<String, String>>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn with_query_items(mut self, items: Vec<QueryItem>) -> Self {
        self.query_items = items;
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_items.push(QueryItem::new(name, value));
        self
    }

    pub fn with_beta_header(mut self, value: impl Into<String>) -> Self {
        self.beta_header = Some(value.into());
        self
    }

    pub fn with_extra_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }
}

/// Encoded request body. The length is always known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    None,
    Json(Bytes),
    Multipart { bytes: Bytes, boundary: String },
}

impl RequestBody {
    pub fn content_length(&self) -> u64 {
        self.as_bytes().map_or(0, |b| b.len() as u64)
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::None => None,
            Self::Json(bytes) | Self::Multipart { bytes, .. } => Some(bytes),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A fully formed request, ready for an `HttpTransport`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// Fixed `(base, path)` pair identifying one remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Origin, e.g. `https://api.openai.com`.
    pub base: String,
    /// Absolute path replacing the base's path, e.g. `/v1/models`.
    pub path: String,
}

impl Endpoint {
    pub fn new(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            path: path.into(),
        }
    }

    /// Resolve the final URL. The query string is omitted entirely when
    /// `query_items` is empty.
    pub fn url(&self, query_items: &[QueryItem]) -> Result<Url, LlmError> {
        let base = self.base.as_str();
        if base.is_empty() {
            return Err(LlmError::InvalidUrl("base URL is empty".to_string()));
        }
        if base.trim() != base {
            return Err(LlmError::InvalidUrl(format!(
                "base URL '{base}' has surrounding whitespace"
            )));
        }
        let mut url = Url::parse(base)
            .map_err(|e| LlmError::InvalidUrl(format!("invalid base URL '{base}': {e}")))?;
        if url.cannot_be_a_base() || !url.has_host() {
            return Err(LlmError::InvalidUrl(format!(
                "base URL '{base}' has no host"
            )));
        }
        if !self.path.is_empty() && !self.path.starts_with('/') {
            return Err(LlmError::InvalidUrl(format!(
                "path '{}' must start with '/'",
                self.path
            )));
        }
        if let Some(c) = self
            .path
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '?' | '#'))
        {
            return Err(LlmError::InvalidUrl(format!(
                "path '{}' contains invalid character {c:?}",
                self.path
            )));
        }

        url.set_path(&self.path);
        url.set_fragment(None);
        if !query_items.is_empty() {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(query_items.iter().map(|q| (&q.name, &q.value)));
        }
        Ok(url)
    }

    /// JSON-body request; see [`build_request`].
    pub fn request<P: Serialize + ?Sized>(
        &self,
        authorization: &Authorization,
        organization: Option<&str>,
        params: Option<&P>,
        options: &RequestOptions,
    ) -> Result<HttpRequest, LlmError> {
        build_request(self, authorization, organization, params, options)
    }

    /// Multipart request; see [`build_multipart_request`].
    pub fn multipart_request(
        &self,
        authorization: &Authorization,
        organization: Option<&str>,
        method: HttpMethod,
        params: &MultipartFormDataParameters,
        query_items: &[QueryItem],
    ) -> Result<HttpRequest, LlmError> {
        build_multipart_request(
            self,
            authorization,
            organization,
            method,
            params,
            query_items,
        )
    }
}

/// Build a request with an optional JSON body.
///
/// Headers, in order: `Content-Type: application/json`, the credential,
/// `OpenAI-Organization` (if any), `OpenAI-Beta` (if any), then
/// `options.extra_headers`, which overwrite earlier headers of the same name.
pub fn build_request<P: Serialize + ?Sized>(
    endpoint: &Endpoint,
    authorization: &Authorization,
    organization: Option<&str>,
    params: Option<&P>,
    options: &RequestOptions,
) -> Result<HttpRequest, LlmError> {
    let url = endpoint.url(&options.query_items)?;

    let headers = HttpHeaderBuilder::new()
        .with_json_content_type()
        .with_authorization(authorization)?
        .with_organization(organization)?
        .with_beta(options.beta_header.as_deref())?
        .with_custom_headers(options.extra_headers.as_ref())?
        .build();

    let body = match params {
        Some(params) => RequestBody::Json(Bytes::from(
            serde_json::to_vec(params).map_err(|e| LlmError::EncodingError(e.to_string()))?,
        )),
        None => RequestBody::None,
    };

    Ok(HttpRequest {
        method: options.method,
        url,
        headers,
        body,
    })
}

/// Build a `multipart/form-data` request.
///
/// Headers, in order: `Content-Type: multipart/form-data; boundary=<token>`,
/// the credential, `OpenAI-Organization` (if any).
pub fn build_multipart_request(
    endpoint: &Endpoint,
    authorization: &Authorization,
    organization: Option<&str>,
    method: HttpMethod,
    params: &MultipartFormDataParameters,
    query_items: &[QueryItem],
) -> Result<HttpRequest, LlmError> {
    let url = endpoint.url(query_items)?;
    let boundary = generate_boundary();

    let headers = HttpHeaderBuilder::new()
        .with_content_type(&format!("multipart/form-data; boundary={boundary}"))?
        .with_authorization(authorization)?
        .with_organization(organization)?
        .build();

    let bytes = params.encode(&boundary);
    Ok(HttpRequest {
        method,
        url,
        headers,
        body: RequestBody::Multipart { bytes, boundary },
    })
}
