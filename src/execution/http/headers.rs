//! HTTP Headers Utility
//!
//! Header composition shared by the JSON and multipart request builders.
//!
//! `HeaderMap` keeps insertion order for distinct names and replaces values in
//! place, so calling the builder methods in a fixed order yields a fixed
//! header order: content type, credential, organization, beta flag, extras.

use crate::auth::Authorization;
use crate::error::LlmError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;

/// Organization header for multi-tenant OpenAI accounts.
pub const OPENAI_ORGANIZATION: &str = "openai-organization";
/// Feature-flag header for beta endpoints (e.g. `assistants=v2`).
pub const OPENAI_BETA: &str = "openai-beta";

/// HTTP header builder for API requests
#[derive(Debug, Default)]
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Add an arbitrary content type (e.g. multipart with its boundary)
    pub fn with_content_type(mut self, content_type: &str) -> Result<Self, LlmError> {
        let value = HeaderValue::from_str(content_type).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid content type '{content_type}': {e}"))
        })?;
        self.headers.insert(CONTENT_TYPE, value);
        Ok(self)
    }

    /// Add the credential header resolved from `auth`
    pub fn with_authorization(mut self, auth: &Authorization) -> Result<Self, LlmError> {
        let name = HeaderName::from_bytes(auth.header_name().as_bytes()).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid auth header name: {e}"))
        })?;
        let mut value = HeaderValue::from_str(&auth.header_value())
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid API key format: {e}")))?;
        value.set_sensitive(true);
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add `OpenAI-Organization` when an organization id is supplied
    pub fn with_organization(mut self, organization: Option<&str>) -> Result<Self, LlmError> {
        if let Some(org) = organization {
            let value = HeaderValue::from_str(org).map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            self.headers
                .insert(HeaderName::from_static(OPENAI_ORGANIZATION), value);
        }
        Ok(self)
    }

    /// Add `OpenAI-Beta` when a feature flag is supplied
    pub fn with_beta(mut self, beta: Option<&str>) -> Result<Self, LlmError> {
        if let Some(beta) = beta {
            let value = HeaderValue::from_str(beta).map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid OpenAI-Beta header: {e}"))
            })?;
            self.headers
                .insert(HeaderName::from_static(OPENAI_BETA), value);
        }
        Ok(self)
    }

    /// Add caller-supplied headers; a name already present is overwritten
    pub fn with_custom_headers(
        mut self,
        custom_headers: Option<&BTreeMap<String, String>>,
    ) -> Result<Self, LlmError> {
        for (key, value) in custom_headers.into_iter().flatten() {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid header name '{key}': {e}"))
            })?;
            self.headers.insert(
                header_name,
                HeaderValue::from_str(value).map_err(|e| {
                    LlmError::ConfigurationError(format!("Invalid header value for '{key}': {e}"))
                })?,
            );
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

/// Header names in wire order, lowercased.
pub fn header_names(headers: &HeaderMap) -> Vec<&str> {
    headers.keys().map(HeaderName::as_str).collect()
}
