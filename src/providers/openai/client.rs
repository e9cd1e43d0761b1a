//! OpenAI service
//!
//! A single service type for all deployment profiles. Each operation resolves
//! its endpoint through the profile, builds the request with the shared
//! builders and sends it through the configured transport.

use super::config::{AzureConfig, Deployment};
use super::endpoints::ApiEndpoint;
use super::types::{
    DeletionStatus, ErrorEnvelope, FileList, FileObject, FileUploadParameters, Model, ModelList,
};
use crate::auth::Authorization;
use crate::defaults::deployment::{OPENAI_API_KEY_ENV, OPENAI_ORGANIZATION_ENV};
use crate::error::LlmError;
use crate::execution::http::transport::{HttpTransport, ReqwestTransport, collect_body};
use crate::execution::http::{HttpMethod, HttpRequest, QueryItem, RequestOptions};
use crate::streaming::{JsonSseStream, SseJsonStreamConfig, stream_sse_json_values};
use crate::types::HttpConfig;
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Beta flag required by the Assistants API.
pub const ASSISTANTS_BETA: &str = "assistants=v2";

/// Client for OpenAI-compatible REST APIs.
#[derive(Clone)]
pub struct OpenAiService {
    deployment: Deployment,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for OpenAiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiService")
            .field("deployment", &self.deployment.name())
            .field("base_url", &self.deployment.base_url())
            .finish()
    }
}

impl OpenAiService {
    /// Service with the default `reqwest` transport.
    pub fn new(deployment: Deployment) -> Result<Self, LlmError> {
        Self::with_http_config(deployment, &HttpConfig::default())
    }

    pub fn with_http_config(deployment: Deployment, config: &HttpConfig) -> Result<Self, LlmError> {
        Ok(Self::with_transport(
            deployment,
            Arc::new(ReqwestTransport::from_config(config)?),
        ))
    }

    pub fn with_transport(deployment: Deployment, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            deployment,
            transport,
        }
    }

    /// The hosted OpenAI API.
    pub fn openai(
        api_key: impl Into<String>,
        organization: Option<String>,
    ) -> Result<Self, LlmError> {
        Self::new(Deployment::openai(api_key, organization))
    }

    /// An Azure OpenAI resource.
    pub fn azure(config: AzureConfig) -> Result<Self, LlmError> {
        Self::new(Deployment::azure(config))
    }

    /// A local OpenAI-compatible server; pass `Authorization::default()`
    /// when it needs no credential.
    pub fn local(
        base_url: impl Into<String>,
        authorization: Authorization,
    ) -> Result<Self, LlmError> {
        Self::new(Deployment::local(base_url, authorization))
    }

    /// The hosted API with `OPENAI_API_KEY` and optional `OPENAI_ORGANIZATION`.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = api_key_from_env(OPENAI_API_KEY_ENV)?;
        let organization = std::env::var(OPENAI_ORGANIZATION_ENV)
            .ok()
            .filter(|v| !v.is_empty());
        Self::openai(api_key, organization)
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Build a JSON request for `api` under this profile.
    ///
    /// Profile query items go first; profile extra headers are applied
    /// before per-call ones, so per-call values win.
    pub fn request<P: Serialize + ?Sized>(
        &self,
        api: &ApiEndpoint,
        params: Option<&P>,
        mut options: RequestOptions,
    ) -> Result<HttpRequest, LlmError> {
        options.query_items = self.query_items(options.query_items);
        if let Some(defaults) = self.deployment.extra_headers() {
            let mut merged = defaults.clone();
            merged.extend(options.extra_headers.take().unwrap_or_default());
            options.extra_headers = Some(merged);
        }
        self.deployment.endpoint(api).request(
            self.deployment.authorization(),
            self.deployment.organization(),
            params,
            &options,
        )
    }

    /// Build a multipart request for `api` under this profile.
    pub fn multipart_request(
        &self,
        api: &ApiEndpoint,
        method: HttpMethod,
        params: &crate::execution::http::MultipartFormDataParameters,
    ) -> Result<HttpRequest, LlmError> {
        self.deployment.endpoint(api).multipart_request(
            self.deployment.authorization(),
            self.deployment.organization(),
            method,
            params,
            &self.query_items(Vec::new()),
        )
    }

    fn query_items(&self, call_items: Vec<QueryItem>) -> Vec<QueryItem> {
        let mut items = self.deployment.default_query_items();
        items.extend(call_items);
        items
    }

    /// Send a request and return the raw body of a 2xx response.
    pub async fn fetch_bytes(&self, request: HttpRequest) -> Result<Bytes, LlmError> {
        let url = request.url.clone();
        let resp = self.transport.execute(request).await?;
        if !resp.is_success() {
            tracing::warn!(status = resp.status, url = %url, "request failed");
            return Err(api_error(resp.status, &resp.body));
        }
        Ok(resp.body)
    }

    /// Send a request and decode a 2xx JSON response into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, LlmError> {
        let body = self.fetch_bytes(request).await?;
        serde_json::from_slice(&body).map_err(|e| {
            LlmError::ParseError(format!(
                "Failed to decode response: {e}; body: {}",
                String::from_utf8_lossy(&body)
            ))
        })
    }

    /// Send a request and decode its SSE body into JSON values.
    pub async fn fetch_stream(
        &self,
        request: HttpRequest,
        label: &str,
    ) -> Result<JsonSseStream, LlmError> {
        let url = request.url.clone();
        let resp = self.transport.execute_stream(request).await?;
        if !(200..300).contains(&resp.status) {
            tracing::warn!(status = resp.status, url = %url, "stream request failed");
            let body = collect_body(resp.body).await?;
            return Err(api_error(resp.status, &body));
        }
        Ok(stream_sse_json_values(
            resp.body,
            SseJsonStreamConfig::new(label),
        ))
    }

    // Chat

    pub async fn create_chat_completion(
        &self,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, LlmError> {
        let api = ApiEndpoint::chat_completions(model_of(params));
        let request = self.request(&api, Some(params), RequestOptions::post())?;
        self.fetch(request).await
    }

    /// Same as `create_chat_completion` with `"stream": true` forced on.
    pub async fn stream_chat_completion(
        &self,
        params: &serde_json::Value,
    ) -> Result<JsonSseStream, LlmError> {
        let mut params = params.clone();
        match params.as_object_mut() {
            Some(obj) => {
                obj.insert("stream".to_string(), serde_json::Value::Bool(true));
            }
            None => {
                return Err(LlmError::EncodingError(
                    "chat completion parameters must be a JSON object".to_string(),
                ));
            }
        }
        let api = ApiEndpoint::chat_completions(model_of(&params));
        let request = self.request(&api, Some(&params), RequestOptions::post())?;
        self.fetch_stream(request, "chat completions").await
    }

    // Embeddings and moderations

    pub async fn create_embeddings(
        &self,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, LlmError> {
        let api = ApiEndpoint::embeddings(model_of(params));
        let request = self.request(&api, Some(params), RequestOptions::post())?;
        self.fetch(request).await
    }

    pub async fn create_moderation(
        &self,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, LlmError> {
        let request = self.request(&ApiEndpoint::Moderations, Some(params), RequestOptions::post())?;
        self.fetch(request).await
    }

    // Models

    pub async fn list_models(&self) -> Result<ModelList, LlmError> {
        let request = self.request(&ApiEndpoint::Models, None::<&()>, RequestOptions::get())?;
        self.fetch(request).await
    }

    pub async fn retrieve_model(&self, id: &str) -> Result<Model, LlmError> {
        let request = self.request(
            &ApiEndpoint::Model(id.to_string()),
            None::<&()>,
            RequestOptions::get(),
        )?;
        self.fetch(request).await
    }

    pub async fn delete_fine_tuned_model(&self, id: &str) -> Result<DeletionStatus, LlmError> {
        let request = self.request(
            &ApiEndpoint::Model(id.to_string()),
            None::<&()>,
            RequestOptions::delete(),
        )?;
        self.fetch(request).await
    }

    // Files

    pub async fn upload_file(&self, params: &FileUploadParameters) -> Result<FileObject, LlmError> {
        let request =
            self.multipart_request(&ApiEndpoint::Files, HttpMethod::Post, &params.to_form())?;
        self.fetch(request).await
    }

    pub async fn list_files(&self, purpose: Option<&str>) -> Result<FileList, LlmError> {
        let mut options = RequestOptions::get();
        if let Some(purpose) = purpose {
            options = options.with_query("purpose", purpose);
        }
        let request = self.request(&ApiEndpoint::Files, None::<&()>, options)?;
        self.fetch(request).await
    }

    pub async fn retrieve_file(&self, id: &str) -> Result<FileObject, LlmError> {
        let request = self.request(
            &ApiEndpoint::File(id.to_string()),
            None::<&()>,
            RequestOptions::get(),
        )?;
        self.fetch(request).await
    }

    pub async fn delete_file(&self, id: &str) -> Result<DeletionStatus, LlmError> {
        let request = self.request(
            &ApiEndpoint::File(id.to_string()),
            None::<&()>,
            RequestOptions::delete(),
        )?;
        self.fetch(request).await
    }

    pub async fn retrieve_file_content(&self, id: &str) -> Result<Bytes, LlmError> {
        let request = self.request(
            &ApiEndpoint::FileContent(id.to_string()),
            None::<&()>,
            RequestOptions::get(),
        )?;
        self.fetch_bytes(request).await
    }

    // Assistants (beta)

    pub async fn list_assistants(&self, limit: Option<u32>) -> Result<serde_json::Value, LlmError> {
        let mut options = RequestOptions::get().with_beta_header(ASSISTANTS_BETA);
        if let Some(limit) = limit {
            options = options.with_query("limit", limit.to_string());
        }
        let request = self.request(&ApiEndpoint::Assistants, None::<&()>, options)?;
        self.fetch(request).await
    }
}

fn model_of(params: &serde_json::Value) -> Option<&str> {
    params.get("model").and_then(serde_json::Value::as_str)
}

/// Map a non-2xx response to `ApiError`, preferring the provider's message.
fn api_error(status: u16, body: &[u8]) -> LlmError {
    let details = serde_json::from_slice::<serde_json::Value>(body).ok();
    let message = serde_json::from_slice::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
    LlmError::ApiError {
        code: status,
        message,
        details,
    }
}

fn api_key_from_env(var: &str) -> Result<String, LlmError> {
    match std::env::var(var) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(LlmError::MissingApiKey(format!(
            "set {var} or pass the key explicitly"
        ))),
    }
}
