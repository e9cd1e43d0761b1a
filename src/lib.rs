//! # openai-service
//!
//! Typed access to OpenAI-compatible REST APIs over three deployment
//! profiles: the hosted OpenAI API, Azure OpenAI and local compatible
//! servers such as Ollama.
//!
//! ## Layers
//!
//! - [`auth`]: which header carries the credential and how it is formatted.
//! - [`execution::http`]: endpoint descriptors, the JSON and multipart
//!   request builders, and the transport that sends built requests.
//! - [`providers::openai`]: the service, its deployment profiles and the
//!   per-endpoint operations.
//!
//! Request building is synchronous and pure apart from the random multipart
//! boundary; the transport is the only suspension point.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openai_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = OpenAiService::from_env()?;
//!     let response = service
//!         .create_chat_completion(&serde_json::json!({
//!             "model": "gpt-4o-mini",
//!             "messages": [{"role": "user", "content": "Hello!"}]
//!         }))
//!         .await?;
//!     println!("{}", response["choices"][0]["message"]["content"]);
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod auth;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod providers;
pub mod streaming;
pub mod types;
pub mod utils;

pub use error::LlmError;

/// Commonly used types
pub mod prelude {
    pub use crate::auth::Authorization;
    pub use crate::error::LlmError;
    pub use crate::execution::http::{
        Endpoint, FormPart, HttpMethod, HttpRequest, HttpTransport, MultipartFormDataParameters,
        QueryItem, RequestBody, RequestOptions, ReqwestTransport, build_multipart_request,
        build_request,
    };
    pub use crate::providers::openai::{
        ApiEndpoint, AzureConfig, Deployment, FileUploadParameters, OpenAiService,
    };
    pub use crate::streaming::JsonSseStream;
    pub use crate::types::HttpConfig;
}
