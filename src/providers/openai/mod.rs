//! OpenAI-compatible service
//!
//! One service, three deployment profiles:
//!
//! ```rust,no_run
//! use openai_service::providers::openai::{AzureConfig, OpenAiService};
//! use openai_service::auth::Authorization;
//!
//! # async fn demo() -> Result<(), openai_service::LlmError> {
//! let direct = OpenAiService::openai("sk-...", None)?;
//! let azure = OpenAiService::azure(AzureConfig::new("my-resource", "azure-key"))?;
//! let local = OpenAiService::local("http://localhost:11434", Authorization::default())?;
//!
//! let models = local.list_models().await?;
//! # let _ = (direct, azure, models);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod types;

pub use client::{ASSISTANTS_BETA, OpenAiService};
pub use config::{AzureConfig, Deployment};
pub use endpoints::ApiEndpoint;
pub use types::{
    DeletionStatus, FileList, FileObject, FileUploadParameters, Model, ModelList,
};
