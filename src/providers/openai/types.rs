//! Response and parameter types for the model and file endpoints.
//!
//! Chat, embedding and moderation payloads stay `serde_json::Value`.

use crate::execution::http::{FormPart, MultipartFormDataParameters};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub owned_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub object: String,
    pub data: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub object: String,
    pub bytes: u64,
    /// Unix seconds.
    pub created_at: i64,
    pub filename: String,
    pub purpose: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_details: Option<String>,
}

impl FileObject {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub object: String,
    pub data: Vec<FileObject>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionStatus {
    pub id: String,
    #[serde(default)]
    pub object: String,
    pub deleted: bool,
}

/// File upload request.
#[derive(Debug, Clone)]
pub struct FileUploadParameters {
    pub file: Bytes,
    pub filename: String,
    /// e.g. `assistants`, `fine-tune`, `batch`.
    pub purpose: String,
    /// Guessed from the bytes and filename when absent.
    pub mime_type: Option<String>,
}

impl FileUploadParameters {
    pub fn new(
        file: impl Into<Bytes>,
        filename: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            filename: filename.into(),
            purpose: purpose.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// `purpose` text field, then the `file` part.
    pub fn to_form(&self) -> MultipartFormDataParameters {
        let mime = self.mime_type.clone().unwrap_or_else(|| {
            crate::utils::mime::guess_mime(Some(self.file.as_ref()), Some(self.filename.as_str()))
        });
        MultipartFormDataParameters::new()
            .part(FormPart::text("purpose", self.purpose.clone()))
            .part(
                FormPart::file("file", self.filename.clone(), self.file.clone())
                    .with_content_type(mime),
            )
    }
}

/// `{"error": {...}}` envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
