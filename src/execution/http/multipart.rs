//! `multipart/form-data` body encoding.
//!
//! The body is assembled in memory so its length is known up front; file
//! payloads are copied through untouched.

use bytes::{BufMut, Bytes, BytesMut};

/// One named form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormPart {
    /// A plain text field (e.g. `purpose=assistants`).
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: Bytes::from(value.into()),
        }
    }

    /// A file field carrying raw bytes.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Ordered form parts of a multipart request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartFormDataParameters {
    pub parts: Vec<FormPart>,
}

impl MultipartFormDataParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(mut self, part: FormPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Serialize every part in order, closing with `--<boundary>--`.
    pub fn encode(&self, boundary: &str) -> Bytes {
        let mut body = BytesMut::new();
        for part in &self.parts {
            body.put_slice(format!("--{boundary}\r\n").as_bytes());
            body.put_slice(b"Content-Disposition: form-data; name=\"");
            body.put_slice(escape_quoted(&part.name).as_bytes());
            body.put_u8(b'"');
            if let Some(filename) = &part.filename {
                body.put_slice(b"; filename=\"");
                body.put_slice(escape_quoted(filename).as_bytes());
                body.put_u8(b'"');
            }
            body.put_slice(b"\r\n");
            if let Some(content_type) = &part.content_type {
                body.put_slice(b"Content-Type: ");
                body.put_slice(single_line(content_type).as_bytes());
                body.put_slice(b"\r\n");
            }
            body.put_slice(b"\r\n");
            body.put_slice(&part.data);
            body.put_slice(b"\r\n");
        }
        body.put_slice(format!("--{boundary}--\r\n").as_bytes());
        body.freeze()
    }
}

/// Fresh boundary token for one request.
pub fn generate_boundary() -> String {
    uuid::Uuid::new_v4().to_string()
}

// Part header values must not break out of their line.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn escape_quoted(value: &str) -> String {
    single_line(&value.replace('\\', "\\\\").replace('"', "\\\""))
}
