//! HTTP Utilities
//!
//! - endpoint descriptors and request builders
//! - header composition
//! - multipart body encoding
//! - client configuration and transport

pub mod headers;
pub mod multipart;
pub mod request;
pub mod transport;

pub use headers::*;
pub use multipart::*;
pub use request::*;
pub use transport::*;
