//! Default Configuration Values
//!
//! Central place for every default used by the service and its transport.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    ///
    /// Long enough for large models that take tens of seconds to answer
    /// non-streaming chat requests.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("openai-service/", env!("CARGO_PKG_VERSION"));
}

/// Deployment profile defaults
pub mod deployment {
    /// Origin of the hosted OpenAI API
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

    /// Origin of a local Ollama server exposing OpenAI-compatible routes
    pub const LOCAL_BASE_URL: &str = "http://localhost:11434";

    /// Azure OpenAI data-plane API version
    pub const AZURE_API_VERSION: &str = "2024-06-01";

    /// Environment variable holding the OpenAI API key
    pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

    /// Environment variable holding the optional organization id
    pub const OPENAI_ORGANIZATION_ENV: &str = "OPENAI_ORGANIZATION";
}
