//! Authorization header resolution.
//!
//! Every deployment profile carries exactly one `Authorization` value. The
//! header name and value are derived from the variant alone, so two requests
//! built with the same credential always authenticate the same way.

use secrecy::{ExposeSecret, SecretString};

/// Header used by the direct and local profiles.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// Header used by the Azure profile.
pub const API_KEY_HEADER: &str = "api-key";

/// Credential material for one service instance.
///
/// An empty credential is accepted as-is: local OpenAI-compatible servers
/// usually run without auth, and rejecting the key is the server's call.
#[derive(Clone)]
pub enum Authorization {
    /// Raw key sent in the `api-key` header (Azure OpenAI).
    ApiKey(SecretString),
    /// Token sent as `Authorization: Bearer <token>` (OpenAI, local models).
    Bearer(SecretString),
}

impl Authorization {
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(SecretString::from(key.into()))
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(SecretString::from(token.into()))
    }

    /// Name of the header carrying the credential.
    pub fn header_name(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => API_KEY_HEADER,
            Self::Bearer(_) => AUTHORIZATION_HEADER,
        }
    }

    /// Formatted header value.
    pub fn header_value(&self) -> String {
        match self {
            Self::ApiKey(key) => key.expose_secret().to_string(),
            Self::Bearer(token) => format!("Bearer {}", token.expose_secret()),
        }
    }

    /// Whether the credential is empty (no-auth local model).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::ApiKey(secret) | Self::Bearer(secret) => secret.expose_secret().is_empty(),
        }
    }
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            Self::ApiKey(_) => "ApiKey",
            Self::Bearer(_) => "Bearer",
        };
        f.debug_tuple(variant).field(&"[REDACTED]").finish()
    }
}

impl Default for Authorization {
    fn default() -> Self {
        Self::bearer("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_uses_authorization_header_with_prefix() {
        let auth = Authorization::bearer("sk-test");
        assert_eq!(auth.header_name(), "Authorization");
        assert_eq!(auth.header_value(), "Bearer sk-test");
    }

    #[test]
    fn api_key_uses_dedicated_header_unprefixed() {
        let auth = Authorization::api_key("azure-key");
        assert_eq!(auth.header_name(), "api-key");
        assert_eq!(auth.header_value(), "azure-key");
    }

    #[test]
    fn empty_credential_is_passed_through() {
        let auth = Authorization::default();
        assert!(auth.is_empty());
        assert_eq!(auth.header_name(), "Authorization");
        assert_eq!(auth.header_value(), "Bearer ");

        let auth = Authorization::api_key("");
        assert!(auth.is_empty());
        assert_eq!(auth.header_value(), "");
    }

    #[test]
    fn debug_never_prints_the_credential() {
        let rendered = format!("{:?}", Authorization::bearer("sk-secret"));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("Bearer"));
    }
}
