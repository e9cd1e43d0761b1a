//! Deployment profiles.
//!
//! One service type talks to three kinds of servers. The profile decides the
//! origin, the path prefix, the credential header and any query items or
//! headers every request must carry:
//!
//! | profile | origin | prefix | credential |
//! |---|---|---|---|
//! | `OpenAi` | `https://api.openai.com` | `/v1` | `Authorization: Bearer` |
//! | `Azure` | `https://{resource}.openai.azure.com` | `/openai` | `api-key` |
//! | `Local` | caller supplied | `/v1` | `Authorization: Bearer` (may be empty) |

use super::endpoints::ApiEndpoint;
use crate::auth::Authorization;
use crate::defaults::deployment::{
    AZURE_API_VERSION, LOCAL_BASE_URL, OPENAI_BASE_URL,
};
use crate::execution::http::{Endpoint, QueryItem};
use std::collections::BTreeMap;

/// Azure OpenAI resource configuration.
#[derive(Debug, Clone)]
pub struct AzureConfig {
    /// Resource name, the `{resource}` in `{resource}.openai.azure.com`.
    pub resource_name: String,
    /// Always an `Authorization::ApiKey`.
    pub authorization: Authorization,
    /// Sent as the `api-version` query item on every request.
    pub api_version: String,
    /// Added to every JSON request.
    pub extra_headers: BTreeMap<String, String>,
    /// Overrides the origin derived from `resource_name` (proxies, tests).
    pub base_url: Option<String>,
}

impl AzureConfig {
    pub fn new(resource_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            authorization: Authorization::api_key(api_key),
            api_version: AZURE_API_VERSION.to_string(),
            extra_headers: BTreeMap::new(),
            base_url: None,
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn origin(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.openai.azure.com", self.resource_name),
        }
    }
}

/// Which server a service talks to.
#[derive(Debug, Clone)]
pub enum Deployment {
    /// The hosted OpenAI API.
    OpenAi {
        authorization: Authorization,
        organization: Option<String>,
        base_url: String,
    },
    /// An Azure OpenAI resource.
    Azure(AzureConfig),
    /// A local OpenAI-compatible server such as Ollama.
    Local {
        base_url: String,
        authorization: Authorization,
    },
}

impl Deployment {
    pub fn openai(api_key: impl Into<String>, organization: Option<String>) -> Self {
        Self::OpenAi {
            authorization: Authorization::bearer(api_key),
            organization,
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn azure(config: AzureConfig) -> Self {
        Self::Azure(config)
    }

    /// Only the origin of `base_url` matters: endpoint paths replace any
    /// path it carries.
    pub fn local(base_url: impl Into<String>, authorization: Authorization) -> Self {
        Self::Local {
            base_url: base_url.into(),
            authorization,
        }
    }

    /// Ollama on its default port, no credential.
    pub fn ollama() -> Self {
        Self::local(LOCAL_BASE_URL, Authorization::default())
    }

    /// Point the profile at another origin.
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        match self {
            Self::OpenAi {
                authorization,
                organization,
                ..
            } => Self::OpenAi {
                authorization,
                organization,
                base_url: url,
            },
            Self::Azure(config) => Self::Azure(config.with_base_url(url)),
            Self::Local { authorization, .. } => Self::Local {
                base_url: url,
                authorization,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi { .. } => "openai",
            Self::Azure(_) => "azure",
            Self::Local { .. } => "local",
        }
    }

    pub fn authorization(&self) -> &Authorization {
        match self {
            Self::OpenAi { authorization, .. } | Self::Local { authorization, .. } => {
                authorization
            }
            Self::Azure(config) => &config.authorization,
        }
    }

    pub fn organization(&self) -> Option<&str> {
        match self {
            Self::OpenAi { organization, .. } => organization.as_deref(),
            Self::Azure(_) | Self::Local { .. } => None,
        }
    }

    pub fn base_url(&self) -> String {
        match self {
            Self::OpenAi { base_url, .. } | Self::Local { base_url, .. } => base_url.clone(),
            Self::Azure(config) => config.origin(),
        }
    }

    /// Query items placed before the per-call ones.
    pub fn default_query_items(&self) -> Vec<QueryItem> {
        match self {
            Self::Azure(config) => vec![QueryItem::new("api-version", &config.api_version)],
            Self::OpenAi { .. } | Self::Local { .. } => Vec::new(),
        }
    }

    /// Headers added to every JSON request, before per-call extras.
    pub fn extra_headers(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Azure(config) if !config.extra_headers.is_empty() => Some(&config.extra_headers),
            _ => None,
        }
    }

    /// Resolve a logical operation into this profile's endpoint.
    pub fn endpoint(&self, api: &ApiEndpoint) -> Endpoint {
        let path = match self {
            Self::OpenAi { .. } | Self::Local { .. } => format!("/v1{}", api.path()),
            Self::Azure(_) => match api.deployment_id() {
                Some(deployment) => format!(
                    "/openai/deployments/{}{}",
                    urlencoding::encode(deployment),
                    api.path()
                ),
                None => format!("/openai{}", api.path()),
            },
        };
        Endpoint::new(self.base_url(), path)
    }
}
