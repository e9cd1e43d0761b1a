//! Logical API operations and their profile-independent paths.

/// Operations exposed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    /// `model` doubles as the Azure deployment id.
    ChatCompletions { model: Option<String> },
    /// `model` doubles as the Azure deployment id.
    Embeddings { model: Option<String> },
    Moderations,
    Models,
    Model(String),
    Files,
    File(String),
    FileContent(String),
    Assistants,
}

impl ApiEndpoint {
    pub fn chat_completions(model: Option<&str>) -> Self {
        Self::ChatCompletions {
            model: model.map(str::to_string),
        }
    }

    pub fn embeddings(model: Option<&str>) -> Self {
        Self::Embeddings {
            model: model.map(str::to_string),
        }
    }

    /// Path below the profile prefix. Ids are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Self::ChatCompletions { .. } => "/chat/completions".to_string(),
            Self::Embeddings { .. } => "/embeddings".to_string(),
            Self::Moderations => "/moderations".to_string(),
            Self::Models => "/models".to_string(),
            Self::Model(id) => format!("/models/{}", urlencoding::encode(id)),
            Self::Files => "/files".to_string(),
            Self::File(id) => format!("/files/{}", urlencoding::encode(id)),
            Self::FileContent(id) => format!("/files/{}/content", urlencoding::encode(id)),
            Self::Assistants => "/assistants".to_string(),
        }
    }

    /// Deployment id used by Azure's deployment-scoped routes.
    pub fn deployment_id(&self) -> Option<&str> {
        match self {
            Self::ChatCompletions { model } | Self::Embeddings { model } => model.as_deref(),
            _ => None,
        }
    }
}
