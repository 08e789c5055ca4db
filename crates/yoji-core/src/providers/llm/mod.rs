//! Text-generation clients.
//!
//! The game only needs one capability: send a prompt, get free text back.

use async_trait::async_trait;

pub mod fake;
pub mod gemini;

pub use fake::FakeClient;
pub use gemini::GeminiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key in configuration or environment.
    #[error("APIキーが設定されていません (YOJI_API_KEY / GEMINI_API_KEY / GOOGLE_API_KEY)")]
    MissingCredential,

    /// Model discovery found nothing that supports content generation.
    #[error("generateContent に対応したモデルが見つかりません")]
    NoCapableModel,

    #[error("通信エラー: {message}")]
    Network { message: String },

    /// Non-success HTTP status from the service.
    #[error("サービスエラー (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("不正な応答: {message}")]
    InvalidResponse { message: String },

    /// A failure after a model was chosen; carries the model name for display.
    #[error("{source}")]
    Generation {
        model: String,
        #[source]
        source: Box<LlmError>,
    },
}

impl LlmError {
    /// Model involved in the failure, when one had been selected.
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Generation { model, .. } => Some(model),
            _ => None,
        }
    }

    /// Configuration problems (as opposed to transport/service failures).
    pub fn is_config(&self) -> bool {
        match self {
            Self::MissingCredential | Self::NoCapableModel => true,
            Self::Generation { source, .. } => source.is_config(),
            _ => false,
        }
    }

    pub(crate) fn for_model(self, model: &str) -> Self {
        match self {
            already @ Self::Generation { .. } => already,
            other => Self::Generation {
                model: model.to_string(),
                source: Box::new(other),
            },
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse, LlmError>;

    fn provider_name(&self) -> &'static str;
}
