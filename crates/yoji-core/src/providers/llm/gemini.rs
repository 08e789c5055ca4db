//! Google Generative Language (Gemini) client.
//!
//! Each call discovers a model first unless one is pinned in configuration:
//! `GET {base}/models`, then the first entry whose
//! `supportedGenerationMethods` contains `generateContent`. Discovery is not
//! cached; one judge action makes one discovery and one generation request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::{LlmClient, LlmError, LlmResponse};
use crate::providers::credential::Credential;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const USER_AGENT_VALUE: &str = concat!("yoji/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-goog-api-key";
const GENERATE_METHOD: &str = "generateContent";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    credential: Credential,
    /// Pinned model; skips discovery when set.
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        credential: Credential,
        model: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| LlmError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
            model: model.filter(|m| !m.trim().is_empty()).map(qualify_model),
        })
    }

    fn api_key(&self) -> Result<String, LlmError> {
        self.credential.resolve().ok_or(LlmError::MissingCredential)
    }

    /// First listed model that supports `generateContent`.
    pub async fn discover_model(&self) -> Result<String, LlmError> {
        let key = self.api_key()?;
        let url = format!("{}/models", self.base_url);
        debug!(url = %url, "listing models");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, key)
            .query(&[("pageSize", "1000")])
            .send()
            .await?;
        let response = check_status(response).await?;

        let list: ModelList = response.json().await.map_err(|e| LlmError::InvalidResponse {
            message: format!("model list: {}", e),
        })?;

        let chosen = list
            .models
            .into_iter()
            .find(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == GENERATE_METHOD)
            })
            .map(|m| m.name)
            .ok_or(LlmError::NoCapableModel)?;

        info!(model = %chosen, "discovered generation model");
        Ok(chosen)
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let key = self.api_key()?;
        let url = format!("{}/{}:{}", self.base_url, model, GENERATE_METHOD);
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });
        debug!(url = %url, prompt_chars = prompt.chars().count(), "requesting generation");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, key)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let json: serde_json::Value =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                message: e.to_string(),
            })?;
        extract_text(&json)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let model = match &self.model {
            Some(pinned) => pinned.clone(),
            None => self.discover_model().await?,
        };

        let text = self
            .generate(&model, prompt)
            .await
            .map_err(|e| e.for_model(&model))?;

        Ok(LlmResponse {
            text,
            provider: self.provider_name().to_string(),
            model,
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Model names in URLs carry the `models/` prefix.
fn qualify_model(model: String) -> String {
    let model = model.trim();
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "generative API returned an error");
    Err(LlmError::Service {
        status: status.as_u16(),
        body,
    })
}

/// Joins the text parts of the first candidate.
fn extract_text(json: &serde_json::Value) -> Result<String, LlmError> {
    let Some(parts) = json
        .pointer("/candidates/0/content/parts")
        .and_then(|v| v.as_array())
    else {
        let reason = json
            .pointer("/promptFeedback/blockReason")
            .and_then(|v| v.as_str())
            .map(|r| format!("prompt blocked: {}", r))
            .unwrap_or_else(|| "response missing candidates[0].content.parts".to_string());
        return Err(LlmError::InvalidResponse { message: reason });
    };

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        return Err(LlmError::InvalidResponse {
            message: "response contained no text".to_string(),
        });
    }
    Ok(text)
}
