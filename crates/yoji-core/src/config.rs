//! Game configuration.
//!
//! Layers, later wins: defaults, optional YAML file, `YOJI_*` environment,
//! then whatever the frontend applies on top (CLI flags).
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `YOJI_PROVIDER` | `gemini` (default) or `fake` |
//! | `YOJI_MODEL` | Pin a model and skip discovery |
//! | `YOJI_API_BASE` | Generative API base URL |
//! | `YOJI_HAND_SIZE` | Words dealt per round (default: 12) |
//! | `YOJI_SEED` | Fixed RNG seed for reproducible deals |
//! | `YOJI_TIMEOUT` | Request timeout in seconds (default: 60) |

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::judge::Referee;
use crate::providers::credential::Credential;
use crate::providers::llm::gemini::DEFAULT_API_BASE;
use crate::providers::llm::{FakeClient, GeminiClient, LlmClient, LlmError};
use crate::vocab::{DEFAULT_HAND_SIZE, MIN_HAND_SIZE, VOCABULARY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    Fake,
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "fake" => Ok(Self::Fake),
            other => Err(ConfigError::Invalid {
                field: "provider",
                message: format!("unknown provider '{}'", other),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default)]
    pub model: Option<String>,

    /// Prefer the environment; a key here is only for local setups.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_hand_size")]
    pub hand_size: usize,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_hand_size() -> usize {
    DEFAULT_HAND_SIZE
}

fn default_timeout() -> u64 {
    60
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            api_key: None,
            api_base: default_api_base(),
            hand_size: default_hand_size(),
            seed: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl std::fmt::Debug for GameConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("api_base", &self.api_base)
            .field("hand_size", &self.hand_size)
            .field("seed", &self.seed)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GameConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File (if given) with environment overrides applied.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(v) = env_value("YOJI_PROVIDER") {
            self.provider = v.parse()?;
        }
        if let Some(v) = env_value("YOJI_MODEL") {
            self.model = Some(v);
        }
        if let Some(v) = env_value("YOJI_API_BASE") {
            self.api_base = v;
        }
        if let Some(v) = env_value("YOJI_HAND_SIZE") {
            self.hand_size = parse_number("hand_size", &v)?;
        }
        if let Some(v) = env_value("YOJI_SEED") {
            self.seed = Some(parse_number("seed", &v)?);
        }
        if let Some(v) = env_value("YOJI_TIMEOUT") {
            self.timeout_secs = parse_number("timeout_secs", &v)?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_HAND_SIZE..=VOCABULARY.len()).contains(&self.hand_size) {
            return Err(ConfigError::Invalid {
                field: "hand_size",
                message: format!(
                    "must be between {} and {}, got {}",
                    MIN_HAND_SIZE,
                    VOCABULARY.len(),
                    self.hand_size
                ),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                message: "must be positive".to_string(),
            });
        }
        let url = url::Url::parse(&self.api_base).map_err(|e| ConfigError::Invalid {
            field: "api_base",
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "api_base",
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(())
    }

    pub fn build_client(&self) -> Result<Arc<dyn LlmClient>, LlmError> {
        Ok(match self.provider {
            ProviderKind::Fake => Arc::new(FakeClient::new(
                self.model.clone().unwrap_or_else(|| "fake-judge".to_string()),
            )),
            ProviderKind::Gemini => Arc::new(GeminiClient::new(
                self.api_base.clone(),
                Credential::from_config(self.api_key.as_deref()),
                self.model.clone(),
                Duration::from_secs(self.timeout_secs),
            )?),
        })
    }

    pub fn build_referee(&self) -> Result<Referee, LlmError> {
        Ok(Referee::new(self.build_client()?))
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        field,
        message: format!("'{}': {}", raw, e),
    })
}
