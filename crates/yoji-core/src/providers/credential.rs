//! API credential resolution.
//!
//! Checked in order:
//! 1. an explicit key from the configuration file or `--api-key`
//! 2. `YOJI_API_KEY`
//! 3. `GEMINI_API_KEY`
//! 4. `GOOGLE_API_KEY`
//!
//! A missing credential is not fatal; judging reports it and can be retried
//! once the environment is fixed.

pub const CREDENTIAL_ENV_VARS: &[&str] = &["YOJI_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Clone, Default)]
pub enum Credential {
    /// Fixed key from configuration.
    Static(String),

    /// Re-read from the environment on every call.
    #[default]
    Env,
}

impl Credential {
    pub fn from_config(key: Option<&str>) -> Self {
        match key {
            Some(k) if !k.trim().is_empty() => Self::Static(k.trim().to_string()),
            _ => Self::Env,
        }
    }

    /// Current key, if any source provides a non-empty one.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Static(key) => Some(key.clone()),
            Self::Env => CREDENTIAL_ENV_VARS.iter().find_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            }),
        }
    }
}

// Keys must never end up in logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(_) => f.write_str("Credential::Static(****)"),
            Self::Env => f.write_str("Credential::Env"),
        }
    }
}
