use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use yoji_core::{GameConfig, ProviderKind};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderArg {
    /// Live judging through the Gemini API
    Gemini,
    /// Deterministic offline judge (no network)
    Fake,
}

impl From<ProviderArg> for ProviderKind {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Gemini => ProviderKind::Gemini,
            ProviderArg::Fake => ProviderKind::Fake,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "yoji",
    version,
    about = "架空四字熟語バトル: build a four-character compound from two dealt words and let an AI judge decide"
)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, short = 'c', env = "YOJI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Judge provider
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Pin a model (e.g. gemini-1.5-flash) instead of discovering one
    #[arg(long)]
    pub model: Option<String>,

    /// Generative API base URL
    #[arg(long)]
    pub api_base: Option<String>,

    /// Words dealt per round
    #[arg(long)]
    pub hand_size: Option<usize>,

    /// Fixed seed for reproducible deals
    #[arg(long)]
    pub seed: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags override file and environment settings.
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(p) = self.provider {
            config.provider = p.into();
        }
        if let Some(m) = &self.model {
            config.model = Some(m.clone());
        }
        if let Some(b) = &self.api_base {
            config.api_base = b.clone();
        }
        if let Some(n) = self.hand_size {
            config.hand_size = n;
        }
        if let Some(s) = self.seed {
            config.seed = Some(s);
        }
        if let Some(t) = self.timeout {
            config.timeout_secs = t;
        }
        config
    }
}
