//! Core of the four-character compound battle.
//!
//! Two players each join two words from a randomly dealt hand; a generative
//! model scores both results on a fixed five-dimension rubric and writes a
//! comparison.
//!
//! # Quick Start
//!
//! ```no_run
//! use yoji_core::{GameConfig, Player, Session, Slot, Verdict, VOCABULARY};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load(None)?;
//! let referee = config.build_referee()?;
//! let mut session = Session::new(VOCABULARY, config.hand_size)?;
//! session.select(Player::B, Slot::Front, 2)?;
//!
//! match referee.judge(&session).await {
//!     Verdict::Scored(j) => println!("{:?} wins\n{}", j.winner, j.commentary),
//!     Verdict::Duplicate { word } => println!("both chose {word}"),
//!     Verdict::Failed { message } => println!("{message}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod config;
pub mod judge;
pub mod providers;
pub mod rubric;
pub mod session;
pub mod vocab;

pub use chart::{RadarChart, RadarSeries, SeriesColor};
pub use config::{ConfigError, GameConfig, ProviderKind};
pub use judge::{Judgement, Referee, Verdict};
pub use providers::credential::Credential;
pub use providers::llm::{FakeClient, GeminiClient, LlmClient, LlmError, LlmResponse};
pub use rubric::{Dimension, ScoreVector, Winner, DIMENSIONS, RUBRIC};
pub use session::{Pick, Player, Session, SessionError, Slot};
pub use vocab::{deal, DealError, DEFAULT_HAND_SIZE, VOCABULARY};
