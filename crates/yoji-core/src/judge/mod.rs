//! The judging pipeline.
//!
//! - prompt.rs: instruction text and output grammar
//! - parse.rs: score/commentary extraction with neutral fallback
//!
//! [`Referee::judge`] never returns an error: every failure ends in a
//! [`Verdict`] the frontend can render.

pub mod parse;
pub mod prompt;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::chart::RadarChart;
use crate::providers::llm::{LlmClient, LlmError};
use crate::rubric::{labels, ScoreVector, Winner};
use crate::session::{Player, Session};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Judgement {
    pub words: [String; 2],
    pub scores: [ScoreVector; 2],
    /// Weighted totals, 0–100.
    pub overall: [u8; 2],
    pub winner: Winner,
    /// False where the neutral fallback was used.
    pub parsed: [bool; 2],
    pub chart: RadarChart,
    pub commentary: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Verdict {
    /// Both players built the same word; no model call was made.
    Duplicate { word: String },
    /// Configuration, transport or service failure.
    Failed { message: String },
    Scored(Box<Judgement>),
}

impl Verdict {
    pub fn is_scored(&self) -> bool {
        matches!(self, Verdict::Scored(_))
    }
}

#[derive(Clone)]
pub struct Referee {
    client: Arc<dyn LlmClient>,
}

impl Referee {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    pub async fn judge(&self, session: &Session) -> Verdict {
        let word_a = session.candidate(Player::A);
        let word_b = session.candidate(Player::B);

        if word_a == word_b {
            info!(word = %word_a, "duplicate candidates; skipping model call");
            return Verdict::Duplicate { word: word_a };
        }

        let prompt = prompt::build_prompt(&word_a, &word_b);
        let response = match self.client.complete(&prompt).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, config = e.is_config(), "judge call failed");
                return Verdict::Failed {
                    message: failure_message(&e),
                };
            }
        };

        let reply = parse::parse_reply(&response.text);
        let [score_a, score_b] = reply.scores;
        let chart = RadarChart::new(labels(), [&word_a, &word_b], [&score_a, &score_b]);
        let winner = Winner::decide(&score_a, &score_b);
        info!(
            model = %response.model,
            a = %word_a,
            b = %word_b,
            winner = ?winner,
            "judged"
        );

        Verdict::Scored(Box::new(Judgement {
            overall: [score_a.overall(), score_b.overall()],
            words: [word_a, word_b],
            scores: reply.scores,
            winner,
            parsed: reply.parsed,
            chart,
            commentary: reply.commentary,
            model: response.model,
        }))
    }
}

/// Message shown in place of the commentary when judging fails.
pub fn failure_message(err: &LlmError) -> String {
    let mut message = format!("エラー詳細: {}", err);
    if let Some(model) = err.model() {
        message.push_str(&format!("\n(モデル: {})", model));
    }
    parse::strip_markup(&message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::LlmResponse;
    use crate::session::Slot;
    use crate::vocab::VOCABULARY;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockLlmClient {
        reply: Result<String, fn() -> LlmError>,
        calls: AtomicUsize,
    }

    impl MockLlmClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(err: fn() -> LlmError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, _prompt: &str) -> Result<LlmResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(LlmResponse {
                    text: text.clone(),
                    provider: "mock".to_string(),
                    model: "mock".to_string(),
                }),
                Err(make) => Err(make()),
            }
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    fn distinct_session() -> Session {
        let mut s = Session::seeded(VOCABULARY, 12, 11).unwrap();
        s.select(Player::B, Slot::Front, 3).unwrap();
        s.select(Player::B, Slot::Back, 4).unwrap();
        s
    }

    #[tokio::test]
    async fn duplicate_skips_model_call() {
        let mock = MockLlmClient::replying("unused");
        let referee = Referee::new(mock.clone());
        let session = Session::seeded(VOCABULARY, 12, 11).unwrap();

        let verdict = referee.judge(&session).await;

        assert_eq!(
            verdict,
            Verdict::Duplicate {
                word: session.candidate(Player::A)
            }
        );
        assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn scored_verdict_carries_chart_and_winner() {
        let mock = MockLlmClient::replying(
            "[DATA]\nA: 10, 20, 30, 40, 50\nB: 90, 80, 70, 60, 50\n[END_DATA]\n[講評]\nBの勝ち",
        );
        let referee = Referee::new(mock.clone());
        let session = distinct_session();

        let Verdict::Scored(j) = referee.judge(&session).await else {
            panic!("expected a scored verdict");
        };

        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
        assert_eq!(j.words[0], session.candidate(Player::A));
        assert_eq!(j.scores[1], ScoreVector([90, 80, 70, 60, 50]));
        assert_eq!(j.winner, Winner::B);
        assert_eq!(j.commentary, "Bの勝ち");
        assert_eq!(j.chart.series[0].values(), &[10, 20, 30, 40, 50]);
        assert_eq!(j.overall, [27, 74]);
    }

    #[tokio::test]
    async fn unparseable_reply_still_scores_neutral() {
        let referee = Referee::new(MockLlmClient::replying("### 判定不能\n---"));
        let Verdict::Scored(j) = referee.judge(&distinct_session()).await else {
            panic!("expected a scored verdict");
        };
        assert_eq!(j.scores, [ScoreVector::NEUTRAL; 2]);
        assert_eq!(j.parsed, [false, false]);
        assert_eq!(j.winner, Winner::Draw);
        assert_eq!(j.commentary, "判定不能");
    }

    #[tokio::test]
    async fn client_errors_become_failed_verdicts() {
        let referee = Referee::new(MockLlmClient::failing(|| LlmError::MissingCredential));
        let verdict = referee.judge(&distinct_session()).await;
        let Verdict::Failed { message } = verdict else {
            panic!("expected failure");
        };
        assert!(message.starts_with("エラー詳細: APIキーが設定されていません"));

        let referee = Referee::new(MockLlmClient::failing(|| {
            LlmError::Service {
                status: 500,
                body: "boom".into(),
            }
            .for_model("models/gemini-x")
        }));
        let Verdict::Failed { message } = referee.judge(&distinct_session()).await else {
            panic!("expected failure");
        };
        assert!(message.contains("500"));
        assert!(message.ends_with("(モデル: models/gemini-x)"));
    }

    #[test]
    fn failure_message_is_markup_free() {
        let msg = failure_message(&LlmError::InvalidResponse {
            message: "## --- ===".into(),
        });
        assert!(!msg.contains('#'));
        assert!(!msg.contains("---"));
    }
}
