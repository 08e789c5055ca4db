//! Offline client that answers in the requested grammar.
//!
//! Scores are derived from the characters of the two quoted words, so the same
//! pair always gets the same result.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use super::{LlmClient, LlmError, LlmResponse};
use crate::rubric::{DIMENSIONS, RUBRIC};

lazy_static! {
    static ref QUOTED_WORD: Regex = Regex::new(r"「([^」\n]+)」").unwrap();
}

#[derive(Debug, Clone)]
pub struct FakeClient {
    model: String,
}

impl FakeClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl Default for FakeClient {
    fn default() -> Self {
        Self::new("fake-judge")
    }
}

fn scores_for(word: &str) -> [u8; DIMENSIONS] {
    let seed: u32 = word.chars().map(u32::from).sum();
    std::array::from_fn(|i| (35 + (seed.wrapping_mul(i as u32 * 2 + 7) % 61)) as u8)
}

fn render(values: &[u8; DIMENSIONS]) -> String {
    values
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let words: Vec<&str> = QUOTED_WORD
            .captures_iter(prompt)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .take(2)
            .collect();
        let [word_a, word_b] = words.as_slice() else {
            return Err(LlmError::InvalidResponse {
                message: "prompt does not quote two candidate words".to_string(),
            });
        };

        let a = scores_for(word_a);
        let b = scores_for(word_b);
        let best_dim = RUBRIC
            .iter()
            .zip(a.iter().zip(b.iter()))
            .max_by_key(|(_, (x, y))| x.abs_diff(**y))
            .map(|(d, _)| d.label)
            .unwrap_or(RUBRIC[0].label);

        let text = format!(
            "[DATA]\nA: {}\nB: {}\n[END_DATA]\n[講評]\n\
             「{}」と「{}」を比較しました。最も差が開いたのは「{}」です。\n\
             (オフライン審査員による機械的な採点です)",
            render(&a),
            render(&b),
            word_a,
            word_b,
            best_dim,
        );

        Ok(LlmResponse {
            text,
            provider: self.provider_name().to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
