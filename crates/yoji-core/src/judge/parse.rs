//! Score and commentary extraction from a free-text model reply.
//!
//! Nothing in here fails: a player whose score line is missing or malformed
//! gets the neutral vector, and commentary extraction runs regardless.

use std::borrow::Cow;
use std::num::IntErrorKind;

use lazy_static::lazy_static;
use regex::Regex;

use super::prompt::{COMMENTARY_MARKER, DATA_CLOSE, DATA_OPEN};
use crate::rubric::{ScoreVector, DIMENSIONS, MAX_SCORE};
use crate::session::Player;

/// Markup the model is told not to emit; removed from anything displayed.
pub const FORBIDDEN_MARKUP: [&str; 3] = ["#", "---", "==="];

lazy_static! {
    /// `A: 10, 20, 30, 40, 50` on its own line. Full-width colon, digits
    /// and Japanese commas are accepted.
    static ref SCORE_LINE: Regex = Regex::new(
        r"(?m)^[ \t]*([AB])[ \t]*[:：][ \t]*([0-9０-９]+(?:[ \t]*[,、，][ \t]*[0-9０-９]+)*)[ \t]*\r?$"
    )
    .unwrap();
    /// `... 50 / B: ...`: a second score line folded onto the first.
    static ref FOLDED_SCORE_LINE: Regex =
        Regex::new(r"([0-9０-９])[ \t]*[/／][ \t]*([AB][ \t]*[:：])").unwrap();
    static ref DATA_BLOCK: Regex = Regex::new(r"(?s)\[DATA\].*?\[END_DATA\]").unwrap();
    static ref EXTRA_BLANK_LINES: Regex = Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Indexed by [`Player::index`].
    pub scores: [ScoreVector; 2],
    /// Whether each vector came from the reply (false = neutral fallback).
    pub parsed: [bool; 2],
    pub commentary: String,
}

impl ParsedReply {
    pub fn score(&self, player: Player) -> &ScoreVector {
        &self.scores[player.index()]
    }
}

pub fn parse_reply(text: &str) -> ParsedReply {
    let unfolded = unfold_score_block(text);
    let mut scores = [ScoreVector::NEUTRAL; 2];
    let mut parsed = [false; 2];

    for player in Player::ALL {
        match extract_scores(&unfolded, player) {
            Some(v) => {
                scores[player.index()] = v;
                parsed[player.index()] = true;
            }
            None => {
                tracing::warn!(
                    player = player.label(),
                    "score line missing or malformed; using neutral scores"
                );
            }
        }
    }

    ParsedReply {
        scores,
        parsed,
        commentary: extract_commentary(text),
    }
}

/// The first score line for `player`, if it holds exactly five integers.
fn extract_scores(text: &str, player: Player) -> Option<ScoreVector> {
    let caps = SCORE_LINE
        .captures_iter(text)
        .find(|c| &c[1] == player.label())?;

    let values: Vec<u8> = caps[2]
        .split([',', '、', '，'])
        .map(|token| parse_score(token.trim()))
        .collect::<Option<_>>()?;

    let values: [u8; DIMENSIONS] = values.try_into().ok()?;
    Some(ScoreVector(values))
}

/// One dimension, clamped to [`MAX_SCORE`]. Values too large for `u32` clamp
/// as well.
fn parse_score(token: &str) -> Option<u8> {
    let ascii: String = token
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (u32::from(c) - u32::from('０')) as u8),
            _ => c,
        })
        .collect();
    let value = match ascii.parse::<u32>() {
        Ok(v) => v,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => return None,
    };
    Some(value.min(u32::from(MAX_SCORE)) as u8)
}

/// Puts every score line of a one-line block
/// (`[DATA] A: ... / B: ... [END_DATA]`) on its own line.
fn unfold_score_block(text: &str) -> Cow<'_, str> {
    if !text.contains(DATA_OPEN) && !FOLDED_SCORE_LINE.is_match(text) {
        return Cow::Borrowed(text);
    }
    let unfolded = FOLDED_SCORE_LINE.replace_all(text, "$1\n$2");
    Cow::Owned(
        unfolded
            .replace(DATA_OPEN, &format!("{DATA_OPEN}\n"))
            .replace(DATA_CLOSE, &format!("\n{DATA_CLOSE}")),
    )
}

/// The reply with the score block and structural markers removed.
pub fn extract_commentary(text: &str) -> String {
    let text = &unfold_score_block(text);
    let without_block = DATA_BLOCK.replace_all(text, "");
    let without_lines = SCORE_LINE.replace_all(&without_block, "");
    let cleaned = without_lines
        .replace(DATA_OPEN, "")
        .replace(DATA_CLOSE, "")
        .replace(COMMENTARY_MARKER, "");
    let stripped = strip_markup(&cleaned);
    EXTRA_BLANK_LINES
        .replace_all(&stripped, "\n\n")
        .trim()
        .to_string()
}

/// Removes heading and separator markup until none is left.
///
/// Repeats because a removal can join fragments into a new separator
/// (`-===--` becomes `---`).
pub fn strip_markup(text: &str) -> String {
    let mut out = text.to_string();
    while FORBIDDEN_MARKUP.iter().any(|m| out.contains(m)) {
        for m in FORBIDDEN_MARKUP {
            out = out.replace(m, "");
        }
    }
    out
}
