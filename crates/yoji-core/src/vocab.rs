//! The word pool and hand dealing.
//!
//! Every entry is a two-character word, so any front/back pair forms a
//! four-character candidate.

use rand::seq::SliceRandom;
use rand::Rng;

/// Built-in vocabulary. Read-only and shared by every session.
pub const VOCABULARY: &[&str] = &[
    "悪魔", "天使", "雷電", "波動", "黄金", "深海", "灼熱", "虚無",
    "旋風", "断罪", "珈琲", "筋肉", "爆発", "銀河", "初恋", "忍者",
    "暗黒", "聖女", "野望", "絶望", "希望", "無限", "時空", "伝説",
    "焼肉", "会計", "残業", "有給", "睡眠", "反撃", "覚醒", "帝国",
    "戦車", "妖精", "東京", "地獄", "天国", "暴走", "純情", "電脳",
    "天気", "刃物", "虹色", "電気", "迷宮", "運命", "革命", "神話",
    "宇宙", "最強", "虚構", "現実", "爆音", "沈黙", "極道", "純白",
];

/// Number of words dealt per round unless configured otherwise.
pub const DEFAULT_HAND_SIZE: usize = 12;

/// A candidate word needs a front and a back entry.
pub const MIN_HAND_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DealError {
    #[error("hand size {requested} exceeds pool size {available}")]
    HandTooLarge { requested: usize, available: usize },

    #[error("hand size {requested} is below the minimum of {MIN_HAND_SIZE}")]
    HandTooSmall { requested: usize },
}

/// Draws `k` distinct entries from `pool`, uniformly and without replacement.
///
/// Distinctness is by position: a pool with repeated strings can yield
/// repeated strings, the built-in vocabulary has none.
pub fn deal<R: Rng + ?Sized>(
    pool: &[&'static str],
    k: usize,
    rng: &mut R,
) -> Result<Vec<&'static str>, DealError> {
    if k < MIN_HAND_SIZE {
        return Err(DealError::HandTooSmall { requested: k });
    }
    if k > pool.len() {
        return Err(DealError::HandTooLarge {
            requested: k,
            available: pool.len(),
        });
    }
    Ok(pool.choose_multiple(rng, k).copied().collect())
}
