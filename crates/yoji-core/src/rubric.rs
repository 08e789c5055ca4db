//! The fixed evaluation rubric and per-player score vectors.

use serde::Serialize;

/// Number of rubric dimensions; every score vector has exactly this length.
pub const DIMENSIONS: usize = 5;

/// Score substituted for every dimension when a reply cannot be parsed.
pub const NEUTRAL_SCORE: u8 = 50;

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub label: &'static str,
    pub description: &'static str,
    /// Percentage weight; the weights of [`RUBRIC`] sum to 100.
    pub weight: u8,
}

pub const RUBRIC: [Dimension; DIMENSIONS] = [
    Dimension {
        label: "意味の拡張性",
        description: "単語同士の組み合わせによる化学反応と意味の広がり",
        weight: 30,
    },
    Dimension {
        label: "視覚的強度",
        description: "文字として並んだ時のパワー",
        weight: 20,
    },
    Dimension {
        label: "音韻的快感",
        description: "声に出した時のリズム",
        weight: 20,
    },
    Dimension {
        label: "意外性",
        description: "予想を裏切る組み合わせの驚き",
        weight: 15,
    },
    Dimension {
        label: "物語性",
        description: "その言葉から立ち上がる情景や物語",
        weight: 15,
    },
];

pub fn labels() -> [&'static str; DIMENSIONS] {
    RUBRIC.map(|d| d.label)
}

/// One player's scores, in rubric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreVector(pub [u8; DIMENSIONS]);

impl ScoreVector {
    pub const NEUTRAL: ScoreVector = ScoreVector([NEUTRAL_SCORE; DIMENSIONS]);

    pub fn values(&self) -> &[u8; DIMENSIONS] {
        &self.0
    }

    /// Unrounded weighted total, 100 times the [`overall`](Self::overall) scale.
    pub fn weighted_sum(&self) -> u32 {
        self.0
            .iter()
            .zip(RUBRIC.iter())
            .map(|(&v, d)| u32::from(v) * u32::from(d.weight))
            .sum()
    }

    /// Weighted total on the same 0–100 scale, rounded to the nearest integer.
    pub fn overall(&self) -> u8 {
        ((self.weighted_sum() + 50) / 100) as u8
    }
}

impl Default for ScoreVector {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    A,
    B,
    Draw,
}

impl Winner {
    pub fn decide(a: &ScoreVector, b: &ScoreVector) -> Self {
        match a.weighted_sum().cmp(&b.weighted_sum()) {
            std::cmp::Ordering::Greater => Winner::A,
            std::cmp::Ordering::Less => Winner::B,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }
}
