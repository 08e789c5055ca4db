//! Radar-chart data for the score comparison.
//!
//! Values pass through untouched; renderers only need the closed polygons
//! and, for canvas backends, [`RadarChart::vertices`].

use serde::Serialize;

use crate::rubric::{ScoreVector, DIMENSIONS, MAX_SCORE};
use crate::session::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesColor {
    Red,
    Blue,
}

impl SeriesColor {
    pub fn for_player(player: Player) -> Self {
        match player {
            Player::A => SeriesColor::Red,
            Player::B => SeriesColor::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarSeries {
    pub player: Player,
    pub name: String,
    pub color: SeriesColor,
    /// Scores in axis order with the first value repeated to close the shape.
    pub closed_values: Vec<u8>,
}

impl RadarSeries {
    fn new(player: Player, word: &str, scores: &ScoreVector) -> Self {
        let mut closed_values = scores.values().to_vec();
        closed_values.push(scores.values()[0]);
        Self {
            player,
            name: format!("{} ({})", player.display_name(), word),
            color: SeriesColor::for_player(player),
            closed_values,
        }
    }

    /// The raw scores, without the closing point.
    pub fn values(&self) -> &[u8] {
        &self.closed_values[..DIMENSIONS]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarChart {
    /// Axis labels with the first repeated, matching `closed_values`.
    pub closed_axes: Vec<&'static str>,
    pub range: (u8, u8),
    pub series: [RadarSeries; 2],
}

impl RadarChart {
    pub fn new(
        labels: [&'static str; DIMENSIONS],
        words: [&str; 2],
        scores: [&ScoreVector; 2],
    ) -> Self {
        let mut closed_axes = labels.to_vec();
        closed_axes.push(labels[0]);
        Self {
            closed_axes,
            range: (0, MAX_SCORE),
            series: [
                RadarSeries::new(Player::A, words[0], scores[0]),
                RadarSeries::new(Player::B, words[1], scores[1]),
            ],
        }
    }

    pub fn axes(&self) -> &[&'static str] {
        &self.closed_axes[..DIMENSIONS]
    }

    /// Cartesian points of a closed polygon, first axis pointing up and axes
    /// running clockwise. A score of `MAX_SCORE` lands on `radius`.
    pub fn vertices(series: &RadarSeries, radius: f64) -> Vec<(f64, f64)> {
        series
            .closed_values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let (x, y) = axis_direction(i % DIMENSIONS);
                let r = radius * f64::from(v) / f64::from(MAX_SCORE);
                (x * r, y * r)
            })
            .collect()
    }

    /// Outer ends of each axis, for drawing the grid.
    pub fn axis_ends(radius: f64) -> Vec<(f64, f64)> {
        (0..DIMENSIONS)
            .map(|i| {
                let (x, y) = axis_direction(i);
                (x * radius, y * radius)
            })
            .collect()
    }
}

fn axis_direction(i: usize) -> (f64, f64) {
    let angle = std::f64::consts::FRAC_PI_2 - std::f64::consts::TAU * i as f64 / DIMENSIONS as f64;
    (angle.cos(), angle.sin())
}
