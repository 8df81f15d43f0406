//! Score bands and trends

use crate::{Category, SeoScore};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lowest score of each band
const EXCELLENT_MIN: f64 = 8.0;
const GOOD_MIN: f64 = 6.0;
const FAIR_MIN: f64 = 4.0;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Severity band of a 0-10 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Band::Excellent => "Excellent",
            Band::Good => "Good",
            Band::Fair => "Fair",
            Band::Poor => "Poor",
        }
    }

    /// One-line explanation shown under the overall score
    pub fn description(self) -> &'static str {
        match self {
            Band::Excellent => "Strong SEO fundamentals across the board",
            Band::Good => "Solid, with a few areas worth tightening",
            Band::Fair => "Noticeable gaps that are likely costing visibility",
            Band::Poor => "Significant problems; start with the top recommendations",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoreError {
    #[error("score {0} is outside 0-10")]
    OutOfRange(f64),
}

/// Classify a score. Values outside 0-10 are clamped first; NaN counts as 0.
pub fn classify(score: f64) -> Band {
    let score = clamp_score(score);
    if score >= EXCELLENT_MIN {
        Band::Excellent
    } else if score >= GOOD_MIN {
        Band::Good
    } else if score >= FAIR_MIN {
        Band::Fair
    } else {
        Band::Poor
    }
}

/// Classify a score, rejecting anything outside 0-10 (including NaN)
pub fn classify_strict(score: f64) -> Result<Band, ScoreError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(classify(score))
    } else {
        Err(ScoreError::OutOfRange(score))
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        MIN_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Band of every category of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandSet {
    pub overall: Band,
    pub metadata: Band,
    pub links: Band,
    pub content: Band,
    pub performance: Band,
}

impl BandSet {
    pub fn from_scores(score: &SeoScore) -> Self {
        let b = |c: Category| classify(score.get(c));
        Self {
            overall: b(Category::Overall),
            metadata: b(Category::Metadata),
            links: b(Category::Links),
            content: b(Category::Content),
            performance: b(Category::Performance),
        }
    }
}

/// Render a score with exactly one decimal place
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
    Unknown,
}

/// Movement of a score against a previous value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// `current - previous`; absent when there is no previous score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

impl Trend {
    /// Signed delta with one decimal place: "+1.2", "-0.7", "0.0"
    pub fn formatted_delta(&self) -> Option<String> {
        self.delta.map(format_delta)
    }
}

pub fn trend(current: f64, previous: Option<f64>) -> Trend {
    let Some(previous) = previous else {
        return Trend {
            direction: TrendDirection::Unknown,
            delta: None,
        };
    };
    let direction = if current > previous {
        TrendDirection::Up
    } else if current < previous {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };
    Trend {
        direction,
        delta: Some(current - previous),
    }
}

/// Format a score delta with a leading sign for positive values
pub fn format_delta(delta: f64) -> String {
    let rendered = format!("{:.1}", delta);
    // -0.04 rounds to "-0.0"; a delta that rounds to zero shows no movement sign
    if rendered == "-0.0" {
        return "0.0".to_string();
    }
    if delta > 0.0 && rendered != "0.0" {
        format!("+{}", rendered)
    } else {
        rendered
    }
}
