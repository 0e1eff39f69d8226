// ABOUTME: Balance score values produced by the scoring calculator
// ABOUTME: Immutable, comparable by value, safe to cache and share

use serde::{Deserialize, Serialize};

use crate::weights::NormalizedWeights;

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The background-independent sub-scores for one brand/candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialScores {
    pub harmony_score: f64,
    pub cud_score: f64,
    pub vibrancy_score: f64,
}

/// A weighted total plus the four sub-scores it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceScoreResult {
    /// Weighted total, 0-100
    pub total: f64,
    pub harmony_score: f64,
    pub cud_score: f64,
    pub contrast_score: f64,
    pub vibrancy_score: f64,
    /// Weights actually applied
    pub weights: NormalizedWeights,
}

impl BalanceScoreResult {
    /// Combine sub-scores with normalized weights into a rounded total.
    pub fn combine(partial: PartialScores, contrast_score: f64, weights: NormalizedWeights) -> Self {
        let weighted = partial.harmony_score * f64::from(weights.harmony)
            + partial.cud_score * f64::from(weights.cud)
            + contrast_score * f64::from(weights.contrast)
            + partial.vibrancy_score * f64::from(weights.vibrancy);

        Self {
            total: round1(weighted / 100.0),
            harmony_score: partial.harmony_score,
            cud_score: partial.cud_score,
            contrast_score,
            vibrancy_score: partial.vibrancy_score,
            weights,
        }
    }

    pub fn partial(&self) -> PartialScores {
        PartialScores {
            harmony_score: self.harmony_score,
            cud_score: self.cud_score,
            vibrancy_score: self.vibrancy_score,
        }
    }
}
