// ABOUTME: Scored accent candidate produced per brand/background/weights context
// ABOUTME: Pairs a catalog token with its balance score and derived OKLCH hue

use serde::{Deserialize, Serialize};

use crate::hex::HexColor;
use crate::score::BalanceScoreResult;
use crate::token::{HueFamily, LightnessStep};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub token_id: String,
    pub hex: HexColor,
    /// `"<Hue> <Step>"`, e.g. `"Blue 600"`
    pub source_label: String,
    pub hue_family: Option<HueFamily>,
    pub step: Option<LightnessStep>,
    pub score: BalanceScoreResult,
    /// OKLCH hue angle in degrees, `[0, 360)`
    pub hue: f64,
}

impl ScoredCandidate {
    /// Same candidate identity with a different score
    pub fn with_score(&self, score: BalanceScoreResult) -> Self {
        Self {
            score,
            ..self.clone()
        }
    }
}
