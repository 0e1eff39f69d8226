// ABOUTME: Balance score calculator combining harmony, CUD, contrast and vibrancy sub-scores
// ABOUTME: Also hosts the silent default substitutions for background and weights

use std::sync::Arc;

use chromatid_color::{ColorError, ColorScience, OklabColorScience, parse_hex};
use chromatid_types::{
    BalanceScoreResult, HexColor, NormalizedWeights, PartialScores, ScoreWeights, normalize_weights,
    round1,
};

/// OKLab ΔE at which a color no longer earns any CUD credit
pub const CUD_DELTA_E_CUTOFF: f64 = 0.20;

/// Contrast ratio that earns full contrast credit
pub const FULL_CONTRAST_RATIO: f64 = 7.0;

/// Parse a background, falling back to white when absent or unparseable
pub fn resolve_background(input: Option<&str>) -> HexColor {
    match input {
        Some(raw) => HexColor::parse(raw).unwrap_or_else(|| {
            chromatid_logging::debug!(input = raw, "Background unparseable, using white");
            HexColor::white()
        }),
        None => HexColor::white(),
    }
}

/// Normalize optional weights, falling back to `defaults` when absent
pub fn resolve_weights(weights: Option<&ScoreWeights>, defaults: &ScoreWeights) -> NormalizedWeights {
    normalize_weights(weights.unwrap_or(defaults))
}

/// `100 − (ΔE / 0.20) × 100`, clamped
pub fn cud_score_from_delta_e(delta_e: f64) -> f64 {
    (100.0 - (delta_e / CUD_DELTA_E_CUTOFF) * 100.0).clamp(0.0, 100.0)
}

/// Ratio 1 maps to 0 and ratio 7 or more maps to 100
pub fn contrast_score_from_ratio(ratio: f64) -> f64 {
    (((ratio - 1.0) / (FULL_CONTRAST_RATIO - 1.0)) * 100.0).clamp(0.0, 100.0)
}

fn finite(metric: &'static str, color: &HexColor, value: f64) -> Result<f64, ColorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ColorError::non_finite(metric, color.as_str()))
    }
}

/// Weighted multi-factor score of a candidate against a brand color
#[derive(Clone)]
pub struct BalanceScoreCalculator {
    science: Arc<dyn ColorScience>,
    default_weights: ScoreWeights,
}

impl Default for BalanceScoreCalculator {
    fn default() -> Self {
        Self::new(Arc::new(OklabColorScience))
    }
}

impl BalanceScoreCalculator {
    pub fn new(science: Arc<dyn ColorScience>) -> Self {
        Self {
            science,
            default_weights: ScoreWeights::default(),
        }
    }

    pub fn with_default_weights(mut self, weights: ScoreWeights) -> Self {
        self.default_weights = weights;
        self
    }

    pub fn science(&self) -> &Arc<dyn ColorScience> {
        &self.science
    }

    pub fn default_weights(&self) -> &ScoreWeights {
        &self.default_weights
    }

    /// Score `candidate` for `brand` on `background`.
    ///
    /// Brand and candidate must parse; the background falls back to white.
    pub fn calculate(
        &self,
        brand: &str,
        candidate: &str,
        background: Option<&str>,
        weights: Option<&ScoreWeights>,
    ) -> Result<BalanceScoreResult, ColorError> {
        let brand = parse_hex(brand)?;
        let candidate = parse_hex(candidate)?;
        let background = resolve_background(background);
        let weights = resolve_weights(weights, &self.default_weights);

        let partial = self.calculate_partial(&brand, &candidate)?;
        let contrast = self.calculate_contrast_score(&candidate, &background)?;
        Ok(BalanceScoreResult::combine(partial, contrast, weights))
    }

    /// The background-independent sub-scores, each rounded to one decimal
    pub fn calculate_partial(
        &self,
        brand: &HexColor,
        candidate: &HexColor,
    ) -> Result<PartialScores, ColorError> {
        let harmony = self
            .science
            .hue_distance_harmony_score(brand, std::slice::from_ref(candidate));
        let cud = cud_score_from_delta_e(self.science.nearest_cud_color(candidate).delta_e);
        let vibrancy = self.science.vibrancy_score(candidate);

        Ok(PartialScores {
            harmony_score: round1(finite("harmony score", candidate, harmony)?.clamp(0.0, 100.0)),
            cud_score: round1(finite("CUD score", candidate, cud)?),
            vibrancy_score: round1(finite("vibrancy score", candidate, vibrancy)?.clamp(0.0, 100.0)),
        })
    }

    /// Contrast sub-score against the background, rounded to one decimal
    pub fn calculate_contrast_score(
        &self,
        candidate: &HexColor,
        background: &HexColor,
    ) -> Result<f64, ColorError> {
        let ratio = self.science.wcag_contrast_ratio(candidate, background);
        Ok(round1(contrast_score_from_ratio(finite(
            "contrast ratio",
            candidate,
            ratio,
        )?)))
    }
}

impl std::fmt::Debug for BalanceScoreCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceScoreCalculator")
            .field("default_weights", &self.default_weights)
            .finish_non_exhaustive()
    }
}
