// ABOUTME: Hue-distance harmony and vibrancy (muddiness avoidance) sub-scores
// ABOUTME: Both operate in OKLCH and return values on a 0-100 scale

use chromatid_types::HexColor;

use crate::space::{Oklch, hex_to_oklch, hue_distance};

/// Below this OKLCH chroma the hue is too unstable to judge harmony
pub const HARMONY_CHROMA_FLOOR: f64 = 0.02;

/// Score returned when either color is effectively achromatic
pub const NEUTRAL_HARMONY_SCORE: f64 = 50.0;

/// Half-width of each harmonic anchor's window, in degrees
const ANCHOR_WINDOW: f64 = 30.0;

/// Harmonic hue differences and how strongly each one reads as intentional
const HARMONIC_ANCHORS: [(f64, f64); 7] = [
    (180.0, 1.0),  // complementary
    (150.0, 0.95), // split-complementary
    (120.0, 0.95), // triadic
    (90.0, 0.8),   // square
    (60.0, 0.75),
    (30.0, 0.9), // analogous
    (0.0, 0.7),  // monochromatic
];

fn pair_harmony(brand: &Oklch, candidate: &Oklch) -> f64 {
    if brand.c < HARMONY_CHROMA_FLOOR || candidate.c < HARMONY_CHROMA_FLOOR {
        return NEUTRAL_HARMONY_SCORE;
    }

    let distance = hue_distance(brand.h, candidate.h);
    HARMONIC_ANCHORS
        .iter()
        .map(|&(angle, weight)| {
            let closeness = (1.0 - (distance - angle).abs() / ANCHOR_WINDOW).max(0.0);
            weight * closeness * 100.0
        })
        .fold(0.0, f64::max)
}

/// Average harmony of each candidate against the brand hue, 0 when empty
pub fn hue_distance_harmony_score(brand: &HexColor, candidates: &[HexColor]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }

    let brand_lch = hex_to_oklch(brand);
    let total: f64 = candidates
        .iter()
        .map(|candidate| pair_harmony(&brand_lch, &hex_to_oklch(candidate)))
        .sum();

    (total / candidates.len() as f64).clamp(0.0, 100.0)
}

/// Chroma at which a color counts as fully vivid
const VIVID_CHROMA: f64 = 0.20;

/// Hue band (OKLCH degrees) where dark colors read as olive or mud
const MUDDY_HUE_RANGE: (f64, f64) = (60.0, 130.0);
const MUDDY_LIGHTNESS_CEILING: f64 = 0.65;

fn lightness_factor(l: f64) -> f64 {
    const LOW: f64 = 0.45;
    const HIGH: f64 = 0.85;
    const FLOOR: f64 = 0.4;

    if l < LOW {
        FLOOR + (1.0 - FLOOR) * (l.max(0.0) / LOW)
    } else if l > HIGH {
        FLOOR + (1.0 - FLOOR) * ((1.0 - l).max(0.0) / (1.0 - HIGH))
    } else {
        1.0
    }
}

fn muddiness_factor(lch: &Oklch) -> f64 {
    let (start, end) = MUDDY_HUE_RANGE;
    if (start..=end).contains(&lch.h) && lch.l < MUDDY_LIGHTNESS_CEILING {
        // Halves the score at black, no penalty at the ceiling
        0.5 + 0.5 * (lch.l.max(0.0) / MUDDY_LIGHTNESS_CEILING)
    } else {
        1.0
    }
}

/// Perceptual vividness of a color, 0-100
pub fn vibrancy_score(color: &HexColor) -> f64 {
    let lch = hex_to_oklch(color);
    let chroma = (lch.c / VIVID_CHROMA).min(1.0);
    (chroma * lightness_factor(lch.l) * muddiness_factor(&lch) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    #[test]
    fn test_complementary_scores_highest() {
        // Blue (h≈262) against orange (h≈58): about 156 degrees apart
        let complementary = hue_distance_harmony_score(&hex("#0056FF"), &[hex("#B36312")]);
        let clashing = hue_distance_harmony_score(&hex("#0056FF"), &[hex("#00A0A0")]);
        assert!(complementary > 70.0, "{complementary}");
        assert!(complementary > clashing);
    }

    #[test]
    fn test_achromatic_is_neutral() {
        let score = hue_distance_harmony_score(&hex("#0056FF"), &[hex("#808080")]);
        assert_eq!(score, NEUTRAL_HARMONY_SCORE);
    }

    #[test]
    fn test_empty_candidates() {
        assert_eq!(hue_distance_harmony_score(&hex("#0056FF"), &[]), 0.0);
    }

    #[test]
    fn test_vibrancy_prefers_vivid_over_muddy() {
        let vivid = vibrancy_score(&hex("#FF9900"));
        let olive = vibrancy_score(&hex("#665C00"));
        let gray = vibrancy_score(&hex("#808080"));
        assert!(vivid > olive, "{vivid} vs {olive}");
        assert!(gray < 5.0);
        for sample in ["#FFFFFF", "#000000", "#0041FF", "#FAF500"] {
            let score = vibrancy_score(&hex(sample));
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn test_lightness_window() {
        assert_eq!(lightness_factor(0.6), 1.0);
        assert!((lightness_factor(0.0) - 0.4).abs() < 1e-12);
        assert!((lightness_factor(1.0) - 0.4).abs() < 1e-12);
    }
}
