// ABOUTME: Scenario tests for the balance score calculator against real colors
// ABOUTME: Covers CUD exact matches, contrast extremes, weight handling and determinism

use chromatid_types::{NormalizedWeights, ScoreWeights, normalize_weights};

use crate::scoring::BalanceScoreCalculator;

const BRAND: &str = "#0056FF";

#[test]
fn test_cud_red_scores_as_exact_match() {
    let calculator = BalanceScoreCalculator::default();
    let result = calculator
        .calculate(BRAND, "#FF2800", Some("#FFFFFF"), None)
        .unwrap();

    assert!(result.cud_score >= 80.0, "cud score {}", result.cud_score);
    assert_eq!(result.cud_score, 100.0);
}

#[test]
fn test_contrast_extremes_on_white() {
    let calculator = BalanceScoreCalculator::default();

    let black = calculator
        .calculate(BRAND, "#000000", Some("#FFFFFF"), None)
        .unwrap();
    assert!(black.contrast_score >= 95.0);

    let white = calculator
        .calculate(BRAND, "#FFFFFF", Some("#FFFFFF"), None)
        .unwrap();
    assert!(white.contrast_score < 5.0);
}

#[test]
fn test_background_only_changes_contrast() {
    let calculator = BalanceScoreCalculator::default();
    let on_white = calculator
        .calculate(BRAND, "#35A16B", Some("#FFFFFF"), None)
        .unwrap();
    let on_black = calculator
        .calculate(BRAND, "#35A16B", Some("#000000"), None)
        .unwrap();

    assert_eq!(on_white.partial(), on_black.partial());
    assert_ne!(on_white.contrast_score, on_black.contrast_score);
}

#[test]
fn test_missing_background_means_white() {
    let calculator = BalanceScoreCalculator::default();
    let implicit = calculator.calculate(BRAND, "#B36312", None, None).unwrap();
    let explicit = calculator
        .calculate(BRAND, "#B36312", Some("#FFFFFF"), None)
        .unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn test_sub_scores_are_bounded_and_rounded() {
    let calculator = BalanceScoreCalculator::default();
    for candidate in ["#FF2800", "#665C00", "#808080", "#B36312", "#F3F7FF"] {
        let result = calculator
            .calculate(BRAND, candidate, Some("#FFFFFF"), None)
            .unwrap();
        for value in [
            result.total,
            result.harmony_score,
            result.cud_score,
            result.contrast_score,
            result.vibrancy_score,
        ] {
            assert!((0.0..=100.0).contains(&value), "{candidate}: {value}");
            assert!(((value * 10.0).round() - value * 10.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_gray_candidate_gets_no_vibrancy() {
    let result = BalanceScoreCalculator::default()
        .calculate(BRAND, "#808080", None, None)
        .unwrap();
    assert!(result.vibrancy_score < 1.0);
}

#[test]
fn test_custom_weights_are_normalized() {
    let calculator = BalanceScoreCalculator::default();
    let weights = ScoreWeights::new(1.0, 1.0, 1.0, 1.0);
    let result = calculator
        .calculate(BRAND, "#B36312", None, Some(&weights))
        .unwrap();

    assert_eq!(result.weights.sum(), 100);
    assert_eq!(result.weights, normalize_weights(&weights));
}

#[test]
fn test_calculator_default_weights_apply() {
    let weights = ScoreWeights::new(0.0, 0.0, 100.0, 0.0);
    let calculator = BalanceScoreCalculator::default().with_default_weights(weights);
    let result = calculator.calculate(BRAND, "#000000", None, None).unwrap();

    assert_eq!(result.weights.contrast, 100);
    assert_eq!(result.total, result.contrast_score);
}

#[test]
fn test_normalization_properties() {
    let inputs = [
        ScoreWeights::new(30.0, 20.0, 25.0, 25.0),
        ScoreWeights::new(1.0, 1.0, 1.0, 0.0),
        ScoreWeights::new(0.3, 0.3, 0.3, 0.1),
        ScoreWeights::new(7.0, 0.0, 0.0, 0.0),
        ScoreWeights::new(-5.0, 2.0, f64::NAN, 2.0),
    ];
    for input in inputs {
        let normalized = normalize_weights(&input);
        assert_eq!(normalized.sum(), 100, "{input:?}");
        assert_eq!(normalize_weights(&normalized.into()), normalized);
    }

    let zero = ScoreWeights::new(0.0, 0.0, 0.0, 0.0);
    assert_eq!(normalize_weights(&zero), NormalizedWeights::DEFAULT);
}

#[test]
fn test_scoring_is_deterministic() {
    let calculator = BalanceScoreCalculator::default();
    let first = calculator
        .calculate(BRAND, "#7E4201", Some("#F8F8FB"), None)
        .unwrap();
    let second = calculator
        .calculate(BRAND, "#7E4201", Some("#F8F8FB"), None)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.total.to_bits(), second.total.to_bits());
}
