// ABOUTME: Scenario tests for the harmony palette generator
// ABOUTME: Exact picks for a known brand, exclusions, failure codes and seeded backfill

use std::sync::Arc;

use chromatid_catalog::{StaticTokenSource, TokenCatalog};
use chromatid_color::{contrast_ratio, hex_to_oklch, hue_distance};
use chromatid_types::{
    CatalogToken, HarmonyType, HexColor, HueFamily, LightnessStep, TokenCategory,
};

use crate::cache::ScoreCache;
use crate::candidates::AccentCandidateService;
use crate::config::AccentConfig;
use crate::palette::{HarmonyPaletteGenerator, HarmonyPaletteResult, PaletteOptions};
use crate::scoring::BalanceScoreCalculator;

const BRAND: &str = "#0056FF";

fn embedded_generator() -> HarmonyPaletteGenerator {
    HarmonyPaletteGenerator::new(Arc::new(AccentCandidateService::with_defaults()))
}

fn token(id: &str, hex: &str, hue: HueFamily, step: u16) -> CatalogToken {
    CatalogToken {
        id: id.to_string(),
        hex: HexColor::parse(hex).unwrap(),
        name_en: id.to_string(),
        name_ja: id.to_string(),
        category: TokenCategory::Chromatic,
        hue: Some(hue),
        step: LightnessStep::new(step),
        role: None,
    }
}

fn static_generator(tokens: Vec<CatalogToken>) -> HarmonyPaletteGenerator {
    let service = AccentCandidateService::new(
        Arc::new(TokenCatalog::new(Arc::new(StaticTokenSource::new(tokens)))),
        BalanceScoreCalculator::default(),
        Arc::new(ScoreCache::new()),
        AccentConfig::default(),
    );
    HarmonyPaletteGenerator::new(Arc::new(service))
}

/// One color near the complement of the brand plus hue-distant fillers
fn sparse_tokens() -> Vec<CatalogToken> {
    vec![
        token("blue", "#264AF4", HueFamily::Blue, 600),
        token("orange", "#B36312", HueFamily::Orange, 700),
        token("red", "#FF2800", HueFamily::Red, 500),
        token("green", "#35A16B", HueFamily::Green, 600),
        token("magenta", "#C7007F", HueFamily::Magenta, 700),
    ]
}

fn accent_strings(result: &HarmonyPaletteResult) -> Vec<&str> {
    result.accents.iter().map(HexColor::as_str).collect()
}

fn assert_palette_invariants(result: &HarmonyPaletteResult, background: &HexColor) {
    assert!(result.achieved_count >= 1);
    assert!(result.achieved_count <= result.requested_count);
    assert_eq!(result.accents.len(), result.achieved_count);
    assert_eq!(result.candidates.len(), result.achieved_count);

    for (i, accent) in result.accents.iter().enumerate() {
        assert!(!result.accents[i + 1..].contains(accent), "duplicate {accent}");
        assert!(contrast_ratio(accent, background) >= 3.0 - 1e-9);
    }
    for pair in result.accents.windows(2) {
        assert!(hex_to_oklch(&pair[0]).l >= hex_to_oklch(&pair[1]).l);
    }
}

#[tokio::test]
async fn test_complementary_pair_for_blue_brand() {
    let result = embedded_generator()
        .get_harmony_palette_colors(
            BRAND,
            HarmonyType::Complementary,
            &PaletteOptions::default().with_accent_count(2),
        )
        .await
        .unwrap();

    assert_eq!(accent_strings(&result), vec!["#B36312", "#7E4201"]);
    assert_eq!(result.requested_count, 2);
    assert_eq!(result.achieved_count, 2);
    assert_eq!(result.backfilled, 0);
    assert_eq!(result.cost.missing, 0);

    let ids: Vec<&str> = result.candidates.iter().map(|c| c.token_id.as_str()).collect();
    assert_eq!(ids, vec!["dads-orange-700", "dads-orange-900"]);

    let target = (hex_to_oklch(&result.brand).h + 180.0).rem_euclid(360.0);
    for candidate in &result.candidates {
        assert!(hue_distance(candidate.hue, target) <= 30.0);
        assert_ne!(candidate.token_id, "dads-blue-800");
    }
    assert_palette_invariants(&result, &HexColor::white());
}

#[tokio::test]
async fn test_single_accent_takes_the_closest_target() {
    let result = embedded_generator()
        .get_harmony_palette_colors(
            BRAND,
            HarmonyType::Complementary,
            &PaletteOptions::default().with_accent_count(1),
        )
        .await
        .unwrap();
    assert_eq!(accent_strings(&result), vec!["#B36312"]);
}

#[tokio::test]
async fn test_accent_count_is_clamped() {
    let generator = embedded_generator();

    let many = generator
        .get_harmony_palette_colors(
            BRAND,
            HarmonyType::Triadic,
            &PaletteOptions::default().with_accent_count(10),
        )
        .await
        .unwrap();
    assert_eq!(many.requested_count, 3);
    assert_palette_invariants(&many, &HexColor::white());

    let none = generator
        .get_harmony_palette_colors(
            BRAND,
            HarmonyType::Triadic,
            &PaletteOptions::default().with_accent_count(0),
        )
        .await
        .unwrap();
    assert_eq!(none.requested_count, 1);
}

#[tokio::test]
async fn test_zero_max_accents_still_yields_one_accent() {
    let mut config = AccentConfig::default();
    config.palette.max_accents = 0;
    assert!(config.validate().is_err());

    let service = AccentCandidateService::new(
        Arc::new(TokenCatalog::embedded()),
        BalanceScoreCalculator::default(),
        Arc::new(ScoreCache::new()),
        config,
    );
    let generator = HarmonyPaletteGenerator::new(Arc::new(service));

    for accent_count in [None, Some(0), Some(3)] {
        let options = PaletteOptions {
            accent_count,
            ..PaletteOptions::default()
        };
        let result = generator
            .get_harmony_palette_colors(BRAND, HarmonyType::Complementary, &options)
            .await
            .unwrap();
        assert_eq!(result.requested_count, 1);
        assert_palette_invariants(&result, &HexColor::white());
    }
}

#[tokio::test]
async fn test_excluded_tokens_are_never_picked() {
    let generator = embedded_generator();
    let by_id = generator
        .get_harmony_palette_colors(
            BRAND,
            HarmonyType::Complementary,
            &PaletteOptions::default()
                .with_accent_count(2)
                .excluding("dads-orange-700"),
        )
        .await
        .unwrap();

    assert!(!accent_strings(&by_id).contains(&"#B36312"));
    assert!(by_id.candidates.iter().all(|c| c.token_id != "dads-orange-700"));
    assert!(accent_strings(&by_id).contains(&"#7E4201"));

    let by_hex = generator
        .get_harmony_palette_colors(
            BRAND,
            HarmonyType::Complementary,
            &PaletteOptions::default()
                .with_accent_count(2)
                .excluding("#b36312"),
        )
        .await
        .unwrap();
    assert_eq!(by_hex.accents, by_id.accents);
}

#[tokio::test]
async fn test_dark_background_contrast() {
    let result = embedded_generator()
        .get_harmony_palette_colors(
            BRAND,
            HarmonyType::Analogous,
            &PaletteOptions::default().with_background("#000000"),
        )
        .await
        .unwrap();
    assert_palette_invariants(&result, &HexColor::black());
}

#[tokio::test]
async fn test_all_is_not_a_palette_pattern() {
    let err = embedded_generator()
        .get_harmony_palette_colors(BRAND, HarmonyType::All, &PaletteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_HARMONY_TYPE");
}

#[tokio::test]
async fn test_invalid_brand_is_rejected() {
    let err = embedded_generator()
        .get_harmony_palette_colors("blue", HarmonyType::Triadic, &PaletteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BRAND_COLOR_NOT_SET");
}

#[tokio::test]
async fn test_no_tokens_near_any_target() {
    let generator = static_generator(vec![
        token("blue-600", "#264AF4", HueFamily::Blue, 600),
        token("blue-800", "#0031D8", HueFamily::Blue, 800),
    ]);
    let err = generator
        .get_harmony_palette_colors(BRAND, HarmonyType::Complementary, &PaletteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "PALETTE_GENERATION_FAILED");

    // The same catalog still serves a single-hue pattern
    let mono = generator
        .get_harmony_palette_colors(BRAND, HarmonyType::Monochromatic, &PaletteOptions::default())
        .await
        .unwrap();
    assert_eq!(accent_strings(&mono), vec!["#0031D8"]);
}

#[tokio::test]
async fn test_backfill_is_seeded_and_hue_distant() {
    let options = PaletteOptions::default().with_accent_count(3);
    let first = static_generator(sparse_tokens())
        .get_harmony_palette_colors(BRAND, HarmonyType::Complementary, &options)
        .await
        .unwrap();
    let second = static_generator(sparse_tokens())
        .get_harmony_palette_colors(BRAND, HarmonyType::Complementary, &options)
        .await
        .unwrap();

    assert_eq!(first.accents, second.accents);
    assert_eq!(first.achieved_count, 3);
    assert_eq!(first.backfilled, 2);
    assert!(first.candidates.iter().any(|c| c.token_id == "orange"));
    assert!(first.candidates.iter().all(|c| c.token_id != "blue"));

    let brand_hue = hex_to_oklch(&first.brand).h;
    for candidate in first.candidates.iter().filter(|c| c.token_id != "orange") {
        assert!(hue_distance(candidate.hue, brand_hue) >= 60.0);
    }
}

#[tokio::test]
async fn test_every_directional_pattern_is_reported() {
    let palettes = embedded_generator()
        .get_all_harmony_palettes(BRAND, &PaletteOptions::default())
        .await
        .unwrap();

    assert_eq!(palettes.len(), HarmonyType::ALL_DIRECTIONAL.len());
    assert!(!palettes.contains_key(&HarmonyType::All));
    for result in palettes.values().filter_map(|r| r.as_ref().ok()) {
        assert_palette_invariants(result, &HexColor::white());
    }

    let complementary = palettes[&HarmonyType::Complementary].as_ref().unwrap();
    assert_eq!(complementary.requested_count, 3);
}

#[tokio::test]
async fn test_palettes_are_deterministic() {
    let generator = embedded_generator();
    let options = PaletteOptions::default();
    let first = generator
        .get_harmony_palette_colors(BRAND, HarmonyType::Square, &options)
        .await
        .unwrap();
    let second = generator
        .get_harmony_palette_colors(BRAND, HarmonyType::Square, &options)
        .await
        .unwrap();
    assert_eq!(first, second);
}
