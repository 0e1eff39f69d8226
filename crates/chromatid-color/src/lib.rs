// ABOUTME: Color science primitives consumed by the accent recommendation core
// ABOUTME: Exposes the ColorScience trait and its OKLab-based default implementation

pub mod contrast;
pub mod cud;
pub mod cvd;
pub mod error;
pub mod harmony;
pub mod space;

pub use contrast::{ContrastRatios, contrast_ratio, ensure_contrast, relative_luminance};
pub use cud::{CUD_PALETTE, CudColor, CudGroup, CudMatch, MatchLevel};
pub use error::{ColorError, Result};
pub use space::{Oklab, Oklch, hex_to_oklab, hex_to_oklch, hue_distance, oklch_to_hex};

use chromatid_types::{CvdType, HexColor};

/// Parse a user-supplied hex string into its canonical form.
pub fn parse_hex(input: &str) -> Result<HexColor> {
    HexColor::parse(input).ok_or_else(|| ColorError::invalid_hex(input))
}

/// Unscaled Euclidean OKLab distance, roughly 0 to 1
pub fn delta_e_ok(a: &HexColor, b: &HexColor) -> f64 {
    hex_to_oklab(a).distance(&hex_to_oklab(b))
}

/// OKLab distance scaled by 100, roughly 0 to 100
pub fn simple_delta_e(a: &HexColor, b: &HexColor) -> f64 {
    delta_e_ok(a, b) * 100.0
}

/// The color operations the scoring and palette services depend on.
///
/// Kept as a trait so services can run against a stub in tests and so the
/// distance metric can be swapped without touching the search code.
pub trait ColorScience: Send + Sync {
    fn hex_to_oklch(&self, color: &HexColor) -> Oklch;

    fn wcag_contrast_ratio(&self, a: &HexColor, b: &HexColor) -> f64;

    /// Perceptual distance on the 0-100 scale
    fn simple_delta_e(&self, a: &HexColor, b: &HexColor) -> f64;

    fn simulate_cvd(&self, color: &HexColor, cvd: CvdType) -> HexColor;

    fn nearest_cud_color(&self, color: &HexColor) -> CudMatch;

    fn hue_distance_harmony_score(&self, brand: &HexColor, candidates: &[HexColor]) -> f64;

    fn vibrancy_score(&self, color: &HexColor) -> f64;
}

/// Default implementation backed by OKLab/OKLCH math
#[derive(Debug, Clone, Copy, Default)]
pub struct OklabColorScience;

impl ColorScience for OklabColorScience {
    fn hex_to_oklch(&self, color: &HexColor) -> Oklch {
        space::hex_to_oklch(color)
    }

    fn wcag_contrast_ratio(&self, a: &HexColor, b: &HexColor) -> f64 {
        contrast::contrast_ratio(a, b)
    }

    fn simple_delta_e(&self, a: &HexColor, b: &HexColor) -> f64 {
        simple_delta_e(a, b)
    }

    fn simulate_cvd(&self, color: &HexColor, cvd: CvdType) -> HexColor {
        cvd::simulate(color, cvd)
    }

    fn nearest_cud_color(&self, color: &HexColor) -> CudMatch {
        cud::nearest(color)
    }

    fn hue_distance_harmony_score(&self, brand: &HexColor, candidates: &[HexColor]) -> f64 {
        harmony::hue_distance_harmony_score(brand, candidates)
    }

    fn vibrancy_score(&self, color: &HexColor) -> f64 {
        harmony::vibrancy_score(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_accepts_shorthand() {
        assert_eq!(parse_hex("abc").unwrap().as_str(), "#AABBCC");
        assert_eq!(parse_hex("#0056ff").unwrap().as_str(), "#0056FF");
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        let err = parse_hex("#12345").unwrap_err();
        assert_eq!(err, ColorError::invalid_hex("#12345"));
        assert!(parse_hex("").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
    }

    #[test]
    fn test_delta_e_scales() {
        let a = parse_hex("#CC0339").unwrap();
        let b = parse_hex("#664635").unwrap();
        let scaled = simple_delta_e(&a, &b);
        assert!((scaled - delta_e_ok(&a, &b) * 100.0).abs() < 1e-12);
        assert!((scaled - 20.39).abs() < 0.1, "{scaled}");
        assert_eq!(simple_delta_e(&a, &a), 0.0);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let science: Box<dyn ColorScience> = Box::new(OklabColorScience);
        let white = HexColor::white();
        let black = HexColor::black();
        assert!((science.wcag_contrast_ratio(&white, &black) - 21.0).abs() < 1e-9);
        assert_eq!(science.nearest_cud_color(&black).nearest.id, "black");
        assert_eq!(
            science.simulate_cvd(&black, CvdType::Tritanopia),
            HexColor::black()
        );
    }
}
