// ABOUTME: WCAG 2.1 relative luminance and contrast ratio calculations
// ABOUTME: Also nudges a color's OKLCH lightness until it meets a minimum contrast

use chromatid_types::HexColor;

use crate::space::{Oklch, Rgb, hex_to_oklch, oklch_to_hex};

/// WCAG contrast ratios for accessibility compliance
pub struct ContrastRatios;

impl ContrastRatios {
    pub const AAA_NORMAL: f64 = 7.0;
    pub const AA_NORMAL: f64 = 4.5;
    pub const AA_LARGE: f64 = 3.0;
    pub const NONE: f64 = 1.0;
}

/// Luminance where contrast against white equals contrast against black
const LUMINANCE_MIDPOINT: f64 = 0.179;

const LIGHTNESS_STEP: f64 = 0.01;

/// Relative luminance per WCAG 2.1
pub fn relative_luminance(color: &HexColor) -> f64 {
    let [r, g, b] = Rgb::from_hex(color).to_linear();
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio between two colors, 1.0 to 21.0
pub fn contrast_ratio(a: &HexColor, b: &HexColor) -> f64 {
    let lum_a = relative_luminance(a);
    let lum_b = relative_luminance(b);

    let lighter = lum_a.max(lum_b);
    let darker = lum_a.min(lum_b);

    (lighter + 0.05) / (darker + 0.05)
}

/// Move `color` away from `background` in OKLCH lightness until the contrast
/// reaches `min_ratio`. Hue is kept; chroma only shrinks when the gamut
/// requires it. Returns the best color found if the ratio is unreachable.
pub fn ensure_contrast(color: &HexColor, background: &HexColor, min_ratio: f64) -> HexColor {
    let start_ratio = contrast_ratio(color, background);
    if start_ratio >= min_ratio {
        return color.clone();
    }

    let lch = hex_to_oklch(color);
    let direction = if relative_luminance(background) > LUMINANCE_MIDPOINT {
        -1.0
    } else {
        1.0
    };

    let mut best = color.clone();
    let mut best_ratio = start_ratio;

    for step in 1..=100 {
        let l = (lch.l + direction * LIGHTNESS_STEP * f64::from(step)).clamp(0.0, 1.0);
        let candidate = oklch_to_hex(Oklch { l, ..lch });
        let ratio = contrast_ratio(&candidate, background);

        if ratio >= min_ratio {
            chromatid_logging::trace!(
                color = %color,
                adjusted = %candidate,
                background = %background,
                ratio,
                "Adjusted lightness to meet contrast"
            );
            return candidate;
        }
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
        if l <= 0.0 || l >= 1.0 {
            break;
        }
    }

    chromatid_logging::debug!(
        color = %color,
        background = %background,
        best_ratio,
        min_ratio,
        "Minimum contrast unreachable by lightness adjustment"
    );
    best
}
