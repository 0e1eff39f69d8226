// ABOUTME: sRGB, linear RGB, OKLab and OKLCH conversions (D65)
// ABOUTME: Direct linear sRGB <-> OKLab transforms with cube-root nonlinearity

use chromatid_types::HexColor;

/// Below this chroma a color is treated as achromatic and its hue reported as 0
pub const ACHROMATIC_CHROMA_EPSILON: f64 = 1e-4;

/// Gamma-encoded sRGB, channels in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab color (L, a, b)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCH color (L, C, h in degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

pub fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

impl Rgb {
    pub fn from_hex(hex: &HexColor) -> Self {
        let [r, g, b] = hex.to_rgb8();
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Quantize to 8-bit channels, clamping out-of-range values
    pub fn to_hex(&self) -> HexColor {
        let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        HexColor::from_rgb8([quantize(self.r), quantize(self.g), quantize(self.b)])
    }

    pub fn to_linear(&self) -> [f64; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }

    /// Encode linear channels, clamping each into gamut first
    pub fn from_linear(linear: [f64; 3]) -> Self {
        let encode = |v: f64| linear_to_srgb(v.clamp(0.0, 1.0));
        Self {
            r: encode(linear[0]),
            g: encode(linear[1]),
            b: encode(linear[2]),
        }
    }
}

pub fn linear_to_oklab([r, g, b]: [f64; 3]) -> Oklab {
    // Linear sRGB -> LMS (OKLab M1)
    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    // LMS' -> OKLab (OKLab M2)
    Oklab {
        l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    }
}

pub fn oklab_to_linear(lab: Oklab) -> [f64; 3] {
    let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
    let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
    let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

    let l = l_.powi(3);
    let m = m_.powi(3);
    let s = s_.powi(3);

    [
        4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    ]
}

impl Oklab {
    pub fn to_oklch(&self) -> Oklch {
        let c = (self.a * self.a + self.b * self.b).sqrt();
        let h = if c < ACHROMATIC_CHROMA_EPSILON {
            0.0
        } else {
            self.b.atan2(self.a).to_degrees().rem_euclid(360.0)
        };
        Oklch { l: self.l, c, h }
    }

    /// Euclidean OKLab distance
    pub fn distance(&self, other: &Oklab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

impl Oklch {
    pub fn to_oklab(&self) -> Oklab {
        let h = self.h.to_radians();
        Oklab {
            l: self.l,
            a: self.c * h.cos(),
            b: self.c * h.sin(),
        }
    }

    /// Same lightness and chroma at a different hue
    pub fn with_hue(&self, hue: f64) -> Self {
        Self {
            h: hue.rem_euclid(360.0),
            ..*self
        }
    }
}

pub fn hex_to_oklab(hex: &HexColor) -> Oklab {
    linear_to_oklab(Rgb::from_hex(hex).to_linear())
}

pub fn hex_to_oklch(hex: &HexColor) -> Oklch {
    hex_to_oklab(hex).to_oklch()
}

fn in_srgb_gamut(linear: [f64; 3]) -> bool {
    const EPS: f64 = 1e-6;
    linear.iter().all(|v| (-EPS..=1.0 + EPS).contains(v))
}

/// Reduce chroma until the color fits the sRGB gamut, preserving hue and L
pub fn clamp_oklch_to_srgb_gamut(mut lch: Oklch) -> Oklch {
    for _ in 0..64 {
        if in_srgb_gamut(oklab_to_linear(lch.to_oklab())) {
            return lch;
        }
        lch.c *= 0.95;
        if lch.c < ACHROMATIC_CHROMA_EPSILON {
            break;
        }
    }
    lch.c = lch.c.max(0.0);
    lch
}

/// Gamut-map and quantize an OKLCH color to hex
pub fn oklch_to_hex(lch: Oklch) -> HexColor {
    let mapped = clamp_oklch_to_srgb_gamut(Oklch {
        l: lch.l.clamp(0.0, 1.0),
        ..lch
    });
    Rgb::from_linear(oklab_to_linear(mapped.to_oklab())).to_hex()
}

/// Shortest angular distance between two hues in degrees, `0..=180`
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    #[test]
    fn test_white_and_black_lightness() {
        let white = hex_to_oklch(&hex("#FFFFFF"));
        let black = hex_to_oklch(&hex("#000000"));
        assert!((white.l - 1.0).abs() < 1e-3);
        assert!(white.c < 1e-3);
        assert_eq!(white.h, 0.0);
        assert!(black.l.abs() < 1e-6);
    }

    #[test]
    fn test_hex_oklch_roundtrip() {
        for sample in ["#0056FF", "#FF2800", "#35A16B", "#FAF500", "#9A0079", "#7F878F"] {
            let color = hex(sample);
            let back = oklch_to_hex(hex_to_oklch(&color));
            let [r1, g1, b1] = color.to_rgb8();
            let [r2, g2, b2] = back.to_rgb8();
            assert!(r1.abs_diff(r2) <= 1, "{sample} -> {back}");
            assert!(g1.abs_diff(g2) <= 1, "{sample} -> {back}");
            assert!(b1.abs_diff(b2) <= 1, "{sample} -> {back}");
        }
    }

    #[test]
    fn test_blue_hue_angle() {
        let blue = hex_to_oklch(&hex("#0056FF"));
        assert!((blue.h - 262.5).abs() < 1.0, "hue was {}", blue.h);
    }

    #[test]
    fn test_out_of_gamut_is_clamped() {
        let wild = Oklch {
            l: 0.9,
            c: 0.4,
            h: 30.0,
        };
        let mapped = clamp_oklch_to_srgb_gamut(wild);
        assert!(mapped.c < wild.c);
        assert_eq!(mapped.h, wild.h);
        assert!(in_srgb_gamut(oklab_to_linear(mapped.to_oklab())));
    }

    #[test]
    fn test_hue_distance_wraps() {
        assert_eq!(hue_distance(350.0, 10.0), 20.0);
        assert_eq!(hue_distance(10.0, 350.0), 20.0);
        assert_eq!(hue_distance(0.0, 180.0), 180.0);
        assert_eq!(hue_distance(90.0, 90.0), 0.0);
    }
}
