// ABOUTME: Canonical hex color representation used for every cache key and comparison
// ABOUTME: Collapses 3-digit, lowercase, and unprefixed spellings into one #RRGGBB form

use serde::{Deserialize, Serialize};
use std::fmt;

/// A color in canonical `#RRGGBB` uppercase form.
///
/// Construction always goes through [`HexColor::parse`], so two values that
/// compare equal always denote the same sRGB triplet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub const WHITE: &'static str = "#FFFFFF";
    pub const BLACK: &'static str = "#000000";

    /// Parse a 3- or 6-digit hex triplet, with or without a leading `#`.
    pub fn parse(input: &str) -> Option<Self> {
        normalize_hex(input).map(Self)
    }

    /// Build from 8-bit sRGB channels
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self(format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]))
    }

    pub fn white() -> Self {
        Self(Self::WHITE.to_string())
    }

    pub fn black() -> Self {
        Self(Self::BLACK.to_string())
    }

    /// 8-bit sRGB channels
    pub fn to_rgb8(&self) -> [u8; 3] {
        // The inner string is validated on construction
        let digits = &self.0[1..];
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        [channel(0), channel(2), channel(4)]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid hex color: {value:?}"))
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

/// Normalize a hex string to `#RRGGBB` uppercase.
///
/// Returns `None` for anything that is not a 3- or 6-digit hex triplet after
/// trimming whitespace and an optional leading `#`.
pub fn normalize_hex(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    Some(format!("#{}", expanded.to_ascii_uppercase()))
}
