// ABOUTME: Harmony pattern definitions relating a brand hue to target hues
// ABOUTME: Provides hue offsets per pattern and parsing from wire names

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule relating a brand hue to one or more target hues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyType {
    /// No directional filter
    All,
    Complementary,
    Triadic,
    Analogous,
    SplitComplementary,
    Square,
    Monochromatic,
    Shades,
    Compound,
}

impl HarmonyType {
    /// Every pattern that defines target hues, i.e. everything except `All`
    pub const ALL_DIRECTIONAL: [HarmonyType; 8] = [
        Self::Complementary,
        Self::Triadic,
        Self::Analogous,
        Self::SplitComplementary,
        Self::Square,
        Self::Monochromatic,
        Self::Shades,
        Self::Compound,
    ];

    /// Hue offsets in degrees relative to the brand hue
    pub fn target_offsets(&self) -> &'static [f64] {
        match self {
            Self::All => &[],
            Self::Complementary => &[180.0],
            Self::Triadic => &[120.0, 240.0],
            Self::Analogous => &[-30.0, 30.0],
            Self::SplitComplementary => &[150.0, 210.0],
            Self::Square => &[90.0, 180.0, 270.0],
            Self::Monochromatic | Self::Shades => &[0.0],
            Self::Compound => &[30.0, 180.0],
        }
    }

    /// Absolute target hues in `[0, 360)` for a brand hue in degrees
    pub fn target_hues(&self, brand_hue: f64) -> Vec<f64> {
        self.target_offsets()
            .iter()
            .map(|offset| (brand_hue + offset).rem_euclid(360.0))
            .collect()
    }

    pub fn is_directional(&self) -> bool {
        !matches!(self, Self::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Analogous => "analogous",
            Self::SplitComplementary => "split-complementary",
            Self::Square => "square",
            Self::Monochromatic => "monochromatic",
            Self::Shades => "shades",
            Self::Compound => "compound",
        }
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown harmony pattern name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHarmonyTypeError(pub String);

impl fmt::Display for ParseHarmonyTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown harmony type: {}", self.0)
    }
}

impl std::error::Error for ParseHarmonyTypeError {}

impl FromStr for HarmonyType {
    type Err = ParseHarmonyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let harmony = match normalized.as_str() {
            "all" => Self::All,
            "complementary" => Self::Complementary,
            "triadic" => Self::Triadic,
            "analogous" => Self::Analogous,
            "split-complementary" | "splitcomplementary" => Self::SplitComplementary,
            "square" | "tetradic" => Self::Square,
            "monochromatic" => Self::Monochromatic,
            "shades" => Self::Shades,
            "compound" => Self::Compound,
            _ => return Err(ParseHarmonyTypeError(s.to_string())),
        };
        Ok(harmony)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_hues_wrap() {
        assert_eq!(HarmonyType::Complementary.target_hues(270.0), vec![90.0]);
        assert_eq!(HarmonyType::Analogous.target_hues(10.0), vec![340.0, 40.0]);
        assert_eq!(HarmonyType::Triadic.target_hues(0.0), vec![120.0, 240.0]);
        assert!(HarmonyType::All.target_hues(42.0).is_empty());
    }

    #[test]
    fn test_parse_round_trips_display() {
        for harmony in HarmonyType::ALL_DIRECTIONAL {
            assert_eq!(harmony.as_str().parse::<HarmonyType>().unwrap(), harmony);
        }
        assert_eq!("ALL".parse::<HarmonyType>().unwrap(), HarmonyType::All);
        assert_eq!(
            "split_complementary".parse::<HarmonyType>().unwrap(),
            HarmonyType::SplitComplementary
        );
        assert!("pentadic".parse::<HarmonyType>().is_err());
    }
}
