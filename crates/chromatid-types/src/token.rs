// ABOUTME: Catalog token data types: hue families, lightness steps, and categories
// ABOUTME: Mirrors the DADS reference catalog layout of 10 hues by 13 steps

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hex::HexColor;

/// Chromatic hue family of the reference catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HueFamily {
    Blue,
    LightBlue,
    Cyan,
    Green,
    Lime,
    Yellow,
    Orange,
    Red,
    Magenta,
    Purple,
}

impl HueFamily {
    /// All families in catalog display order
    pub const ALL: [HueFamily; 10] = [
        Self::Blue,
        Self::LightBlue,
        Self::Cyan,
        Self::Green,
        Self::Lime,
        Self::Yellow,
        Self::Orange,
        Self::Red,
        Self::Magenta,
        Self::Purple,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::LightBlue => "light-blue",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Lime => "lime",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Magenta => "magenta",
            Self::Purple => "purple",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::LightBlue => "Light Blue",
            Self::Cyan => "Cyan",
            Self::Green => "Green",
            Self::Lime => "Lime",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Red => "Red",
            Self::Magenta => "Magenta",
            Self::Purple => "Purple",
        }
    }
}

impl fmt::Display for HueFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One of the 13 standard lightness steps, 50 (lightest) to 1200 (darkest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct LightnessStep(u16);

impl LightnessStep {
    pub const STANDARD: [u16; 13] = [
        50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000, 1100, 1200,
    ];

    pub fn new(value: u16) -> Option<Self> {
        Self::STANDARD.contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Iterate all standard steps, lightest first
    pub fn all() -> impl Iterator<Item = LightnessStep> {
        Self::STANDARD.into_iter().map(Self)
    }
}

impl TryFrom<u16> for LightnessStep {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("non-standard lightness step: {value}"))
    }
}

impl From<LightnessStep> for u16 {
    fn from(step: LightnessStep) -> Self {
        step.0
    }
}

impl fmt::Display for LightnessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Chromatic,
    Neutral,
    Semantic,
}

/// Role of a semantic token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticRole {
    Success,
    Warning,
    Error,
}

/// Immutable reference color from the token catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogToken {
    pub id: String,
    pub hex: HexColor,
    pub name_en: String,
    pub name_ja: String,
    pub category: TokenCategory,
    /// Present for chromatic tokens only
    #[serde(default)]
    pub hue: Option<HueFamily>,
    #[serde(default)]
    pub step: Option<LightnessStep>,
    /// Present for semantic tokens only
    #[serde(default)]
    pub role: Option<SemanticRole>,
}

impl CatalogToken {
    pub fn is_chromatic(&self) -> bool {
        self.category == TokenCategory::Chromatic && self.hue.is_some() && self.step.is_some()
    }

    /// Human-readable `"<Hue> <Step>"` label, falling back to the English name
    pub fn source_label(&self) -> String {
        match (self.hue, self.step) {
            (Some(hue), Some(step)) => format!("{} {}", hue.display_name(), step),
            _ => self.name_en.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_validation() {
        assert!(LightnessStep::new(600).is_some());
        assert!(LightnessStep::new(650).is_none());
        assert_eq!(LightnessStep::all().count(), 13);
    }

    #[test]
    fn test_token_deserialize_and_label() {
        let json = r##"{
            "id": "dads-light-blue-600",
            "hex": "#3a8bd9",
            "name_en": "Light Blue 600",
            "name_ja": "水 600",
            "category": "chromatic",
            "hue": "light-blue",
            "step": 600
        }"##;
        let token: CatalogToken = serde_json::from_str(json).unwrap();
        assert!(token.is_chromatic());
        assert_eq!(token.hex.as_str(), "#3A8BD9");
        assert_eq!(token.source_label(), "Light Blue 600");
        assert!(token.role.is_none());
    }

    #[test]
    fn test_non_standard_step_rejected() {
        let json = r##"{"id":"x","hex":"#000","name_en":"x","name_ja":"x",
            "category":"chromatic","hue":"red","step":650}"##;
        assert!(serde_json::from_str::<CatalogToken>(json).is_err());
    }
}
