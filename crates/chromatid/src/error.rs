// ABOUTME: Error taxonomy surfaced by the accent recommendation services
// ABOUTME: Each variant carries a stable code string and a user-facing message

use thiserror::Error;

use chromatid_catalog::CatalogError;
use chromatid_color::ColorError;

pub type Result<T> = std::result::Result<T, AccentError>;

#[derive(Debug, Error)]
pub enum AccentError {
    #[error("Brand color is not set or is not a valid hex color: {input:?}")]
    BrandColorNotSet { input: String },

    #[error("Failed to load DADS color tokens: {source}")]
    DadsLoadFailed {
        #[source]
        source: CatalogError,
    },

    #[error("Failed to calculate accent scores: {source}")]
    ScoreCalculationFailed {
        #[source]
        source: ColorError,
    },

    #[error("Candidate color is not a valid hex color: {input:?}")]
    InvalidColor { input: String },

    #[error("Harmony type {harmony} cannot be used to generate a palette")]
    InvalidHarmonyType { harmony: String },

    #[error("Could not generate a {harmony} palette: {reason}")]
    PaletteGenerationFailed { harmony: String, reason: String },
}

impl AccentError {
    pub fn brand_color_not_set<S: Into<String>>(input: S) -> Self {
        Self::BrandColorNotSet {
            input: input.into(),
        }
    }

    pub fn invalid_color<S: Into<String>>(input: S) -> Self {
        Self::InvalidColor {
            input: input.into(),
        }
    }

    pub fn invalid_harmony_type<S: Into<String>>(harmony: S) -> Self {
        Self::InvalidHarmonyType {
            harmony: harmony.into(),
        }
    }

    pub fn palette_generation_failed<H, R>(harmony: H, reason: R) -> Self
    where
        H: Into<String>,
        R: Into<String>,
    {
        Self::PaletteGenerationFailed {
            harmony: harmony.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AccentError::BrandColorNotSet { .. } => "BRAND_COLOR_NOT_SET",
            AccentError::DadsLoadFailed { .. } => "DADS_LOAD_FAILED",
            AccentError::ScoreCalculationFailed { .. } => "SCORE_CALCULATION_FAILED",
            AccentError::InvalidColor { .. } => "INVALID_COLOR",
            AccentError::InvalidHarmonyType { .. } => "INVALID_HARMONY_TYPE",
            AccentError::PaletteGenerationFailed { .. } => "PALETTE_GENERATION_FAILED",
        }
    }
}

impl From<CatalogError> for AccentError {
    fn from(source: CatalogError) -> Self {
        Self::DadsLoadFailed { source }
    }
}

impl From<ColorError> for AccentError {
    fn from(source: ColorError) -> Self {
        Self::ScoreCalculationFailed { source }
    }
}

/// Which selection modes a caller may offer after the last service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionAvailability {
    /// Browsing the catalog and picking a color by hand
    pub manual: bool,
    /// Ranked, score-driven recommendations
    pub automatic: bool,
    pub show_scores: bool,
}

impl SelectionAvailability {
    pub const ALL: Self = Self {
        manual: true,
        automatic: true,
        show_scores: true,
    };

    /// Availability after a failure of the given kind
    pub fn after(error: &AccentError) -> Self {
        match error {
            AccentError::BrandColorNotSet { .. } | AccentError::DadsLoadFailed { .. } => Self {
                manual: false,
                automatic: false,
                show_scores: false,
            },
            AccentError::ScoreCalculationFailed { .. } => Self {
                manual: true,
                automatic: false,
                show_scores: false,
            },
            AccentError::InvalidColor { .. }
            | AccentError::InvalidHarmonyType { .. }
            | AccentError::PaletteGenerationFailed { .. } => Self::ALL,
        }
    }
}

impl Default for SelectionAvailability {
    fn default() -> Self {
        Self::ALL
    }
}
