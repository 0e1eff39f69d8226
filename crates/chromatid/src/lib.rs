// ABOUTME: Accent color recommendation core for a user-chosen brand color
// ABOUTME: Scoring, two-tier cache, candidate ranking, harmony filtering, palette search, CVD checks

pub mod cache;
pub mod candidates;
pub mod config;
pub mod cvd;
pub mod error;
pub mod harmony_filter;
pub mod palette;
pub mod scoring;


#[cfg(test)]
mod palette_tests;

#[cfg(test)]
mod scoring_tests;

pub use cache::{CacheStats, ScoreCache};
pub use candidates::{
    AccentCandidateService, CandidateGeneration, CandidateOptions, sort_candidates,
};
pub use config::{AccentConfig, ContrastPreset, CostWeights, PaletteConfig};
pub use cvd::{CvdConfusionDetector, CvdConfusionPair, NamedColor, group_by_cvd_type};
pub use error::{AccentError, Result, SelectionAvailability};
pub use harmony_filter::{HarmonyFilterResult, HarmonyFilterService};
pub use palette::{HarmonyPaletteGenerator, HarmonyPaletteResult, PaletteCost, PaletteOptions};
pub use scoring::{BalanceScoreCalculator, resolve_background, resolve_weights};

// Types callers need to drive the services
pub use chromatid_types::{
    BalanceScoreResult, CvdType, HarmonyType, HexColor, NormalizedWeights, ScoreWeights,
    ScoredCandidate, normalize_hex, normalize_weights,
};
