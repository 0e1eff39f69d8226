// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other chromatid crates

pub mod candidate;
pub mod cvd;
pub mod harmony;
pub mod hex;
pub mod score;
pub mod token;
pub mod weights;

// Re-export commonly used types
pub use candidate::ScoredCandidate;
pub use cvd::CvdType;
pub use harmony::{HarmonyType, ParseHarmonyTypeError};
pub use hex::{HexColor, normalize_hex};
pub use score::{BalanceScoreResult, PartialScores, round1};
pub use token::{CatalogToken, HueFamily, LightnessStep, SemanticRole, TokenCategory};
pub use weights::{NormalizedWeights, ScoreWeights, normalize_weights};
