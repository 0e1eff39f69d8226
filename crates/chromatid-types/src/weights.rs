// ABOUTME: Score weight types and the deterministic integer-percentage normalization
// ABOUTME: Normalized weights always sum to exactly 100 and double as cache key material

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw, caller-supplied weights for the four sub-scores.
///
/// Values are relative; only their ratios matter once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub harmony: f64,
    pub cud: f64,
    pub contrast: f64,
    pub vibrancy: f64,
}

impl ScoreWeights {
    pub const fn new(harmony: f64, cud: f64, contrast: f64, vibrancy: f64) -> Self {
        Self {
            harmony,
            cud,
            contrast,
            vibrancy,
        }
    }

    fn as_array(&self) -> [f64; 4] {
        [self.harmony, self.cud, self.contrast, self.vibrancy]
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        let d = NormalizedWeights::DEFAULT;
        Self::new(
            f64::from(d.harmony),
            f64::from(d.cud),
            f64::from(d.contrast),
            f64::from(d.vibrancy),
        )
    }
}

impl From<NormalizedWeights> for ScoreWeights {
    fn from(w: NormalizedWeights) -> Self {
        Self::new(
            f64::from(w.harmony),
            f64::from(w.cud),
            f64::from(w.contrast),
            f64::from(w.vibrancy),
        )
    }
}

/// Integer percentage weights that sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedWeights {
    pub harmony: u32,
    pub cud: u32,
    pub contrast: u32,
    pub vibrancy: u32,
}

impl NormalizedWeights {
    /// Harmony 30, CUD 20, contrast 25, vibrancy 25
    pub const DEFAULT: Self = Self {
        harmony: 30,
        cud: 20,
        contrast: 25,
        vibrancy: 25,
    };

    fn from_array(values: [u32; 4]) -> Self {
        Self {
            harmony: values[0],
            cud: values[1],
            contrast: values[2],
            vibrancy: values[3],
        }
    }

    pub fn sum(&self) -> u32 {
        self.harmony + self.cud + self.contrast + self.vibrancy
    }

    /// Stable key segment, e.g. `30/20/25/25`
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl Default for NormalizedWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for NormalizedWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.harmony, self.cud, self.contrast, self.vibrancy
        )
    }
}

/// Normalize weights to integer percentages summing to 100.
///
/// Negative and non-finite components count as zero. An all-zero input
/// yields [`NormalizedWeights::DEFAULT`]. The rounding remainder goes to the
/// largest component, ties resolved in harmony > cud > contrast > vibrancy
/// order, which makes the function idempotent.
pub fn normalize_weights(weights: &ScoreWeights) -> NormalizedWeights {
    let raw = weights
        .as_array()
        .map(|w| if w.is_finite() && w > 0.0 { w } else { 0.0 });
    let sum: f64 = raw.iter().sum();

    if sum <= 0.0 {
        return NormalizedWeights::DEFAULT;
    }

    let mut rounded = raw.map(|w| (w / sum * 100.0).round() as i64);
    let remainder = 100 - rounded.iter().sum::<i64>();

    let mut largest = 0;
    for (index, value) in raw.iter().enumerate().skip(1) {
        if *value > raw[largest] {
            largest = index;
        }
    }
    rounded[largest] += remainder;

    NormalizedWeights::from_array(rounded.map(|v| v.max(0) as u32))
}
