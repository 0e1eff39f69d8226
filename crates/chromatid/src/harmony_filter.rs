// ABOUTME: Buckets already-scored candidates by harmony direction relative to the brand hue
// ABOUTME: Never rescores or reorders; falls back to nearest-hue alternatives when a bucket is empty

use std::borrow::Cow;

use chromatid_color::hue_distance;
use chromatid_types::{HarmonyType, ScoredCandidate};

use crate::config::AccentConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct HarmonyFilterResult<'a> {
    /// Matching candidates in their original score order
    pub candidates: Cow<'a, [ScoredCandidate]>,
    /// Closest-hue fallbacks, only filled when nothing matched
    pub alternatives: Vec<ScoredCandidate>,
    pub is_showing_alternatives: bool,
}

/// Distance from `hue` to the closest of `targets`, in degrees
pub fn nearest_target_distance(hue: f64, targets: &[f64]) -> f64 {
    targets
        .iter()
        .map(|&target| hue_distance(hue, target))
        .fold(f64::INFINITY, f64::min)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonyFilterService {
    tolerance_degrees: f64,
    alternatives_limit: usize,
}

impl Default for HarmonyFilterService {
    fn default() -> Self {
        Self::from_config(&AccentConfig::default())
    }
}

impl HarmonyFilterService {
    pub fn new(tolerance_degrees: f64, alternatives_limit: usize) -> Self {
        Self {
            tolerance_degrees,
            alternatives_limit,
        }
    }

    pub fn from_config(config: &AccentConfig) -> Self {
        Self::new(config.harmony_tolerance_degrees, config.alternatives_limit)
    }

    pub fn filter_by_harmony_type<'a>(
        &self,
        candidates: &'a [ScoredCandidate],
        harmony: HarmonyType,
        brand_hue: f64,
    ) -> HarmonyFilterResult<'a> {
        if harmony == HarmonyType::All {
            return HarmonyFilterResult {
                candidates: Cow::Borrowed(candidates),
                alternatives: Vec::new(),
                is_showing_alternatives: false,
            };
        }

        let targets = harmony.target_hues(brand_hue);
        let matching: Vec<ScoredCandidate> = candidates
            .iter()
            .filter(|c| nearest_target_distance(c.hue, &targets) <= self.tolerance_degrees)
            .cloned()
            .collect();

        if !matching.is_empty() {
            chromatid_logging::trace!(
                harmony = %harmony,
                matched = matching.len(),
                "Harmony filter matched candidates"
            );
            return HarmonyFilterResult {
                candidates: Cow::Owned(matching),
                alternatives: Vec::new(),
                is_showing_alternatives: false,
            };
        }

        let mut by_distance: Vec<(f64, &ScoredCandidate)> = candidates
            .iter()
            .map(|c| (nearest_target_distance(c.hue, &targets), c))
            .collect();
        // Stable, so equal distances keep score order
        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

        let alternatives: Vec<ScoredCandidate> = by_distance
            .into_iter()
            .take(self.alternatives_limit)
            .map(|(_, c)| c.clone())
            .collect();

        chromatid_logging::debug!(
            harmony = %harmony,
            brand_hue,
            alternatives = alternatives.len(),
            "No candidates within harmony tolerance, showing alternatives"
        );

        HarmonyFilterResult {
            candidates: Cow::Owned(Vec::new()),
            alternatives,
            is_showing_alternatives: true,
        }
    }
}
