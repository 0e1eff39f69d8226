// ABOUTME: Finds color pairs that are distinct to normal vision but collapse under CVD simulation
// ABOUTME: Used standalone as a diagnostic and as a penalty term inside the palette search

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use chromatid_color::{ColorScience, OklabColorScience};
use chromatid_types::{CvdType, HexColor};

/// Default ΔE (0-100 scale) separating distinguishable from confusable colors
pub const DEFAULT_DISTINGUISHABILITY_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedColor {
    pub name: String,
    pub hex: HexColor,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, hex: HexColor) -> Self {
        Self {
            name: name.into(),
            hex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvdConfusionPair {
    pub index1: usize,
    pub index2: usize,
    pub cvd_type: CvdType,
    pub cvd_delta_e: f64,
    pub normal_delta_e: f64,
}

/// Group pairs by deficiency type for reporting
pub fn group_by_cvd_type(pairs: &[CvdConfusionPair]) -> BTreeMap<CvdType, Vec<CvdConfusionPair>> {
    let mut groups: BTreeMap<CvdType, Vec<CvdConfusionPair>> = BTreeMap::new();
    for pair in pairs {
        groups.entry(pair.cvd_type).or_default().push(pair.clone());
    }
    groups
}

#[derive(Clone)]
pub struct CvdConfusionDetector {
    science: Arc<dyn ColorScience>,
    threshold: f64,
}

impl Default for CvdConfusionDetector {
    fn default() -> Self {
        Self::new(Arc::new(OklabColorScience), DEFAULT_DISTINGUISHABILITY_THRESHOLD)
    }
}

impl CvdConfusionDetector {
    pub fn new(science: Arc<dyn ColorScience>, threshold: f64) -> Self {
        Self { science, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Every (pair, deficiency) where a normally distinct pair becomes confusable.
    ///
    /// Pairs already too close for normal vision are skipped entirely.
    pub fn detect_confusion_pairs(&self, colors: &[NamedColor]) -> Vec<CvdConfusionPair> {
        let hexes: Vec<&HexColor> = colors.iter().map(|c| &c.hex).collect();
        self.detect_hex_pairs(&hexes)
    }

    /// Same as [`Self::detect_confusion_pairs`] over bare colors
    pub fn detect_hex_pairs(&self, colors: &[&HexColor]) -> Vec<CvdConfusionPair> {
        // Simulate each color once per type instead of once per pair
        let simulated: Vec<[HexColor; 4]> = colors
            .iter()
            .map(|hex| CvdType::ALL.map(|cvd| self.science.simulate_cvd(hex, cvd)))
            .collect();

        let mut pairs = Vec::new();
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                let normal_delta_e = self.science.simple_delta_e(colors[i], colors[j]);
                if normal_delta_e <= self.threshold {
                    continue;
                }

                for (k, cvd) in CvdType::ALL.iter().enumerate() {
                    let cvd_delta_e = self
                        .science
                        .simple_delta_e(&simulated[i][k], &simulated[j][k]);
                    if cvd_delta_e < self.threshold {
                        pairs.push(CvdConfusionPair {
                            index1: i,
                            index2: j,
                            cvd_type: *cvd,
                            cvd_delta_e,
                            normal_delta_e,
                        });
                    }
                }
            }
        }

        if !pairs.is_empty() {
            chromatid_logging::trace!(
                colors = colors.len(),
                confusions = pairs.len(),
                "CVD confusion pairs detected"
            );
        }
        pairs
    }

    pub fn has_confusion(&self, colors: &[NamedColor]) -> bool {
        !self.detect_confusion_pairs(colors).is_empty()
    }
}

impl std::fmt::Debug for CvdConfusionDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CvdConfusionDetector")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
