// ABOUTME: Tunables for scoring, candidate listing and the palette search
// ABOUTME: TOML-loadable with every field defaulted; validate() guards the search bound

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use chromatid_color::ContrastRatios;
use chromatid_types::{LightnessStep, NormalizedWeights, ScoreWeights};

/// Largest per-direction shortlist the search accepts
pub const MAX_SHORTLIST_SIZE: usize = 8;

/// Largest accent count the search accepts
pub const MAX_ACCENTS: usize = 3;

/// Upper bound on combinations visited by one palette search
pub const MAX_COMBINATIONS: usize = 512;

/// Minimum contrast applied to palette accents after selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastPreset {
    None,
    #[default]
    Ui,
    Text,
    Enhanced,
}

impl ContrastPreset {
    pub fn min_ratio(&self) -> f64 {
        match self {
            ContrastPreset::None => ContrastRatios::NONE,
            ContrastPreset::Ui => ContrastRatios::AA_LARGE,
            ContrastPreset::Text => ContrastRatios::AA_NORMAL,
            ContrastPreset::Enhanced => ContrastRatios::AAA_NORMAL,
        }
    }
}

/// Multipliers of the palette cost terms. Lower total cost wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    pub missing: f64,
    pub too_close: f64,
    pub lightness: f64,
    pub cvd_confusion: f64,
    pub delta_e: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            missing: 100_000.0,
            too_close: 10_000.0,
            lightness: 10_000.0,
            cvd_confusion: 1_000.0,
            delta_e: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Nearest tokens kept per target hue
    pub shortlist_size: usize,
    pub max_accents: usize,
    /// Minimum OKLCH lightness gap between two accents before a penalty applies
    pub min_lightness_separation: f64,
    /// ΔE (0-100 scale) below which two colors count as indistinguishable
    pub distinguishability_threshold: f64,
    /// Hue window (degrees) around each target hue for shortlist membership
    pub hue_tolerance_degrees: f64,
    pub contrast_preset: ContrastPreset,
    pub backfill_seed: u64,
    pub cost: CostWeights,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            shortlist_size: MAX_SHORTLIST_SIZE,
            max_accents: MAX_ACCENTS,
            min_lightness_separation: 0.12,
            distinguishability_threshold: 5.0,
            hue_tolerance_degrees: 30.0,
            contrast_preset: ContrastPreset::default(),
            backfill_seed: 0x5EED,
            cost: CostWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentConfig {
    pub default_weights: ScoreWeights,
    pub candidate_limit: usize,
    pub harmony_tolerance_degrees: f64,
    /// Fallback suggestions returned when a harmony filter matches nothing
    pub alternatives_limit: usize,
    /// Lightness steps preferred when candidate scores tie
    pub major_steps: Vec<u16>,
    pub palette: PaletteConfig,
}

impl Default for AccentConfig {
    fn default() -> Self {
        Self {
            default_weights: NormalizedWeights::DEFAULT.into(),
            candidate_limit: 10,
            harmony_tolerance_degrees: 30.0,
            alternatives_limit: 3,
            major_steps: vec![500, 600, 700, 800],
            palette: PaletteConfig::default(),
        }
    }
}

impl AccentConfig {
    /// Parse TOML; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Invalid accent configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read accent configuration {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Failed to load accent configuration {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        let palette = &self.palette;

        if palette.shortlist_size == 0 || palette.shortlist_size > MAX_SHORTLIST_SIZE {
            bail!(
                "palette.shortlist_size must be between 1 and {MAX_SHORTLIST_SIZE}, got {}",
                palette.shortlist_size
            );
        }
        if palette.max_accents == 0 || palette.max_accents > MAX_ACCENTS {
            bail!(
                "palette.max_accents must be between 1 and {MAX_ACCENTS}, got {}",
                palette.max_accents
            );
        }
        let combinations = palette
            .shortlist_size
            .checked_pow(palette.max_accents as u32)
            .unwrap_or(usize::MAX);
        if combinations > MAX_COMBINATIONS {
            bail!(
                "palette search would visit {combinations} combinations, limit is {MAX_COMBINATIONS}"
            );
        }

        let non_negative = [
            ("harmony_tolerance_degrees", self.harmony_tolerance_degrees),
            ("palette.min_lightness_separation", palette.min_lightness_separation),
            ("palette.distinguishability_threshold", palette.distinguishability_threshold),
            ("palette.hue_tolerance_degrees", palette.hue_tolerance_degrees),
            ("palette.cost.missing", palette.cost.missing),
            ("palette.cost.too_close", palette.cost.too_close),
            ("palette.cost.lightness", palette.cost.lightness),
            ("palette.cost.cvd_confusion", palette.cost.cvd_confusion),
            ("palette.cost.delta_e", palette.cost.delta_e),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a non-negative number, got {value}");
            }
        }

        if let Some(step) = self
            .major_steps
            .iter()
            .find(|step| LightnessStep::new(**step).is_none())
        {
            bail!("major_steps contains non-standard lightness step {step}");
        }

        let w = &self.default_weights;
        if [w.harmony, w.cud, w.contrast, w.vibrancy]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            bail!("default_weights must be non-negative numbers");
        }

        Ok(())
    }

    pub fn is_major_step(&self, step: Option<LightnessStep>) -> bool {
        step.is_some_and(|s| self.major_steps.contains(&s.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = AccentConfig::default();
        config.validate().unwrap();
        assert_eq!(config.candidate_limit, 10);
        assert_eq!(config.palette.cost.missing, 100_000.0);
        assert_eq!(config.palette.contrast_preset.min_ratio(), 3.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AccentConfig::from_toml_str(
            r#"
            candidate_limit = 20

            [palette]
            contrast_preset = "text"

            [palette.cost]
            cvd_confusion = 2000.0
            "#,
        )
        .unwrap();

        assert_eq!(config.candidate_limit, 20);
        assert_eq!(config.palette.contrast_preset, ContrastPreset::Text);
        assert_eq!(config.palette.cost.cvd_confusion, 2000.0);
        assert_eq!(config.palette.cost.missing, 100_000.0);
        assert_eq!(config.major_steps, vec![500, 600, 700, 800]);
    }

    #[test]
    fn test_validate_rejects_unbounded_search() {
        let mut config = AccentConfig::default();
        config.palette.shortlist_size = 9;
        assert!(config.validate().is_err());

        let mut config = AccentConfig::default();
        config.palette.max_accents = 4;
        assert!(config.validate().is_err());

        let mut config = AccentConfig::default();
        config.palette.distinguishability_threshold = -1.0;
        assert!(config.validate().is_err());

        let mut config = AccentConfig::default();
        config.major_steps = vec![550];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alternatives_limit = 5").unwrap();
        let config = AccentConfig::load(file.path()).unwrap();
        assert_eq!(config.alternatives_limit, 5);

        assert!(AccentConfig::load(file.path().with_extension("missing")).is_err());
    }

    #[test]
    fn test_major_step_lookup() {
        let config = AccentConfig::default();
        assert!(config.is_major_step(LightnessStep::new(600)));
        assert!(!config.is_major_step(LightnessStep::new(900)));
        assert!(!config.is_major_step(None));
    }
}
