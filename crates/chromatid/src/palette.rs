// ABOUTME: Harmony palette generator: joint selection of 1-3 accents by bounded depth-first search
// ABOUTME: Minimizes target distance, mutual confusability and CVD collapse over per-direction shortlists

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chromatid_catalog::semantic_colors;
use chromatid_color::{ColorScience, Oklab, Oklch, ensure_contrast, hue_distance};
use chromatid_logging::PerfTimer;
use chromatid_types::{HarmonyType, HexColor, ScoredCandidate, normalize_hex};

use crate::candidates::{AccentCandidateService, CandidateOptions};
use crate::config::PaletteConfig;
use crate::cvd::CvdConfusionDetector;
use crate::error::{AccentError, Result};
use crate::scoring::resolve_background;

const SLOW_SEARCH: Duration = Duration::from_millis(100);

/// Backfilled accents must sit at least this far from the brand hue
const BACKFILL_MIN_HUE_DISTANCE: f64 = 60.0;

/// Per-direction lightness shifts for the single-hue patterns
const MONOCHROMATIC_LIGHTNESS_SHIFTS: [f64; 3] = [0.18, -0.18, 0.32];
const SHADES_LIGHTNESS_SHIFTS: [f64; 3] = [-0.12, -0.24, -0.36];

/// Request options for a palette
#[derive(Debug, Clone, Default)]
pub struct PaletteOptions {
    /// Accents wanted; defaults to the configured maximum
    pub accent_count: Option<usize>,
    /// Background the accents must contrast with; white when absent
    pub background: Option<String>,
    /// Token ids or hex colors already placed elsewhere in the palette
    pub exclude: Vec<String>,
}

impl PaletteOptions {
    pub fn with_accent_count(mut self, count: usize) -> Self {
        self.accent_count = Some(count);
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn excluding(mut self, entry: impl Into<String>) -> Self {
        self.exclude.push(entry.into());
        self
    }
}

/// Breakdown of the winning combination's cost
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteCost {
    pub missing: usize,
    pub too_close: usize,
    pub lightness_penalty: f64,
    pub cvd_confusion_pairs: usize,
    pub delta_e_sum: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonyPaletteResult {
    pub brand: HexColor,
    pub harmony: HarmonyType,
    /// Lightest first
    pub accents: Vec<HexColor>,
    /// Catalog candidates behind each accent, same order as `accents`
    pub candidates: Vec<ScoredCandidate>,
    pub requested_count: usize,
    pub achieved_count: usize,
    /// Accents added by the backfill step rather than the search
    pub backfilled: usize,
    pub cost: PaletteCost,
}

/// One shortlisted candidate for a target direction
#[derive(Debug, Clone)]
struct ShortlistEntry<'u> {
    candidate: &'u ScoredCandidate,
    lightness: f64,
    /// Distance to the direction's target color, 0-100 scale
    delta_e: f64,
}

/// Inputs shared by every palette built from one universe
struct PaletteUniverse {
    brand: HexColor,
    brand_lch: Oklch,
    candidates: Vec<ScoredCandidate>,
    semantics: Vec<HexColor>,
    background: HexColor,
}

/// Best complete combination seen so far and the number of nodes walked
struct SearchState<'s, 'u> {
    best: Option<(PaletteCost, Vec<Option<&'s ShortlistEntry<'u>>>)>,
    visited: usize,
}

pub struct HarmonyPaletteGenerator {
    service: Arc<AccentCandidateService>,
    detector: CvdConfusionDetector,
    config: PaletteConfig,
}

impl HarmonyPaletteGenerator {
    pub fn new(service: Arc<AccentCandidateService>) -> Self {
        let config = service.config().palette.clone();
        let detector = CvdConfusionDetector::new(
            Arc::clone(service.calculator().science()),
            config.distinguishability_threshold,
        );
        Self {
            service,
            detector,
            config,
        }
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    fn science(&self) -> &dyn ColorScience {
        self.service.calculator().science().as_ref()
    }

    /// Build one palette for `harmony`.
    pub async fn get_harmony_palette_colors(
        &self,
        brand: &str,
        harmony: HarmonyType,
        options: &PaletteOptions,
    ) -> Result<HarmonyPaletteResult> {
        if harmony == HarmonyType::All {
            return Err(AccentError::invalid_harmony_type(harmony.as_str()));
        }
        let universe = self.load_universe(brand, options).await?;
        self.build_palette(&universe, harmony, options)
    }

    /// Build a palette for every directional harmony from one shared universe.
    ///
    /// The outer error covers brand and catalog failures; each pattern reports
    /// its own outcome.
    pub async fn get_all_harmony_palettes(
        &self,
        brand: &str,
        options: &PaletteOptions,
    ) -> Result<BTreeMap<HarmonyType, Result<HarmonyPaletteResult>>> {
        let universe = self.load_universe(brand, options).await?;
        Ok(HarmonyType::ALL_DIRECTIONAL
            .iter()
            .map(|&harmony| (harmony, self.build_palette(&universe, harmony, options)))
            .collect())
    }

    async fn load_universe(&self, brand: &str, options: &PaletteOptions) -> Result<PaletteUniverse> {
        let candidate_options = CandidateOptions {
            background: options.background.clone(),
            ..CandidateOptions::default()
        };
        let candidates = self
            .service
            .generate_all_candidates(brand, &candidate_options)
            .await?;

        // Already loaded by the candidate pass
        let tokens = self.service.catalog().load().await?;
        let semantics = semantic_colors(&tokens)
            .into_iter()
            .map(|t| t.hex.clone())
            .collect();

        let brand = HexColor::parse(brand).ok_or_else(|| AccentError::brand_color_not_set(brand))?;
        let brand_lch = self.science().hex_to_oklch(&brand);

        Ok(PaletteUniverse {
            brand,
            brand_lch,
            candidates,
            semantics,
            background: resolve_background(options.background.as_deref()),
        })
    }

    fn build_palette(
        &self,
        universe: &PaletteUniverse,
        harmony: HarmonyType,
        options: &PaletteOptions,
    ) -> Result<HarmonyPaletteResult> {
        if harmony == HarmonyType::All {
            return Err(AccentError::invalid_harmony_type(harmony.as_str()));
        }

        let mut timer = PerfTimer::new("palette_search").with_warn_threshold(SLOW_SEARCH);
        // Configs built in code skip validation, so never clamp against zero
        let max_accents = self.config.max_accents.max(1);
        let requested = options
            .accent_count
            .unwrap_or(max_accents)
            .clamp(1, max_accents);

        let excluded = self.excluded_ids(universe, options);
        let targets = self.direction_targets(universe, harmony, requested);
        let shortlists: Vec<Vec<ShortlistEntry<'_>>> = targets
            .iter()
            .map(|target| self.shortlist(universe, &excluded, target))
            .collect();

        if shortlists.iter().all(Vec::is_empty) {
            return Err(AccentError::palette_generation_failed(
                harmony.as_str(),
                "no catalog colors near any target hue",
            ));
        }

        let mut state = SearchState {
            best: None,
            visited: 0,
        };
        let mut chosen = Vec::with_capacity(requested);
        self.search(universe, &shortlists, &mut state, &mut chosen);

        let visited = state.visited;
        timer.record_items(visited);
        let (cost, best) = state.best.ok_or_else(|| {
            AccentError::palette_generation_failed(harmony.as_str(), "search found no combination")
        })?;

        let mut picked: Vec<ScoredCandidate> = Vec::with_capacity(requested);
        for entry in best.into_iter().flatten() {
            if !picked.iter().any(|c| c.hex == entry.candidate.hex) {
                picked.push(entry.candidate.clone());
            }
        }

        let searched = picked.len();
        if picked.len() < requested {
            self.backfill(universe, &excluded, requested, &mut picked);
        }
        let backfilled = picked.len() - searched;
        picked.truncate(requested);

        // Adjust for contrast, then drop any accents the adjustment made identical
        let min_ratio = self.config.contrast_preset.min_ratio();
        let mut accents: Vec<(HexColor, ScoredCandidate)> = Vec::with_capacity(picked.len());
        for candidate in picked {
            let adjusted = ensure_contrast(&candidate.hex, &universe.background, min_ratio);
            if !accents.iter().any(|(hex, _)| *hex == adjusted) {
                accents.push((adjusted, candidate));
            }
        }

        if accents.is_empty() {
            return Err(AccentError::palette_generation_failed(
                harmony.as_str(),
                "no accent survived deduplication",
            ));
        }

        let science = self.science();
        accents.sort_by(|(a, _), (b, _)| {
            science
                .hex_to_oklch(b)
                .l
                .total_cmp(&science.hex_to_oklch(a).l)
        });

        let achieved_count = accents.len();
        chromatid_logging::debug!(
            brand = %universe.brand,
            harmony = %harmony,
            requested,
            achieved_count,
            backfilled,
            visited,
            cost = cost.total,
            elapsed_ms = timer.elapsed_ms(),
            "Generated harmony palette"
        );

        let (accents, candidates): (Vec<HexColor>, Vec<ScoredCandidate>) =
            accents.into_iter().unzip();
        Ok(HarmonyPaletteResult {
            brand: universe.brand.clone(),
            harmony,
            accents,
            candidates,
            requested_count: requested,
            achieved_count,
            backfilled,
            cost,
        })
    }

    /// Token ids kept out of every shortlist: the caller's exclusions plus the
    /// catalog entry closest to the brand itself
    fn excluded_ids(&self, universe: &PaletteUniverse, options: &PaletteOptions) -> HashSet<String> {
        let exclude_hexes: HashSet<String> = options
            .exclude
            .iter()
            .filter_map(|entry| normalize_hex(entry))
            .collect();

        let mut excluded: HashSet<String> = universe
            .candidates
            .iter()
            .filter(|c| {
                options.exclude.contains(&c.token_id) || exclude_hexes.contains(c.hex.as_str())
            })
            .map(|c| c.token_id.clone())
            .collect();

        let science = self.science();
        let nearest = universe.candidates.iter().min_by(|a, b| {
            science
                .simple_delta_e(&a.hex, &universe.brand)
                .total_cmp(&science.simple_delta_e(&b.hex, &universe.brand))
        });
        if let Some(nearest) = nearest {
            excluded.insert(nearest.token_id.clone());
        }
        excluded
    }

    /// Target color for each accent slot; slot `i` uses offset `i % len`
    fn direction_targets(
        &self,
        universe: &PaletteUniverse,
        harmony: HarmonyType,
        count: usize,
    ) -> Vec<Oklch> {
        let offsets = harmony.target_offsets();
        let brand = universe.brand_lch;

        (0..count)
            .map(|i| {
                let offset = offsets.get(i % offsets.len().max(1)).copied().unwrap_or(0.0);
                let shift = match harmony {
                    HarmonyType::Monochromatic => MONOCHROMATIC_LIGHTNESS_SHIFTS[i % 3],
                    HarmonyType::Shades => SHADES_LIGHTNESS_SHIFTS[i % 3],
                    _ => 0.0,
                };
                Oklch {
                    l: (brand.l + shift).clamp(0.05, 0.97),
                    c: brand.c,
                    h: (brand.h + offset).rem_euclid(360.0),
                }
            })
            .collect()
    }

    fn shortlist<'u>(
        &self,
        universe: &'u PaletteUniverse,
        excluded: &HashSet<String>,
        target: &Oklch,
    ) -> Vec<ShortlistEntry<'u>> {
        let target_lab = target.to_oklab();
        let science = self.science();

        let mut entries: Vec<ShortlistEntry<'u>> = universe
            .candidates
            .iter()
            .filter(|c| !excluded.contains(&c.token_id))
            .filter(|c| hue_distance(c.hue, target.h) <= self.config.hue_tolerance_degrees)
            .map(|candidate| {
                let lch = science.hex_to_oklch(&candidate.hex);
                let lab: Oklab = lch.to_oklab();
                ShortlistEntry {
                    candidate,
                    lightness: lch.l,
                    delta_e: lab.distance(&target_lab) * 100.0,
                }
            })
            .collect();

        entries.sort_by(|a, b| a.delta_e.total_cmp(&b.delta_e));
        entries.truncate(self.config.shortlist_size);
        entries
    }

    /// Depth-first walk of the shortlist product, pruning any prefix whose cost
    /// already reaches the best complete combination. Every cost term only
    /// grows as accents are added, so the prefix cost is a lower bound.
    fn search<'s, 'u>(
        &self,
        universe: &PaletteUniverse,
        shortlists: &'s [Vec<ShortlistEntry<'u>>],
        state: &mut SearchState<'s, 'u>,
        chosen: &mut Vec<Option<&'s ShortlistEntry<'u>>>,
    ) {
        state.visited += 1;

        let cost = self.combination_cost(universe, chosen);
        if let Some((best, _)) = &state.best
            && cost.total >= best.total
        {
            return;
        }

        let depth = chosen.len();
        if depth == shortlists.len() {
            state.best = Some((cost, chosen.clone()));
            return;
        }

        // An empty direction still occupies its slot, as a missing accent
        if shortlists[depth].is_empty() {
            chosen.push(None);
            self.search(universe, shortlists, state, chosen);
            chosen.pop();
            return;
        }
        for entry in &shortlists[depth] {
            chosen.push(Some(entry));
            self.search(universe, shortlists, state, chosen);
            chosen.pop();
        }
    }

    fn combination_cost(
        &self,
        universe: &PaletteUniverse,
        chosen: &[Option<&ShortlistEntry<'_>>],
    ) -> PaletteCost {
        let science = self.science();
        let threshold = self.config.distinguishability_threshold;
        let min_separation = self.config.min_lightness_separation;

        let mut cost = PaletteCost::default();
        let mut unique: Vec<&ShortlistEntry<'_>> = Vec::with_capacity(chosen.len());
        for slot in chosen {
            match *slot {
                Some(entry) if !unique.iter().any(|u| u.candidate.hex == entry.candidate.hex) => {
                    cost.delta_e_sum += entry.delta_e;
                    unique.push(entry);
                }
                _ => cost.missing += 1,
            }
        }

        for (i, a) in unique.iter().enumerate() {
            for b in &unique[i + 1..] {
                if science.simple_delta_e(&a.candidate.hex, &b.candidate.hex) < threshold {
                    cost.too_close += 1;
                }
                let gap = (a.lightness - b.lightness).abs();
                if min_separation > 0.0 && gap < min_separation {
                    cost.lightness_penalty += (min_separation - gap) / min_separation;
                }
            }
            cost.too_close += universe
                .semantics
                .iter()
                .filter(|semantic| science.simple_delta_e(&a.candidate.hex, semantic) < threshold)
                .count();
        }

        let mut palette: Vec<&HexColor> =
            Vec::with_capacity(1 + unique.len() + universe.semantics.len());
        palette.push(&universe.brand);
        palette.extend(unique.iter().map(|e| &e.candidate.hex));
        palette.extend(universe.semantics.iter());
        cost.cvd_confusion_pairs = self.detector.detect_hex_pairs(&palette).len();

        let weights = &self.config.cost;
        cost.total = cost.missing as f64 * weights.missing
            + cost.too_close as f64 * weights.too_close
            + cost.lightness_penalty * weights.lightness
            + cost.cvd_confusion_pairs as f64 * weights.cvd_confusion
            + cost.delta_e_sum * weights.delta_e;
        cost
    }

    /// Top up `picked` with hue-distant colors chosen by a seeded generator
    fn backfill(
        &self,
        universe: &PaletteUniverse,
        excluded: &HashSet<String>,
        requested: usize,
        picked: &mut Vec<ScoredCandidate>,
    ) {
        let science = self.science();
        let threshold = self.config.distinguishability_threshold;
        let mut rng = StdRng::seed_from_u64(backfill_seed(self.config.backfill_seed, &universe.brand));

        let mut pool: Vec<&ScoredCandidate> = universe
            .candidates
            .iter()
            .filter(|c| !excluded.contains(&c.token_id))
            .filter(|c| hue_distance(c.hue, universe.brand_lch.h) >= BACKFILL_MIN_HUE_DISTANCE)
            .collect();

        while picked.len() < requested {
            pool.retain(|c| {
                picked
                    .iter()
                    .all(|p| science.simple_delta_e(&p.hex, &c.hex) >= threshold)
            });
            if pool.is_empty() {
                chromatid_logging::debug!(
                    brand = %universe.brand,
                    achieved = picked.len(),
                    requested,
                    "Backfill pool exhausted"
                );
                break;
            }
            let index = rng.gen_range(0..pool.len());
            picked.push(pool.swap_remove(index).clone());
        }
    }
}

/// Mix the configured seed with the brand so each brand gets its own sequence
fn backfill_seed(seed: u64, brand: &HexColor) -> u64 {
    let [r, g, b] = brand.to_rgb8();
    let rgb = (u64::from(r) << 16) | (u64::from(g) << 8) | u64::from(b);
    seed ^ rgb.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl std::fmt::Debug for HarmonyPaletteGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarmonyPaletteGenerator")
            .field("config", &self.config)
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}
