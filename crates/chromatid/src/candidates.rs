// ABOUTME: Accent candidate service: scores the chromatic catalog through the score cache
// ABOUTME: Ranks, paginates and rescoring on background change without touching partial scores

use parking_lot::RwLock;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chromatid_catalog::{TokenCatalog, all_chromatic_by_hue_and_step};
use chromatid_color::{ColorError, parse_hex};
use chromatid_logging::PerfTimer;
use chromatid_types::{
    BalanceScoreResult, CatalogToken, HexColor, NormalizedWeights, ScoreWeights, ScoredCandidate,
};

use crate::cache::{CacheStats, ScoreCache};
use crate::config::AccentConfig;
use crate::error::{AccentError, Result, SelectionAvailability};
use crate::scoring::{BalanceScoreCalculator, resolve_background, resolve_weights};

const SLOW_GENERATION: Duration = Duration::from_millis(250);
const SLOW_RECALCULATION: Duration = Duration::from_millis(50);

/// Optional inputs of a candidate request
#[derive(Debug, Clone, Default)]
pub struct CandidateOptions {
    /// Falls back to white when absent or unparseable
    pub background: Option<String>,
    /// Falls back to the configured default weights
    pub weights: Option<ScoreWeights>,
    /// Falls back to the configured candidate limit
    pub limit: Option<usize>,
    /// Number of ranked candidates to skip
    pub offset: usize,
}

impl CandidateOptions {
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// One page of ranked candidates
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateGeneration {
    pub candidates: Vec<ScoredCandidate>,
    /// Size of the full ranked list before pagination
    pub total_count: usize,
    pub calculation_time_ms: f64,
}

/// Sort by total score descending; equal totals prefer major lightness steps.
/// The sort is stable, so remaining ties keep catalog order.
pub fn sort_candidates(candidates: &mut [ScoredCandidate], major_steps: &[u16]) {
    let is_major =
        |c: &ScoredCandidate| c.step.is_some_and(|step| major_steps.contains(&step.value()));

    candidates.sort_by(|a, b| {
        b.score
            .total
            .total_cmp(&a.score.total)
            .then_with(|| match (is_major(a), is_major(b)) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            })
    });
}

pub struct AccentCandidateService {
    catalog: Arc<TokenCatalog>,
    calculator: BalanceScoreCalculator,
    cache: Arc<ScoreCache>,
    config: AccentConfig,
    availability: RwLock<SelectionAvailability>,
}

impl AccentCandidateService {
    pub fn new(
        catalog: Arc<TokenCatalog>,
        calculator: BalanceScoreCalculator,
        cache: Arc<ScoreCache>,
        config: AccentConfig,
    ) -> Self {
        let calculator = calculator.with_default_weights(config.default_weights);
        Self {
            catalog,
            calculator,
            cache,
            config,
            availability: RwLock::new(SelectionAvailability::ALL),
        }
    }

    /// Service over the embedded catalog, default color science and a fresh cache
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(TokenCatalog::embedded()),
            BalanceScoreCalculator::default(),
            Arc::new(ScoreCache::new()),
            AccentConfig::default(),
        )
    }

    pub fn catalog(&self) -> &Arc<TokenCatalog> {
        &self.catalog
    }

    pub fn calculator(&self) -> &BalanceScoreCalculator {
        &self.calculator
    }

    pub fn cache(&self) -> &Arc<ScoreCache> {
        &self.cache
    }

    pub fn config(&self) -> &AccentConfig {
        &self.config
    }

    /// Rank the chromatic catalog for `brand` and return one page.
    pub async fn generate_candidates(
        &self,
        brand: &str,
        options: &CandidateOptions,
    ) -> Result<CandidateGeneration> {
        let mut timer = PerfTimer::new("generate_candidates").with_warn_threshold(SLOW_GENERATION);

        let ranked = self.generate_all_candidates(brand, options).await?;
        let total_count = ranked.len();
        timer.record_items(total_count);
        let limit = options.limit.unwrap_or(self.config.candidate_limit);
        let candidates: Vec<ScoredCandidate> =
            ranked.into_iter().skip(options.offset).take(limit).collect();

        let calculation_time_ms = timer.finish();
        chromatid_logging::debug!(
            brand,
            total_count,
            returned = candidates.len(),
            offset = options.offset,
            calculation_time_ms,
            "Generated accent candidates"
        );

        Ok(CandidateGeneration {
            candidates,
            total_count,
            calculation_time_ms,
        })
    }

    /// Every chromatic catalog entry, scored and sorted, without pagination.
    pub async fn generate_all_candidates(
        &self,
        brand: &str,
        options: &CandidateOptions,
    ) -> Result<Vec<ScoredCandidate>> {
        let brand_hex = match parse_hex(brand) {
            Ok(hex) => hex,
            Err(_) => return Err(self.fail(AccentError::brand_color_not_set(brand))),
        };

        let tokens = match self.catalog.load().await {
            Ok(tokens) => tokens,
            Err(e) => return Err(self.fail(e.into())),
        };

        let background = resolve_background(options.background.as_deref());
        let weights = resolve_weights(options.weights.as_ref(), &self.config.default_weights);

        let mut candidates = match self.score_tokens(&brand_hex, &tokens, &background, weights) {
            Ok(candidates) => candidates,
            Err(e) => return Err(self.fail(e.into())),
        };
        sort_candidates(&mut candidates, &self.config.major_steps);

        self.succeed();
        Ok(candidates)
    }

    fn score_tokens(
        &self,
        brand: &HexColor,
        tokens: &[CatalogToken],
        background: &HexColor,
        weights: NormalizedWeights,
    ) -> std::result::Result<Vec<ScoredCandidate>, ColorError> {
        all_chromatic_by_hue_and_step(tokens)
            .into_iter()
            .map(|token| {
                let score = self.score_hex(brand, &token.hex, background, weights)?;
                Ok(ScoredCandidate {
                    token_id: token.id.clone(),
                    hex: token.hex.clone(),
                    source_label: token.source_label(),
                    hue_family: token.hue,
                    step: token.step,
                    score,
                    hue: self.calculator.science().hex_to_oklch(&token.hex).h,
                })
            })
            .collect()
    }

    /// Full-cache lookup, then partial-cache lookup, then computation
    fn score_hex(
        &self,
        brand: &HexColor,
        candidate: &HexColor,
        background: &HexColor,
        weights: NormalizedWeights,
    ) -> std::result::Result<BalanceScoreResult, ColorError> {
        if let Some(result) = self.cache.get_full(brand, candidate, background, weights) {
            return Ok(result);
        }

        let partial = match self.cache.get_partial(brand, candidate) {
            Some(partial) => partial,
            None => {
                let partial = self.calculator.calculate_partial(brand, candidate)?;
                self.cache.set_partial(brand, candidate, partial);
                partial
            }
        };

        let contrast = self
            .calculator
            .calculate_contrast_score(candidate, background)?;
        let result = BalanceScoreResult::combine(partial, contrast, weights);
        self.cache.set_full(brand, candidate, background, result);
        Ok(result)
    }

    /// Rescore `previous` against a new background, recomputing only contrast.
    ///
    /// Without explicit `weights` the candidates keep the weights they were
    /// scored with. The output is re-ranked, so key by token id rather than position.
    pub fn recalculate_on_background_change(
        &self,
        previous: &[ScoredCandidate],
        brand: &str,
        new_background: &str,
        weights: Option<&ScoreWeights>,
    ) -> Result<Vec<ScoredCandidate>> {
        let mut timer = PerfTimer::new("recalculate_on_background_change")
            .with_warn_threshold(SLOW_RECALCULATION);
        timer.record_items(previous.len());
        let _entered = timer.enter();

        let brand_hex = match parse_hex(brand) {
            Ok(hex) => hex,
            Err(_) => return Err(self.fail(AccentError::brand_color_not_set(brand))),
        };
        let background = resolve_background(Some(new_background));
        let weights = match (weights, previous.first()) {
            (None, Some(first)) => first.score.weights,
            (weights, _) => resolve_weights(weights, &self.config.default_weights),
        };

        let rescored: std::result::Result<Vec<ScoredCandidate>, ColorError> = previous
            .iter()
            .map(|candidate| {
                let partial = self
                    .cache
                    .get_partial(&brand_hex, &candidate.hex)
                    .unwrap_or_else(|| candidate.score.partial());
                let contrast = self
                    .calculator
                    .calculate_contrast_score(&candidate.hex, &background)?;
                let result = BalanceScoreResult::combine(partial, contrast, weights);
                self.cache
                    .set_full(&brand_hex, &candidate.hex, &background, result);
                Ok(candidate.with_score(result))
            })
            .collect();

        let mut rescored = match rescored {
            Ok(rescored) => rescored,
            Err(e) => return Err(self.fail(e.into())),
        };
        sort_candidates(&mut rescored, &self.config.major_steps);

        chromatid_logging::debug!(
            brand,
            background = %background,
            count = rescored.len(),
            "Recalculated candidates for new background"
        );
        self.succeed();
        Ok(rescored)
    }

    /// Score one manually chosen color
    pub fn calculate_single(
        &self,
        brand: &str,
        candidate: &str,
        options: &CandidateOptions,
    ) -> Result<BalanceScoreResult> {
        let brand_hex = match parse_hex(brand) {
            Ok(hex) => hex,
            Err(_) => return Err(self.fail(AccentError::brand_color_not_set(brand))),
        };
        // A mistyped manual color is the caller's to fix; cached scores and
        // automatic selection stay as they are.
        let candidate_hex = match parse_hex(candidate) {
            Ok(hex) => hex,
            Err(_) => {
                let error = AccentError::invalid_color(candidate);
                chromatid_logging::warn!(
                    code = error.code(),
                    input = candidate,
                    "Manual accent color rejected"
                );
                return Err(error);
            }
        };
        let background = resolve_background(options.background.as_deref());
        let weights = resolve_weights(options.weights.as_ref(), &self.config.default_weights);

        match self.score_hex(&brand_hex, &candidate_hex, &background, weights) {
            Ok(result) => Ok(result),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear_all();
    }

    pub fn availability(&self) -> SelectionAvailability {
        *self.availability.read()
    }

    /// Re-enable every selection mode after the caller fixed its input
    pub fn reset_error_state(&self) {
        *self.availability.write() = SelectionAvailability::ALL;
    }

    fn succeed(&self) {
        *self.availability.write() = SelectionAvailability::ALL;
    }

    /// Record a failure. Catalog and scoring failures also drop every cached score.
    fn fail(&self, error: AccentError) -> AccentError {
        match &error {
            AccentError::DadsLoadFailed { .. } | AccentError::ScoreCalculationFailed { .. } => {
                chromatid_logging::error!(code = error.code(), error = %error, "Accent scoring failed");
                self.cache.clear_all();
            }
            _ => {
                chromatid_logging::warn!(code = error.code(), error = %error, "Accent request rejected");
            }
        }
        *self.availability.write() = SelectionAvailability::after(&error);
        error
    }
}

impl std::fmt::Debug for AccentCandidateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccentCandidateService")
            .field("catalog", &self.catalog)
            .field("cache", &self.cache.stats())
            .field("availability", &self.availability())
            .finish_non_exhaustive()
    }
}
