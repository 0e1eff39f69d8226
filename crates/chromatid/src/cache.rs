// ABOUTME: Two-tier score memoization: background-independent partials and full results
// ABOUTME: Keys are canonical hex colors and normalized weights, so equivalent inputs share entries

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chromatid_types::{BalanceScoreResult, HexColor, NormalizedWeights, PartialScores};

/// Key of a background-independent entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartialKey {
    pub brand: HexColor,
    pub candidate: HexColor,
}

/// Key of a complete result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FullKey {
    pub brand: HexColor,
    pub candidate: HexColor,
    pub background: HexColor,
    pub weights: NormalizedWeights,
}

impl PartialKey {
    pub fn new(brand: &HexColor, candidate: &HexColor) -> Self {
        Self {
            brand: brand.clone(),
            candidate: candidate.clone(),
        }
    }
}

impl FullKey {
    pub fn new(
        brand: &HexColor,
        candidate: &HexColor,
        background: &HexColor,
        weights: NormalizedWeights,
    ) -> Self {
        Self {
            brand: brand.clone(),
            candidate: candidate.clone(),
            background: background.clone(),
            weights,
        }
    }
}

/// Snapshot of cache size and effectiveness
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub partial_entries: usize,
    pub full_entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Percentage of lookups served from either tier
    pub hit_ratio: f64,
}

#[derive(Debug, Default)]
struct Tiers {
    partial: HashMap<PartialKey, PartialScores>,
    full: HashMap<FullKey, BalanceScoreResult>,
}

/// Shared score cache; pass it around by `Arc`
#[derive(Debug, Default)]
pub struct ScoreCache {
    tiers: RwLock<Tiers>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn record<T>(&self, found: Option<T>) -> Option<T> {
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn get_partial(&self, brand: &HexColor, candidate: &HexColor) -> Option<PartialScores> {
        let found = self
            .tiers
            .read()
            .partial
            .get(&PartialKey::new(brand, candidate))
            .copied();
        self.record(found)
    }

    pub fn set_partial(&self, brand: &HexColor, candidate: &HexColor, scores: PartialScores) {
        self.tiers
            .write()
            .partial
            .insert(PartialKey::new(brand, candidate), scores);
    }

    pub fn get_full(
        &self,
        brand: &HexColor,
        candidate: &HexColor,
        background: &HexColor,
        weights: NormalizedWeights,
    ) -> Option<BalanceScoreResult> {
        let found = self
            .tiers
            .read()
            .full
            .get(&FullKey::new(brand, candidate, background, weights))
            .copied();
        self.record(found)
    }

    pub fn set_full(
        &self,
        brand: &HexColor,
        candidate: &HexColor,
        background: &HexColor,
        result: BalanceScoreResult,
    ) {
        self.tiers.write().full.insert(
            FullKey::new(brand, candidate, background, result.weights),
            result,
        );
    }

    /// Drop every full entry computed against `background`; partials stay.
    pub fn invalidate_by_background(&self, background: &HexColor) -> usize {
        let mut tiers = self.tiers.write();
        let before = tiers.full.len();
        tiers.full.retain(|key, _| &key.background != background);
        let removed = before - tiers.full.len();

        chromatid_logging::info!(
            background = %background,
            removed,
            "Invalidated full score entries for background"
        );
        removed
    }

    /// Drop both tiers and reset the hit counters
    pub fn clear_all(&self) {
        let mut tiers = self.tiers.write();
        let partial_entries = tiers.partial.len();
        let full_entries = tiers.full.len();
        tiers.partial.clear();
        tiers.full.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);

        chromatid_logging::info!(partial_entries, full_entries, "Score cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        let tiers = self.tiers.read();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheStats {
            partial_entries: tiers.partial.len(),
            full_entries: tiers.full.len(),
            hits,
            misses,
            hit_ratio: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64 * 100.0
            },
        }
    }
}
