// ABOUTME: Load-once token catalog handle plus the query helpers over token lists
// ABOUTME: Loaded tokens are shared as Arc<[CatalogToken]>; reload() replaces them wholesale

use parking_lot::RwLock;
use std::sync::Arc;

use chromatid_types::{CatalogToken, HexColor, HueFamily, SemanticRole, TokenCategory};

use crate::error::Result;
use crate::source::{EmbeddedTokenSource, TokenSource};

/// Shared handle over a token source with a single cached load
pub struct TokenCatalog {
    source: Arc<dyn TokenSource>,
    tokens: RwLock<Option<Arc<[CatalogToken]>>>,
}

impl TokenCatalog {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            tokens: RwLock::new(None),
        }
    }

    /// Catalog over the bundled DADS tokens
    pub fn embedded() -> Self {
        Self::new(Arc::new(EmbeddedTokenSource))
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn is_loaded(&self) -> bool {
        self.tokens.read().is_some()
    }

    /// Return the cached tokens, loading them on first use.
    ///
    /// A failed load leaves the catalog unloaded so a later call retries.
    pub async fn load(&self) -> Result<Arc<[CatalogToken]>> {
        let cached = self.tokens.read().clone();
        match cached {
            Some(tokens) => Ok(tokens),
            None => self.fetch().await,
        }
    }

    /// Drop the cached tokens and load them again from the source
    pub async fn reload(&self) -> Result<Arc<[CatalogToken]>> {
        self.tokens.write().take();
        chromatid_logging::info!(source = self.source.name(), "Reloading token catalog");
        self.fetch().await
    }

    async fn fetch(&self) -> Result<Arc<[CatalogToken]>> {
        let loaded: Arc<[CatalogToken]> = match self.source.load_tokens().await {
            Ok(tokens) => tokens.into(),
            Err(e) => {
                chromatid_logging::error!(
                    source = self.source.name(),
                    error = %e,
                    "Token catalog load failed"
                );
                return Err(e);
            }
        };

        chromatid_logging::debug!(
            source = self.source.name(),
            token_count = loaded.len(),
            "Token catalog loaded"
        );

        let mut slot = self.tokens.write();
        // Another caller may have finished first; keep a single shared copy
        let tokens = slot.get_or_insert(loaded);
        Ok(Arc::clone(tokens))
    }
}

impl std::fmt::Debug for TokenCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCatalog")
            .field("source", &self.source.name())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// The ten hue families in catalog display order
pub fn hue_display_order() -> &'static [HueFamily] {
    &HueFamily::ALL
}

/// Chromatic tokens ordered by hue display order, then lightest step first
pub fn all_chromatic_by_hue_and_step(tokens: &[CatalogToken]) -> Vec<&CatalogToken> {
    hue_display_order()
        .iter()
        .flat_map(|&hue| colors_by_hue(tokens, hue))
        .collect()
}

/// Chromatic tokens of one hue family, lightest step first
pub fn colors_by_hue(tokens: &[CatalogToken], hue: HueFamily) -> Vec<&CatalogToken> {
    let mut family: Vec<&CatalogToken> = tokens
        .iter()
        .filter(|t| t.is_chromatic() && t.hue == Some(hue))
        .collect();
    family.sort_by_key(|t| t.step);
    family
}

/// Semantic tokens ordered success, warning, error
pub fn semantic_colors(tokens: &[CatalogToken]) -> Vec<&CatalogToken> {
    [
        SemanticRole::Success,
        SemanticRole::Warning,
        SemanticRole::Error,
    ]
    .iter()
    .filter_map(|role| {
        tokens
            .iter()
            .find(|t| t.category == TokenCategory::Semantic && t.role == Some(*role))
    })
    .collect()
}

pub fn find_by_hex<'a>(tokens: &'a [CatalogToken], hex: &HexColor) -> Option<&'a CatalogToken> {
    tokens.iter().find(|t| &t.hex == hex)
}
