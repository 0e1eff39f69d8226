// ABOUTME: TokenSource trait and its embedded, file-backed and in-memory implementations
// ABOUTME: The catalog load is the single asynchronous suspension point of the core

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use chromatid_types::CatalogToken;

use crate::error::{CatalogError, Result};

/// Bundled DADS token set
const EMBEDDED_TOKENS: &str = include_str!("../assets/dads_tokens.json");

/// On-disk layout of a token file
#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(default)]
    version: Option<String>,
    tokens: Vec<CatalogToken>,
}

/// Parse token JSON, rejecting files without any chromatic tokens
pub fn parse_tokens(origin: &str, json: &str) -> Result<Vec<CatalogToken>> {
    let file: TokenFile =
        serde_json::from_str(json).map_err(|e| CatalogError::parse(origin, e))?;

    if !file.tokens.iter().any(CatalogToken::is_chromatic) {
        return Err(CatalogError::empty(origin));
    }

    chromatid_logging::debug!(
        origin,
        version = file.version.as_deref().unwrap_or("unversioned"),
        token_count = file.tokens.len(),
        "Parsed token file"
    );
    Ok(file.tokens)
}

/// Provider of the reference color tokens
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &str;

    async fn load_tokens(&self) -> Result<Vec<CatalogToken>>;
}

/// Tokens compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTokenSource;

#[async_trait]
impl TokenSource for EmbeddedTokenSource {
    fn name(&self) -> &str {
        "embedded"
    }

    async fn load_tokens(&self) -> Result<Vec<CatalogToken>> {
        parse_tokens(self.name(), EMBEDDED_TOKENS)
    }
}

/// Tokens read from a JSON file in the same layout as the bundled asset
#[derive(Debug, Clone)]
pub struct JsonFileTokenSource {
    path: PathBuf,
    name: String,
}

impl JsonFileTokenSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenSource for JsonFileTokenSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_tokens(&self) -> Result<Vec<CatalogToken>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::io(self.path.clone(), e))?;
        parse_tokens(&self.name, &contents)
    }
}

/// In-memory token list
#[derive(Debug, Clone, Default)]
pub struct StaticTokenSource {
    tokens: Vec<CatalogToken>,
}

impl StaticTokenSource {
    pub fn new(tokens: Vec<CatalogToken>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn load_tokens(&self) -> Result<Vec<CatalogToken>> {
        Ok(self.tokens.clone())
    }
}

/// Source that always fails, for exercising catalog-unavailable paths
#[derive(Debug, Clone)]
pub struct FailingTokenSource {
    reason: String,
}

impl FailingTokenSource {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TokenSource for FailingTokenSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn load_tokens(&self) -> Result<Vec<CatalogToken>> {
        Err(CatalogError::unavailable(self.reason.clone()))
    }
}
