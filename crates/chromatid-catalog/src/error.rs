// ABOUTME: Error types for loading the reference color token catalog
// ABOUTME: Distinguishes I/O, parse, empty-catalog and unavailable-source failures

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read token file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse token data from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Token catalog from {origin} contains no chromatic tokens")]
    Empty { origin: String },

    #[error("Token source unavailable: {reason}")]
    Unavailable { reason: String },
}

impl CatalogError {
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }

    pub fn parse<S: Into<String>>(origin: S, source: serde_json::Error) -> Self {
        Self::Parse {
            origin: origin.into(),
            source,
        }
    }

    pub fn empty<S: Into<String>>(origin: S) -> Self {
        Self::Empty {
            origin: origin.into(),
        }
    }

    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
