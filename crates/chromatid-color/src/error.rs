// ABOUTME: Error types for color parsing and conversion
// ABOUTME: Covers unparseable hex input and numerically invalid color results

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ColorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid color: {input:?} is not a 3- or 6-digit hex triplet")]
    InvalidHex { input: String },

    #[error("{metric} for {color} is not a finite number")]
    NonFinite { metric: &'static str, color: String },
}

impl ColorError {
    pub fn invalid_hex<S: Into<String>>(input: S) -> Self {
        Self::InvalidHex {
            input: input.into(),
        }
    }

    pub fn non_finite<S: Into<String>>(metric: &'static str, color: S) -> Self {
        Self::NonFinite {
            metric,
            color: color.into(),
        }
    }
}
