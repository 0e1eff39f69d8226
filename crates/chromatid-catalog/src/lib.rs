// ABOUTME: Reference color token catalog (DADS) consumed by the accent services
// ABOUTME: Async token sources, the cached catalog handle and hue/step query helpers

pub mod catalog;
pub mod error;
pub mod source;

pub use catalog::{
    TokenCatalog, all_chromatic_by_hue_and_step, colors_by_hue, find_by_hex, hue_display_order,
    semantic_colors,
};
pub use error::{CatalogError, Result};
pub use source::{
    EmbeddedTokenSource, FailingTokenSource, JsonFileTokenSource, StaticTokenSource, TokenSource,
    parse_tokens,
};
