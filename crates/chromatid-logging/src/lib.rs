// ABOUTME: Public API for chromatid logging infrastructure using tokio-tracing
// ABOUTME: Provides centralized configuration and initialization for structured logging

pub mod config;
pub mod layers;
pub mod performance;
pub mod reload;
pub mod subscriber;

// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

use std::sync::OnceLock;

pub use config::{LogLevel, LoggingConfig, RotationPolicy};
pub use performance::PerfTimer;
pub use reload::LoggingReloadHandle;
pub use subscriber::{init_subscriber, init_subscriber_with_reload};

use anyhow::Result;

/// Global reload handle for runtime log level updates
static GLOBAL_RELOAD_HANDLE: OnceLock<LoggingReloadHandle> = OnceLock::new();

/// Initialize logging from defaults plus environment overrides.
pub fn init_logging() -> Result<()> {
    init_subscriber(LoggingConfig::from_env()?)
}

/// Initialize logging with custom configuration.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    init_subscriber(config)
}

/// Initialize logging with hot-reload support using custom configuration.
///
/// The returned handle is also stored globally for [`update_log_level`] and friends.
pub fn init_logging_with_reload(config: LoggingConfig) -> Result<LoggingReloadHandle> {
    let handle = init_subscriber_with_reload(config)?;
    let _ = GLOBAL_RELOAD_HANDLE.set(handle.clone());
    Ok(handle)
}

fn global_handle() -> Result<&'static LoggingReloadHandle> {
    GLOBAL_RELOAD_HANDLE
        .get()
        .ok_or_else(|| anyhow::anyhow!("Logging not initialized with reload support"))
}

/// Update log level at runtime using the global reload handle.
pub fn update_log_level(level: Level) -> Result<()> {
    global_handle()?.update_log_level(level)
}

/// Update module-specific log level at runtime using the global reload handle.
pub fn update_module_level(module: &str, level: Level) -> Result<()> {
    global_handle()?.update_module_level(module, level)
}

/// Reload configuration from environment variables using the global reload handle.
pub fn reload_from_env() -> Result<()> {
    global_handle()?.reload_from_env()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_mock::{expect, subscriber};

    #[test]
    fn test_update_without_reload_handle_fails() {
        // No test installs the reloadable subscriber
        assert!(update_log_level(Level::DEBUG).is_err());
        assert!(update_module_level("chromatid", Level::DEBUG).is_err());
    }

    #[test]
    fn test_reexported_macros_emit_structured_events() {
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .at_level(Level::INFO)
                    .with_fields(expect::msg("Score cache cleared")),
            )
            .event(
                expect::event()
                    .at_level(Level::WARN)
                    .with_fields(expect::msg("Background fell back to white")),
            )
            .only()
            .run_with_handle();

        tracing::subscriber::with_default(subscriber, || {
            info!(partial_entries = 130, full_entries = 130, "Score cache cleared");
            warn!(input = "#GGG", "Background fell back to white");
        });

        handle.assert_finished();
    }
}
