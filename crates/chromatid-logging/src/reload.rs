// ABOUTME: Runtime log level reloading and configuration updates
// ABOUTME: Swaps the active env filter without reinstalling the subscriber

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, Registry, reload};

use crate::config::LoggingConfig;
use crate::layers::create_env_filter;

/// Handle for updating log configuration at runtime
#[derive(Clone)]
pub struct LoggingReloadHandle {
    filter_handle: reload::Handle<EnvFilter, Registry>,
    current_config: Arc<RwLock<LoggingConfig>>,
}

impl LoggingReloadHandle {
    pub fn new(filter_handle: reload::Handle<EnvFilter, Registry>, config: LoggingConfig) -> Self {
        Self {
            filter_handle,
            current_config: Arc::new(RwLock::new(config)),
        }
    }

    fn apply(&self, config: &LoggingConfig) -> Result<()> {
        let new_filter =
            create_env_filter(config).context("Failed to create new environment filter")?;
        self.filter_handle
            .reload(new_filter)
            .context("Failed to reload log filter")
    }

    /// Update the global log level
    pub fn update_log_level(&self, level: tracing::Level) -> Result<()> {
        let mut config = self.current_config.write();
        config.level = level.into();
        self.apply(&config)?;

        tracing::info!(new_level = %level, "Log level updated at runtime");
        Ok(())
    }

    /// Update a single module's log level, e.g. `chromatid::palette`
    pub fn update_module_level(&self, module: &str, level: tracing::Level) -> Result<()> {
        let mut config = self.current_config.write();
        config
            .module_levels
            .insert(module.to_string(), level.into());
        self.apply(&config)?;

        tracing::info!(module = %module, new_level = %level, "Module log level updated at runtime");
        Ok(())
    }

    /// Re-read levels from the environment, keeping output and file settings
    pub fn reload_from_env(&self) -> Result<()> {
        let mut new_config =
            LoggingConfig::from_env().context("Failed to load configuration from environment")?;

        {
            let current = self.current_config.read();
            new_config.output = current.output.clone();
            new_config.file = current.file.clone();
        }

        self.apply(&new_config)?;

        tracing::info!(
            level = %new_config.level.0,
            module_count = new_config.module_levels.len(),
            "Logging configuration reloaded from environment"
        );

        *self.current_config.write() = new_config;
        Ok(())
    }

    pub fn current_config(&self) -> LoggingConfig {
        self.current_config.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_update_levels_tracks_config() {
        let config = LoggingConfig::default();
        let filter = create_env_filter(&config).unwrap();
        let (_layer, handle) = reload::Layer::<EnvFilter, Registry>::new(filter);
        // Keep the layer alive so the handle can still reach it
        let reload_handle = LoggingReloadHandle::new(handle, config);

        reload_handle.update_log_level(Level::WARN).unwrap();
        assert_eq!(reload_handle.current_config().level.0, Level::WARN);

        reload_handle
            .update_module_level("chromatid::cache", Level::TRACE)
            .unwrap();
        assert!(
            reload_handle
                .current_config()
                .module_levels
                .contains_key("chromatid::cache")
        );
    }
}
