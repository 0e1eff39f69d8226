// ABOUTME: Tracing subscriber initialization and layer composition
// ABOUTME: Stacks console, file, and JSON layers under a static or reloadable filter

use anyhow::{Context, Result};
use tracing_subscriber::{prelude::*, reload, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::layers::{create_console_layer, create_env_filter, create_file_layer, create_json_layer};
use crate::reload::LoggingReloadHandle;

/// Initialize the global tracing subscriber with the given configuration.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    let env_filter = create_env_filter(&config).context("Failed to create environment filter")?;

    let file_layer = if config.output.file {
        Some(create_file_layer(&config.file)?)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(create_console_layer(&config.output))
        .with(file_layer)
        .with(create_json_layer(&config.output))
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    log_initialized(&config, false);
    Ok(())
}

/// Initialize the global tracing subscriber with hot-reload support.
///
/// Returns a LoggingReloadHandle that can be used to update log levels at runtime.
pub fn init_subscriber_with_reload(config: LoggingConfig) -> Result<LoggingReloadHandle> {
    let env_filter = create_env_filter(&config).context("Failed to create environment filter")?;
    let (filter_layer, filter_handle) = reload::Layer::new(env_filter);

    let file_layer = if config.output.file {
        Some(create_file_layer(&config.file)?)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(create_console_layer(&config.output))
        .with(file_layer)
        .with(create_json_layer(&config.output))
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    log_initialized(&config, true);
    Ok(LoggingReloadHandle::new(filter_handle, config))
}

fn log_initialized(config: &LoggingConfig, reload_enabled: bool) {
    tracing::info!(
        log_level = %config.level.0,
        console_output = config.output.console,
        file_output = config.output.file,
        json_output = config.output.json,
        log_file = %config.file.base_path().display(),
        reload_enabled,
        "Chromatid logging initialized"
    );
}
