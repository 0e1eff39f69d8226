// ABOUTME: Layer constructors for console, rolling file, and JSON log output
// ABOUTME: Each constructor is generic over the subscriber so layers stack in any order

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    registry::LookupSpan,
};

use crate::config::{FileConfig, LoggingConfig, OutputConfig, RotationPolicy};

/// Boxed layer usable on top of any span-aware subscriber
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Flush guards for non-blocking writers; they must outlive the process
static WRITER_GUARDS: OnceLock<Mutex<Vec<WorkerGuard>>> = OnceLock::new();

fn retain_guard(guard: WorkerGuard) {
    WRITER_GUARDS
        .get_or_init(|| Mutex::new(Vec::new()))
        .lock()
        .push(guard);
}

/// Create a console output layer, pretty or compact.
pub fn create_console_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.console {
        return None;
    }

    let layer = if config.pretty_console {
        fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .boxed()
    };

    Some(layer)
}

fn rotation(policy: RotationPolicy) -> Rotation {
    match policy {
        RotationPolicy::Hourly => Rotation::HOURLY,
        RotationPolicy::Daily => Rotation::DAILY,
        RotationPolicy::Never => Rotation::NEVER,
    }
}

/// Create a rolling file layer written through a non-blocking worker.
pub fn create_file_layer<S>(config: &FileConfig) -> Result<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(&config.directory).with_context(|| {
        format!("Failed to create log directory: {}", config.directory.display())
    })?;

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation(config.rotation))
        .filename_prefix(config.file_name.as_str());
    if let Some(max_files) = config.max_files {
        builder = builder.max_log_files(max_files);
    }
    let appender = builder
        .build(&config.directory)
        .with_context(|| format!("Failed to open log file in {}", config.directory.display()))?;

    let (writer, guard) = non_blocking(appender);
    retain_guard(guard);

    Ok(fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .boxed())
}

/// Create a JSON output layer on stdout for structured log shipping.
pub fn create_json_layer<S>(config: &OutputConfig) -> Option<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !config.json {
        return None;
    }

    Some(
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    )
}

/// Build the level filter from the configuration.
///
/// `RUST_LOG` is already folded into the configuration by
/// [`LoggingConfig::apply_env_overrides`], so the environment is not read here.
pub fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::new(config.level.to_string());
    for (target, level) in &config.module_levels {
        let directive = format!("{target}={level}");
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("Invalid filter directive '{directive}'"))?,
        );
    }
    Ok(filter)
}
