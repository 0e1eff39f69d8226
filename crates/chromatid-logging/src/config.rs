// ABOUTME: Logging configuration for the accent engine: levels, per-crate directives and sinks
// ABOUTME: Loadable from TOML and overridable through the CHROMATID_LOG* and RUST_LOG variables

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

pub const ENV_LEVEL: &str = "CHROMATID_LOG";
pub const ENV_DIRECTIVES: &str = "RUST_LOG";
pub const ENV_JSON: &str = "CHROMATID_LOG_JSON";
pub const ENV_NO_CONSOLE: &str = "CHROMATID_LOG_NO_CONSOLE";
pub const ENV_NO_FILE: &str = "CHROMATID_LOG_NO_FILE";
pub const ENV_FILE_DIR: &str = "CHROMATID_LOG_DIR";

/// A tracing level stored in config files as a lowercase word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(pub Level);

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let level = match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            other => bail!("Unknown log level '{other}', expected trace|debug|info|warn|error"),
        };
        Ok(Self(level))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        Self(level)
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.as_str().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Target-specific levels such as `chromatid::palette = "trace"`
    pub module_levels: BTreeMap<String, LogLevel>,
    pub output: OutputConfig,
    pub file: FileConfig,
}

/// Which sinks are active
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub console: bool,
    pub file: bool,
    /// Structured JSON lines on stdout
    pub json: bool,
    pub pretty_console: bool,
}

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub directory: PathBuf,
    /// Prefix of each rolled file; the date suffix is appended
    pub file_name: String,
    pub rotation: RotationPolicy,
    /// Rolled files kept on disk; `None` keeps everything
    pub max_files: Option<usize>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(Level::INFO),
            module_levels: BTreeMap::new(),
            output: OutputConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: false,
            json: false,
            pretty_console: false,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file_name: "chromatid.log".to_string(),
            rotation: RotationPolicy::Daily,
            max_files: Some(7),
        }
    }
}

impl FileConfig {
    /// Path of the file currently written, before any date suffix
    pub fn base_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl LoggingConfig {
    /// Defaults with the process environment applied on top
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a TOML logging section; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid logging configuration")
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source. `CHROMATID_LOG` wins over
    /// the global part of `RUST_LOG`; module directives from `RUST_LOG` always apply.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(directives) = lookup(ENV_DIRECTIVES) {
            let (global, modules) = parse_directives(&directives)?;
            if let Some(global) = global {
                self.level = global;
            }
            self.module_levels.extend(modules);
        }

        if let Some(level) = lookup(ENV_LEVEL) {
            self.level = level
                .parse()
                .with_context(|| format!("Invalid {ENV_LEVEL} value"))?;
        }

        let flag = |key: &str| lookup(key).is_some_and(|v| v != "0" && !v.is_empty());
        if flag(ENV_JSON) {
            self.output.json = true;
        }
        if flag(ENV_NO_CONSOLE) {
            self.output.console = false;
        }
        if flag(ENV_NO_FILE) {
            self.output.file = false;
        } else if let Some(dir) = lookup(ENV_FILE_DIR) {
            self.output.file = true;
            self.file.directory = PathBuf::from(dir);
        }

        Ok(())
    }
}

/// Split `RUST_LOG` style directives into an optional global level and
/// per-target levels, e.g. `info,chromatid::cache=debug`.
pub fn parse_directives(input: &str) -> Result<(Option<LogLevel>, Vec<(String, LogLevel)>)> {
    let mut global = None;
    let mut modules = Vec::new();

    for directive in input.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        match directive.split_once('=') {
            Some((target, level)) => {
                let level = level
                    .parse()
                    .with_context(|| format!("Invalid level in directive '{directive}'"))?;
                modules.push((target.to_string(), level));
            }
            None => global = Some(directive.parse()?),
        }
    }

    Ok((global, modules))
}

fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("chromatid").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
