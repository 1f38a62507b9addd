//! Logging
//!
//! `tracing` subscriber setup for the builder. Command output owns stdout, so
//! log lines go to stderr unless configured otherwise.
//!
//! Settings resolve in this order, first hit wins:
//! 1. `BUILDER_LOG`, `BUILDER_LOG_FORMAT`, `BUILDER_LOG_OUTPUT`, `BUILDER_LOG_MODULES`
//! 2. CLI flags (folded into [`LoggingConfig`] by the binary)
//! 3. The `[logging]` table of the configuration files
//! 4. Defaults

use crate::error::BuilderError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LEVEL_ENV: &str = "BUILDER_LOG";
const FORMAT_ENV: &str = "BUILDER_LOG_FORMAT";
const OUTPUT_ENV: &str = "BUILDER_LOG_OUTPUT";
const MODULES_ENV: &str = "BUILDER_LOG_MODULES";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch; `--quiet` turns it off
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// trace, debug, info, warn, error or off
    #[serde(default = "default_level")]
    pub level: String,

    /// text or json
    #[serde(default = "default_format")]
    pub format: String,

    /// stdout, stderr or file
    #[serde(default = "default_output")]
    pub output: String,

    /// Target when `output = "file"`; defaults to `var/log/builder.log`
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// ANSI colors for text output on a terminal stream
    #[serde(default = "enabled_by_default")]
    pub color: bool,

    /// Per-target levels, e.g. `fluid_builder::lint = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn enabled_by_default() -> bool {
    true
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    LogFormat::Text.as_str().to_string()
}

fn default_output() -> String {
    LogOutput::Stderr.as_str().to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: true,
            modules: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn as_str(self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(BuilderError::ConfigError(format!(
                "Invalid log format: {} (expected text or json)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
    File,
}

impl LogOutput {
    fn as_str(self) -> &'static str {
        match self {
            LogOutput::Stdout => "stdout",
            LogOutput::Stderr => "stderr",
            LogOutput::File => "file",
        }
    }
}

impl FromStr for LogOutput {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            other => Err(BuilderError::ConfigError(format!(
                "Invalid log output: {} (expected stdout, stderr or file)",
                other
            ))),
        }
    }
}

/// Environment value if set and non-empty, otherwise the configured one.
fn env_or(name: &str, configured: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Install the global subscriber. A disabled config installs nothing.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), BuilderError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);
    if !config.enabled {
        return Ok(());
    }

    let format: LogFormat = env_or(FORMAT_ENV, &config.format).parse()?;
    let output: LogOutput = env_or(OUTPUT_ENV, &config.output).parse()?;
    let filter = build_filter(config)?;
    let writer = make_writer(output, config)?;
    let ansi = config.color && output != LogOutput::File;

    let registry = Registry::default().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
    };

    installed.map_err(|e| BuilderError::ConfigError(format!("Failed to install logger: {}", e)))
}

fn make_writer(output: LogOutput, config: &LoggingConfig) -> Result<BoxMakeWriter, BuilderError> {
    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::File => {
            let path = config
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from("var/log/builder.log"));
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    BuilderError::ConfigError(format!(
                        "Failed to create log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    BuilderError::ConfigError(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };
    Ok(writer)
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, BuilderError> {
    if let Ok(filter) = EnvFilter::try_from_env(LEVEL_ENV) {
        return Ok(filter);
    }
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut directives: Vec<String> = config
        .modules
        .iter()
        .map(|(target, level)| format!("{}={}", target, level))
        .collect();
    if let Ok(from_env) = std::env::var(MODULES_ENV) {
        directives.extend(
            from_env
                .split(',')
                .filter_map(|entry| entry.split_once('='))
                .map(|(target, level)| format!("{}={}", target.trim(), level.trim())),
        );
    }

    directives
        .iter()
        .try_fold(
            EnvFilter::new(&config.level),
            |filter, directive| -> Result<EnvFilter, BuilderError> {
                let parsed = directive.parse().map_err(|e| {
                    BuilderError::ConfigError(format!(
                        "Invalid log directive {}: {}",
                        directive, e
                    ))
                })?;
                Ok(filter.add_directive(parsed))
            },
        )
}
