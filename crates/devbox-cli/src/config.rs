//! Configuration for the devbox CLI.
//!
//! Defaults come from environment variables; command-line flags override them.

use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable (default).
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Environment-derived CLI settings.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Ignore file used when `--ignore-file` is not given.
    pub ignore_file: Option<PathBuf>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DEVBOX_IGNORE_FILE` | unset (`.dockerignore` in the upload root) |
    /// | `DEVBOX_LOG_FORMAT` | `text` (text, json) |
    pub fn from_env() -> Self {
        Self {
            ignore_file: std::env::var("DEVBOX_IGNORE_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            log_format: std::env::var("DEVBOX_LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }
}
