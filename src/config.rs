//! Host configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for the terminal host.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HostConfig {
    /// Pause before the computer answers, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Seed for the computer's tie-breaking. Absent means OS entropy.
    #[serde(default)]
    seed: Option<u64>,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Log destination while the interactive screen owns the terminal.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_think_delay_ms() -> u64 {
    500
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("gomoku.log")
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: default_think_delay_ms(),
            seed: None,
            log_filter: default_log_filter(),
            log_file: default_log_file(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(
            think_delay_ms = config.think_delay_ms,
            seed = ?config.seed,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the think delay.
    pub fn with_think_delay_ms(mut self, think_delay_ms: u64) -> Self {
        self.think_delay_ms = think_delay_ms;
        self
    }

    /// Overrides the tie-break seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(*config.think_delay_ms(), 500);
        assert_eq!(*config.seed(), None);
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_file(), Path::new("gomoku.log"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = HostConfig::from_toml("seed = 42\n").unwrap();
        assert_eq!(*config.seed(), Some(42));
        assert_eq!(*config.think_delay_ms(), 500);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = HostConfig::from_toml("think_delay_ms = \"soon\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
        assert!(err.to_string().starts_with("Config error"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "think_delay_ms = 0\nlog_filter = \"debug\"\nlog_file = \"/tmp/g.log\""
        )
        .unwrap();
        let config = HostConfig::load_or_default(file.path()).unwrap();
        assert_eq!(*config.think_delay_ms(), 0);
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(config.log_file(), Path::new("/tmp/g.log"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HostConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = HostConfig::default().with_think_delay_ms(10).with_seed(7);
        assert_eq!(*config.think_delay_ms(), 10);
        assert_eq!(*config.seed(), Some(7));
    }
}
