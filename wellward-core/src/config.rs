//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/wellward/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/wellward/` (~/.config/wellward/)
//! - Data: `$XDG_DATA_HOME/wellward/` (~/.local/share/wellward/)
//! - State/Logs: `$XDG_STATE_HOME/wellward/` (~/.local/state/wellward/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Daily quote source configuration
    #[serde(default)]
    pub quote: QuoteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Daily quote source configuration
///
/// The quote endpoint is an external collaborator; every tunable here
/// bounds how hard we lean on it when the daily cache is stale.
#[derive(Debug, Deserialize, Clone)]
pub struct QuoteConfig {
    /// Quote endpoint URL
    #[serde(default = "default_quote_url")]
    pub url: String,

    /// HTTP timeout per attempt, in seconds
    #[serde(default = "default_quote_timeout")]
    pub timeout_secs: u64,

    /// Max fetch attempts per day before falling back
    #[serde(default = "default_quote_max_attempts")]
    pub max_attempts: usize,

    /// Shortest acceptable quote length, in characters
    #[serde(default = "default_quote_min_len")]
    pub min_len: usize,

    /// Longest acceptable quote length, in characters
    #[serde(default = "default_quote_max_len")]
    pub max_len: usize,

    /// Text stored for the day when no acceptable quote was obtained
    #[serde(default = "default_quote_fallback")]
    pub fallback: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            url: default_quote_url(),
            timeout_secs: default_quote_timeout(),
            max_attempts: default_quote_max_attempts(),
            min_len: default_quote_min_len(),
            max_len: default_quote_max_len(),
            fallback: default_quote_fallback(),
        }
    }
}

impl QuoteConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::Config("quote.url must not be empty".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(Error::Config(
                "quote.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.min_len > self.max_len {
            return Err(Error::Config(
                "quote.min_len must not exceed quote.max_len".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_quote_url() -> String {
    "https://www.affirmations.dev".to_string()
}

fn default_quote_timeout() -> u64 {
    10
}

fn default_quote_max_attempts() -> usize {
    5
}

fn default_quote_min_len() -> usize {
    50
}

fn default_quote_max_len() -> usize {
    110
}

fn default_quote_fallback() -> String {
    "No quote available today — check back tomorrow.".to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.quote.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/wellward/config.toml` (~/.config/wellward/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("wellward").join("config.toml")
    }

    /// Returns the data directory path (for the daily cache file)
    ///
    /// `$XDG_DATA_HOME/wellward/` (~/.local/share/wellward/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("wellward")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/wellward/` (~/.local/state/wellward/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("wellward")
    }

    /// Returns the daily cache file path
    ///
    /// `$XDG_DATA_HOME/wellward/daily_cache.json`
    pub fn daily_cache_path() -> PathBuf {
        Self::data_dir().join("daily_cache.json")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/wellward/wellward.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("wellward.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.quote.max_attempts, 5);
        assert_eq!(config.quote.min_len, 50);
        assert_eq!(config.quote.max_len, 110);
        assert_eq!(config.logging.level, "info");
        assert!(config.quote.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[quote]
url = "https://quotes.example.com/daily"
max_attempts = 3
timeout_secs = 5

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.quote.url, "https://quotes.example.com/daily");
        assert_eq!(config.quote.max_attempts, 3);
        assert_eq!(config.quote.timeout_secs, 5);
        // Unset fields keep their defaults
        assert_eq!(config.quote.min_len, 50);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_quote_config_validation() {
        let config = QuoteConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = QuoteConfig {
            min_len: 200,
            max_len: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = QuoteConfig {
            url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
