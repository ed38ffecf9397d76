//! Configuration Module - User preferences from ~/.keydrill/config.toml
//!
//! Supports:
//! - Default search range, charset and budgets
//! - Sequential/parallel dispatch tunables
//! - Strength scoring thresholds and the common-password list

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::{CharsetPreset, DispatchPolicy};
use crate::strength::StrengthConfig;

/// Keydrill Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Search defaults
    pub search: SearchConfig,
    /// Dispatch tunables
    pub dispatch: DispatchPolicy,
    /// Strength evaluator settings
    pub strength: StrengthConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
    /// Colored terminal output
    pub color: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            color: true,
        }
    }
}

/// Search defaults, overridden by CLI flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Charset preset
    pub charset: CharsetPreset,
    /// Shortest candidate length
    pub min_length: usize,
    /// Longest candidate length
    pub max_length: usize,
    /// Worker budget (0 = auto)
    pub workers: usize,
    /// Candidate budget across the whole run (0 = unlimited)
    pub max_attempts: u64,
    /// Wall-clock limit checked between lengths (0 = none)
    pub time_limit_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            charset: CharsetPreset::Full,
            min_length: 1,
            max_length: 4,
            workers: 0, // auto-detect
            max_attempts: 0,
            time_limit_secs: 0,
        }
    }
}

impl SearchConfig {
    pub fn workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    pub fn max_attempts(&self) -> Option<u64> {
        (self.max_attempts > 0).then_some(self.max_attempts)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_secs > 0).then(|| Duration::from_secs(self.time_limit_secs))
    }
}

impl Config {
    /// Load config from default path or return defaults
    pub fn load() -> Self {
        Self::load_from(&Self::default_path()).unwrap_or_default()
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "tunclon", "keydrill")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".keydrill")
                    .join("config.toml")
            })
    }

    /// Create default config file if it doesn't exist
    pub fn ensure_exists() -> Result<PathBuf> {
        let path = Self::default_path();
        if !path.exists() {
            fs::create_dir_all(path.parent().unwrap_or_else(|| Path::new(".")))?;
            fs::write(&path, generate_sample_config())
                .with_context(|| format!("Failed to write config: {}", path.display()))?;
            tracing::info!("Created default config at {}", path.display());
        }
        Ok(path)
    }
}

/// Generate a sample config file with comments
pub fn generate_sample_config() -> String {
    r#"# Keydrill Configuration
# Location: ~/.keydrill/config.toml (or %APPDATA%\keydrill\config.toml on Windows)

[general]
# Log level: trace, debug, info, warn, error
log_level = "info"

# Colored terminal output
color = true

[search]
# Charset preset: "lower", "upper", "digits", "alnum", "full" or "auto"
# ("auto" derives the charset from a plaintext target)
charset = "full"

# Candidate length range (inclusive)
min_length = 1
max_length = 4

# Worker budget (0 = auto-detect CPU count)
workers = 0

# Stop after this many candidates across the whole run (0 = unlimited)
max_attempts = 0

# Stop escalating lengths after this many seconds (0 = no limit)
# Checked between lengths; a length in progress always completes.
time_limit_secs = 0

[dispatch]
# Spaces with at most this many candidates are searched inline
sequential_space_threshold = 10000

# Lengths up to this bound are searched inline regardless of size
sequential_max_length = 3

# Worker count for parallel lengths:
#   "parallelism" = min(workers, CPU count)
#   "budget"      = workers as configured
#   "length"      = min(workers, candidate length)
worker_cap = "parallelism"

[strength]
# Length that earns the first point
min_length_for_bonus = 8

# Length that earns the long-password point
long_length_bonus = 12

# Passwords that always score 0 (case-insensitive)
common_words = ["password", "123456", "12345678", "qwerty", "abc123", "letmein", "admin", "welcome", "monkey", "iloveyou", "111111", "dragon"]
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::WorkerCap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.search.charset, CharsetPreset::Full);
        assert_eq!(config.dispatch.sequential_space_threshold, 10_000);
        assert_eq!(config.dispatch.sequential_max_length, 3);
        assert!(config.search.max_attempts().is_none());
        assert!(config.search.time_limit().is_none());
        assert!(config.search.workers() >= 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test_config.toml");

        let mut config = Config::default();
        config.search.max_length = 6;
        config.dispatch.worker_cap = WorkerCap::Length;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.search.max_length, 6);
        assert_eq!(loaded.dispatch.worker_cap, WorkerCap::Length);
        assert_eq!(
            loaded.strength.common_words,
            config.strength.common_words
        );
    }

    #[test]
    fn test_parse_sample_config() {
        let sample = generate_sample_config();
        let config: Config = toml::from_str(&sample).unwrap();
        assert_eq!(config.dispatch.worker_cap, WorkerCap::Parallelism);
        assert_eq!(
            config.strength.common_words,
            StrengthConfig::default().common_words
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[search]\nmax_attempts = 500\n").unwrap();
        assert_eq!(config.search.max_attempts(), Some(500));
        assert_eq!(config.search.max_length, 4);
        assert_eq!(config.dispatch.sequential_max_length, 3);
    }
}
