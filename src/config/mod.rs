//! # Configuration Management Module
//!
//! Configuration for homekeep lives in a single TOML file with three sections:
//!
//! - [`StorageConfig`] - where the home documents and translation catalogs live
//! - [`HomesConfig`] - the two tunables consumed by the home core (limit and cooldown)
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use homekeep::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Write a starter file, then load it back
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!
//!     println!("Data dir: {}", config.storage.data_dir);
//!     println!("Max homes: {}", config.homes.max_homes);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//! homes_file = "homes.json"
//! global_homes_file = "globalhomes.json"
//! translations_dir = "./data/translations"
//!
//! [homes]
//! max_homes = -1        # -1 = unlimited
//! cooldown_seconds = -1 # -1 or 0 = disabled, at most 60
//!
//! [logging]
//! level = "info"
//! file = "homekeep.log"
//! ```
//!
//! Privileged commands that change `max_homes` or `cooldown_seconds` write the file back with
//! [`Config::save`].

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::homes::store::{DEFAULT_GLOBAL_HOMES_FILE, DEFAULT_HOMES_FILE};

/// Lowest accepted cooldown value (-1 disables the cooldown).
pub const MIN_COOLDOWN_SECONDS: i64 = -1;
/// Highest accepted cooldown value.
pub const MAX_COOLDOWN_SECONDS: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub homes: HomesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    #[serde(default = "default_homes_file")]
    pub homes_file: String,
    #[serde(default = "default_global_homes_file")]
    pub global_homes_file: String,
    /// Directory scanned for `texts_<locale>.json` catalogs.
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
}

fn default_homes_file() -> String {
    DEFAULT_HOMES_FILE.to_string()
}

fn default_global_homes_file() -> String {
    DEFAULT_GLOBAL_HOMES_FILE.to_string()
}

fn default_translations_dir() -> String {
    "./data/translations".to_string()
}

/// Tunables read by the home commands on every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomesConfig {
    /// Maximum personal homes per account; -1 means unlimited.
    #[serde(default = "default_unset")]
    pub max_homes: i64,
    /// Seconds between personal-home teleports; -1 or 0 disables the cooldown.
    #[serde(default = "default_unset")]
    pub cooldown_seconds: i64,
}

fn default_unset() -> i64 {
    -1
}

impl Default for HomesConfig {
    fn default() -> Self {
        Self {
            max_homes: -1,
            cooldown_seconds: -1,
        }
    }
}

impl HomesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_homes < -1 {
            return Err(anyhow!(
                "homes.max_homes must be -1 (unlimited) or a non-negative number, got {}",
                self.max_homes
            ));
        }
        if !cooldown_in_range(self.cooldown_seconds) {
            return Err(anyhow!(
                "homes.cooldown_seconds must be between {} and {}, got {}",
                MIN_COOLDOWN_SECONDS,
                MAX_COOLDOWN_SECONDS,
                self.cooldown_seconds
            ));
        }
        Ok(())
    }
}

/// True when `seconds` is an accepted cooldown value.
pub fn cooldown_in_range(seconds: i64) -> bool {
    (MIN_COOLDOWN_SECONDS..=MAX_COOLDOWN_SECONDS).contains(&seconds)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the home commands would never produce themselves.
    pub fn validate(&self) -> Result<()> {
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        self.homes.validate()
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        Config::default().save(path).await
    }

    /// Write this configuration to `path`, replacing what was there.
    pub async fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig {
                data_dir: "./data".to_string(),
                homes_file: default_homes_file(),
                global_homes_file: default_global_homes_file(),
                translations_dir: default_translations_dir(),
            },
            homes: HomesConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("homekeep.log".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homes_config_default_is_unlimited_without_cooldown() {
        let config = HomesConfig::default();
        assert_eq!(config.max_homes, -1);
        assert_eq!(config.cooldown_seconds, -1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_homes_config_validation() {
        let valid = [(0, 0), (5, 60), (-1, 30), (100, -1)];
        for (max_homes, cooldown_seconds) in valid {
            let config = HomesConfig {
                max_homes,
                cooldown_seconds,
            };
            assert!(
                config.validate().is_ok(),
                "Expected max_homes={} cooldown={} to be valid",
                max_homes,
                cooldown_seconds
            );
        }

        let invalid = [(-2, 0), (3, 61), (3, -2)];
        for (max_homes, cooldown_seconds) in invalid {
            let config = HomesConfig {
                max_homes,
                cooldown_seconds,
            };
            assert!(
                config.validate().is_err(),
                "Expected max_homes={} cooldown={} to be rejected",
                max_homes,
                cooldown_seconds
            );
        }
    }

    #[test]
    fn test_missing_homes_section_uses_defaults() {
        let text = r#"
            [storage]
            data_dir = "/srv/homes"

            [logging]
            level = "debug"
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.homes, HomesConfig::default());
        assert_eq!(config.storage.homes_file, "homes.json");
        assert_eq!(config.storage.global_homes_file, "globalhomes.json");
        assert_eq!(config.logging.file, None);
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_string_lossy().to_string();

        let mut config = Config::default();
        config.homes.max_homes = 3;
        config.homes.cooldown_seconds = 15;
        config.save(&path).await.unwrap();

        let loaded = Config::load(&path).await.unwrap();
        assert_eq!(loaded.homes.max_homes, 3);
        assert_eq!(loaded.homes.cooldown_seconds, 15);
        assert_eq!(loaded.storage.data_dir, "./data");
    }

    #[tokio::test]
    async fn test_load_rejects_out_of_range_cooldown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_string_lossy().to_string();
        let mut config = Config::default();
        config.homes.cooldown_seconds = 120;
        config.save(&path).await.unwrap();
        assert!(Config::load(&path).await.is_err());
    }

    #[test]
    fn test_config_requires_data_dir() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.storage.data_dir = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
