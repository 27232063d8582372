//! Configuration management for device-quirks
//!
//! Config file location:
//! - Linux: ~/.config/device-quirks/config.toml
//! - macOS: ~/Library/Application Support/device-quirks/config.toml
//! - Windows: %APPDATA%/device-quirks/config.toml
//!
//! You can override the config location by setting `DEVICE_QUIRKS_CONFIG_PATH`.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::device::DeviceIdentity;

pub const CONFIG_PATH_ENV: &str = "DEVICE_QUIRKS_CONFIG_PATH";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Identity overrides applied on top of the probed identity
    #[serde(default)]
    pub identity: IdentityOverrides,

    /// Logging defaults
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, defaulting when it is absent
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, toml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = ProjectDirs::from("com", "forgemypc", "device-quirks")
            .context("Could not determine project directories")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Create default config file if it doesn't exist
    pub fn init() -> Result<Self> {
        let config_path = Self::config_path()?;
        let config = Self::load_from(&config_path)?;

        if !config_path.exists() {
            config.save_to(&config_path)?;
        }

        Ok(config)
    }
}

/// Identity fields to force instead of what the platform reports.
///
/// Values are used verbatim: no trimming or case folding, since
/// classification compares exact strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityOverrides {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub device: Option<String>,
}

impl IdentityOverrides {
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none() && self.model.is_none() && self.device.is_none()
    }

    pub fn apply(&self, identity: DeviceIdentity) -> DeviceIdentity {
        identity.with_overrides(
            self.manufacturer.as_deref(),
            self.model.as_deref(),
            self.device.as_deref(),
        )
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when neither `--log-level` nor `RUST_LOG` is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
