//! Configuration file support for Cindy.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cindy/config.toml`.

use crate::{Error, Result, Targets};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub targets: TargetsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Timer display configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Refresh interval of the elapsed-time display
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Targets offered when no previous workout was recorded
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetsConfig {
    #[serde(default = "default_pullups")]
    pub pullups: u32,

    #[serde(default = "default_pushups")]
    pub pushups: u32,

    #[serde(default = "default_squats")]
    pub squats: u32,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            pullups: default_pullups(),
            pushups: default_pushups(),
            squats: default_squats(),
        }
    }
}

impl TargetsConfig {
    pub fn to_targets(&self) -> Targets {
        Targets::new(self.pullups, self.pushups, self.squats)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join("cindy"),
        None => PathBuf::from(".cindy"),
    }
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_pullups() -> u32 {
    20
}

fn default_pushups() -> u32 {
    40
}

fn default_squats() -> u32 {
    60
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("cindy").join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.timer.tick_interval_ms == 0 {
            return Err(Error::Config("timer.tick_interval_ms must be positive".into()));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
