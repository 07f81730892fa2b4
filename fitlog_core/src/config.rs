//! Configuration file support for fitlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitlog/config.toml`.

use crate::{Error, Result, WeightUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub units: UnitConfig,

    #[serde(default)]
    pub goals: GoalsConfig,
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

/// Media attachment storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
        }
    }
}

/// Input-side unit preference. Storage is always kilograms; this only
/// controls how entered weights are interpreted.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UnitConfig {
    #[serde(default)]
    pub weight_unit: WeightUnit,
}

/// Reference lines for the health charts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_daily_step_goal")]
    pub daily_step_goal: u32,

    #[serde(default = "default_sleep_baseline_hours")]
    pub sleep_baseline_hours: f64,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            daily_step_goal: default_daily_step_goal(),
            sleep_baseline_hours: default_sleep_baseline_hours(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("fitlog")
}

fn default_media_dir() -> PathBuf {
    default_data_dir().join("media")
}

fn default_daily_step_goal() -> u32 {
    8000
}

fn default_sleep_baseline_hours() -> f64 {
    7.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("fitlog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.goals.daily_step_goal, 8000);
        assert_eq!(config.goals.sleep_baseline_hours, 7.0);
        assert_eq!(config.units.weight_unit, WeightUnit::Kg);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.goals.daily_step_goal, parsed.goals.daily_step_goal);
        assert_eq!(config.units.weight_unit, parsed.units.weight_unit);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[units]
weight_unit = "lb"

[goals]
daily_step_goal = 10000
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.units.weight_unit, WeightUnit::Lb);
        assert_eq!(config.goals.daily_step_goal, 10000);
        assert_eq!(config.goals.sleep_baseline_hours, 7.0); // default
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.goals.daily_step_goal = 12000;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.goals.daily_step_goal, 12000);
    }
}
