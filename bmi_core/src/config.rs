//! Configuration file support for the BMI tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi-tracker/config.toml`.

use crate::{Error, LossThreshold, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "bmi-tracker";

/// Smallest text chart the renderer accepts (characters x rows)
pub const MIN_CHART_WIDTH: usize = 20;
pub const MIN_CHART_HEIGHT: usize = 6;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub guidance: GuidanceConfig,

    #[serde(default)]
    pub chart: ChartConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_history_file")]
    pub history_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_file: default_history_file(),
        }
    }
}

/// Weight-change advice configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct GuidanceConfig {
    #[serde(default)]
    pub loss_threshold: LossThreshold,
}

/// Text chart dimensions (characters)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: usize,

    #[serde(default = "default_chart_height")]
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR)
}

fn default_history_file() -> String {
    "bmi_data.json".into()
}

fn default_chart_width() -> usize {
    72
}

fn default_chart_height() -> usize {
    16
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
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
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(APP_DIR).join("config.toml")
    }

    /// Reject settings no front end can work with
    pub fn validate(&self) -> Result<()> {
        if self.data.history_file.trim().is_empty() {
            return Err(Error::Config("data.history_file must not be empty".into()));
        }
        if self.chart.width < MIN_CHART_WIDTH || self.chart.height < MIN_CHART_HEIGHT {
            return Err(Error::Config(format!(
                "chart must be at least {}x{} characters (got {}x{})",
                MIN_CHART_WIDTH, MIN_CHART_HEIGHT, self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }

    /// Full path of the history file under `data_dir`
    pub fn history_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.data.history_file)
    }
}
