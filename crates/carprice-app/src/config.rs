//! Configuration management for carprice
//!
//! Config stored at: ~/.config/carprice/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use carprice_types::{ConfigError, Market, OutputFormat, Result};

use crate::constants::{
    DEALER_DATASET_FILE, DEALER_MODEL_FILE, PRIVATE_DATASET_FILE, PRIVATE_MODEL_FILE,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the datasets and models (current directory if unset)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Dealer market dataset file name
    #[serde(default = "default_dealer_dataset")]
    pub dealer_dataset: String,

    /// Private market dataset file name
    #[serde(default = "default_private_dataset")]
    pub private_dataset: String,

    /// Dealer market model file name
    #[serde(default = "default_dealer_model")]
    pub dealer_model: String,

    /// Private market model file name
    #[serde(default = "default_private_model")]
    pub private_model: String,

    /// Market used when none is given
    #[serde(default)]
    pub default_market: Market,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_dealer_dataset() -> String {
    DEALER_DATASET_FILE.to_string()
}

fn default_private_dataset() -> String {
    PRIVATE_DATASET_FILE.to_string()
}

fn default_dealer_model() -> String {
    DEALER_MODEL_FILE.to_string()
}

fn default_private_model() -> String {
    PRIVATE_MODEL_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            dealer_dataset: default_dealer_dataset(),
            private_dataset: default_private_dataset(),
            dealer_model: default_dealer_model(),
            private_model: default_private_model(),
            default_market: Market::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("carprice");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Dataset file of a market
    pub fn dataset_path(&self, market: Market) -> PathBuf {
        let file = match market {
            Market::Dealer => &self.dealer_dataset,
            Market::Private => &self.private_dataset,
        };
        self.data_dir().join(file)
    }

    /// Model file of a market
    pub fn model_path(&self, market: Market) -> PathBuf {
        let file = match market {
            Market::Dealer => &self.dealer_model,
            Market::Private => &self.private_model,
        };
        self.data_dir().join(file)
    }

    /// Every artifact the application needs at startup
    pub fn artifact_paths(&self) -> Vec<PathBuf> {
        Market::ALL
            .iter()
            .flat_map(|&m| [self.dataset_path(m), self.model_path(m)])
            .collect()
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Car Price Estimator Configuration")?;
        writeln!(f, "=================================")?;
        writeln!(f)?;
        writeln!(f, "Data dir:        {}", self.data_dir().display())?;
        writeln!(f, "Dealer dataset:  {}", self.dealer_dataset)?;
        writeln!(f, "Private dataset: {}", self.private_dataset)?;
        writeln!(f, "Dealer model:    {}", self.dealer_model)?;
        writeln!(f, "Private model:   {}", self.private_model)?;
        writeln!(f, "Default market:  {}", self.default_market)?;
        writeln!(f, "Output format:   {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
