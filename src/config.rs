//! Report configuration
//!
//! Loaded from TOML; every field has a default, so a partial file (or no
//! file at all) is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "lab-report";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Fixed words used in generated captions and titles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub figure: String,
    pub table: String,
    pub listing: String,
    pub intro_title: String,
    pub sources_title: String,
    /// "{description} <figure_reference> {n}."
    pub figure_reference: String,
    /// "{description} <table_reference> {n}."
    pub table_reference: String,
    /// "<listing_reference_prefix> {file} <listing_reference> {n}."
    pub listing_reference_prefix: String,
    pub listing_reference: String,
    /// "<listing_label> {n} – <listing_content> {file}"
    pub listing_content: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            figure: "Рисунок".to_string(),
            table: "Таблиця".to_string(),
            listing: "Лістинг".to_string(),
            intro_title: "ВСТУП".to_string(),
            sources_title: "СПИСОК ВИКОРИСТАНИХ ДЖЕРЕЛ".to_string(),
            figure_reference: "зображено на рисунку".to_string(),
            table_reference: "зображено у таблиці".to_string(),
            listing_reference_prefix: "Вміст файлу".to_string(),
            listing_reference: "відображено у лістингу".to_string(),
            listing_content: "Вміст".to_string(),
        }
    }
}

/// Report generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number given to the first section
    pub first_section: u32,
    /// Fallback directory for images missing at their given path
    pub image_dir: PathBuf,
    /// Fallback directory for listings missing at their given path
    pub listing_dir: PathBuf,
    /// Description used for images added in bulk from a directory
    pub image_placeholder: String,
    pub labels: Labels,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            first_section: 1,
            image_dir: PathBuf::from("Images"),
            listing_dir: PathBuf::from("Listings"),
            image_placeholder: "TEXT".to_string(),
            labels: Labels::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new config builder
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Load config from `config_path`; `Ok(None)` when the file is absent
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;

        let config: ReportConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?;

        log::debug!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    /// Load the config at [`ReportConfig::default_path`], if any
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from_path(path),
            None => Ok(None),
        }
    }

    /// `<config dir>/lab-report/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

/// Builder for ReportConfig
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Set the first section number (at least 1)
    #[must_use]
    pub fn first_section(mut self, number: u32) -> Self {
        self.config.first_section = number.max(1);
        self
    }

    #[must_use]
    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.image_dir = dir.into();
        self
    }

    #[must_use]
    pub fn listing_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.listing_dir = dir.into();
        self
    }

    #[must_use]
    pub fn image_placeholder(mut self, text: impl Into<String>) -> Self {
        self.config.image_placeholder = text.into();
        self
    }

    #[must_use]
    pub fn labels(mut self, labels: Labels) -> Self {
        self.config.labels = labels;
        self
    }

    #[must_use]
    pub fn build(self) -> ReportConfig {
        self.config
    }
}
