//! # Server Configuration
//!
//! Settings are read from a YAML file. The file path comes from the
//! `WEIGHT_LOG_CONFIG` environment variable, falling back to `weight_log.yaml`
//! in the working directory; when neither exists the defaults apply.
//! `WEIGHT_LOG_DATA_DIR` overrides the data directory either way.
//!
//! ```yaml
//! bind_address: 127.0.0.1:3000
//! data_directory: /var/lib/animal-weight-log
//! cors_origin: http://localhost:8080
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_ENV: &str = "WEIGHT_LOG_CONFIG";
pub const DATA_DIR_ENV: &str = "WEIGHT_LOG_DATA_DIR";
const DEFAULT_CONFIG_FILE: &str = "weight_log.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the REST API listens on
    pub bind_address: SocketAddr,
    /// Directory holding `animal_weight_log.csv`
    pub data_directory: PathBuf,
    /// Origin allowed to call the API from a browser
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_directory: default_data_directory(),
            cors_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration using the process environment
    pub fn load() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            });
        let data_dir_override = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::load_from(config_path.as_deref(), data_dir_override)
    }

    /// Load configuration from an optional file, then apply the data directory override
    pub fn load_from(config_path: Option<&Path>, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                info!("Reading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        };

        if let Some(dir) = data_dir_override {
            info!("Data directory overridden to {}", dir.display());
            config.data_directory = dir;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&yaml)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            warn!("Configuration file is empty, using defaults");
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

fn default_data_directory() -> PathBuf {
    match dirs::document_dir() {
        Some(documents) => documents.join("Animal Weight Log"),
        None => PathBuf::from("data"),
    }
}
