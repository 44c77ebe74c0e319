//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! engine configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AppConfig, ExternalLinks, LocationsConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/
/// ├── locations.yaml   # Location list (required)
/// └── links.yaml       # External links (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// for location in loader.config().locations() {
///     println!("Location: {location}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `locations.yaml` is missing or either file
    /// contains invalid YAML. A missing `links.yaml` is not an error;
    /// links default to empty.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let locations_path = path.join("locations.yaml");
        let locations = Self::load_yaml::<LocationsConfig>(&locations_path)?;

        let links_path = path.join("links.yaml");
        let links = if links_path.exists() {
            Self::load_yaml::<ExternalLinks>(&links_path)?
        } else {
            ExternalLinks::default()
        };

        Ok(Self {
            config: AppConfig::new(locations.locations, links),
        })
    }

    /// Builds a loader around an in-code configuration, bypassing the
    /// filesystem. Used by tests and embeddings.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
