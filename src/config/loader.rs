//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a tenant's
//! scheduling configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, LegalLimits, PharmacyConfig, SchedulingConfig};

/// Loads and provides access to a tenant's configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── legal_limits.yaml   # Daily/weekly caps, rest, breaks, pharmacist minimum
/// ├── pharmacy.yaml       # Name, organization id, opening days
/// └── scheduling.yaml     # Suggestion, break advice and overtime policy
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Max daily hours: {}", loader.legal_limits().max_daily_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or misses a required field
    /// - Any value is out of its allowed range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let legal_limits = Self::load_yaml::<LegalLimits>(&path.join("legal_limits.yaml"))?;
        legal_limits.validate()?;

        let pharmacy = Self::load_yaml::<PharmacyConfig>(&path.join("pharmacy.yaml"))?;

        let scheduling = Self::load_yaml::<SchedulingConfig>(&path.join("scheduling.yaml"))?;
        scheduling.validate()?;

        Ok(Self {
            config: EngineConfig::new(legal_limits, pharmacy, scheduling),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
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

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the tenant's legal limits.
    pub fn legal_limits(&self) -> &LegalLimits {
        self.config.legal_limits()
    }

    /// Returns the pharmacy settings.
    pub fn pharmacy(&self) -> &PharmacyConfig {
        self.config.pharmacy()
    }

    /// Returns the scheduling policy.
    pub fn scheduling(&self) -> &SchedulingConfig {
        self.config.scheduling()
    }
}
