//! Application state for the shift engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, EngineConfig, LegalLimits};
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the tenant configuration loaded at start-up. It is never mutated;
/// per-request limit overrides produce a separate [`EngineConfig`].
#[derive(Clone)]
pub struct AppState {
    /// The loaded tenant configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The configuration to use for one request.
    ///
    /// When the caller sends its own legal limits they are validated and
    /// replace the tenant's; everything else comes from the loaded config.
    pub fn config_with_limits(&self, limits: Option<LegalLimits>) -> EngineResult<EngineConfig> {
        match limits {
            None => Ok(self.config.config().clone()),
            Some(limits) => {
                limits.validate()?;
                Ok(EngineConfig::new(
                    limits,
                    self.config.pharmacy().clone(),
                    self.config.scheduling().clone(),
                ))
            }
        }
    }
}
