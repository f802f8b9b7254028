//! Configuration loading and management for the shift engine.
//!
//! This module provides functionality to load a tenant's legal limits,
//! pharmacy settings and scheduling policy from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded pharmacy: {}", config.pharmacy().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BreakAdviceConfig, BreakTier, EngineConfig, LegalLimits, OvertimeConfig, PharmacyConfig,
    SchedulingConfig, SplitRule, SuggestionConfig,
};
