//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline run limits applied when a field is omitted.
//! 2. **Structures:** The root `Config` and its `general` section.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; use `Config::default()` when no file is given.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Step budget applied to a run unless configured otherwise.
    ///
    /// Bounds a program that never reaches `HALT`.
    pub const MAX_STEPS: u64 = 100_000_000;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use vnsim_core::Config;
///
/// let json = r#"{
///     "general": {
///         "trace_instructions": true,
///         "max_steps": 5000
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.max_steps, Some(5000));
/// assert!(!config.general.debug);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log every executed instruction at `info` level
    #[serde(default)]
    pub trace_instructions: bool,

    /// Upper bound on executed instructions; `null` or `0` runs until halt or fault
    #[serde(default = "GeneralConfig::default_max_steps")]
    pub max_steps: Option<u64>,

    /// Start in the interactive step debugger
    #[serde(default)]
    pub debug: bool,
}

impl GeneralConfig {
    /// Returns the default step budget.
    const fn default_max_steps() -> Option<u64> {
        Some(defaults::MAX_STEPS)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_steps: Self::default_max_steps(),
            debug: false,
        }
    }
}
