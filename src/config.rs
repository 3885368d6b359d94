// src/config.rs

//! Simulator configuration, loaded from TOML.
//!
//! ```toml
//! seed = 42
//! show_all = false
//!
//! [defaults]
//! qubit_count = 200
//! error_rate = 0.05
//! eve_fraction = 0.5
//! ```

use crate::core::{QkdError, QkdResult};
use crate::simulation::SimulationParams;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings shared by every run of a configured simulator.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Seed for reproducible runs; fresh entropy per run when absent.
    pub seed: Option<u64>,
    /// Lift the qubit cap of the detailed view.
    pub show_all: bool,
    /// Parameters used when a caller does not supply them.
    pub defaults: SimulationParams,
}

impl SimulatorConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> QkdResult<Self> {
        toml::from_str(text).map_err(|e| QkdError::Config { message: e.to_string() })
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> QkdResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| QkdError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = SimulatorConfig::from_toml_str(
            r#"
            seed = 42
            show_all = true

            [defaults]
            qubit_count = 200
            error_rate = 0.05
            eve_fraction = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert!(config.show_all);
        assert_eq!(config.defaults, SimulationParams::new(200, 0.05, 0.25));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SimulatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulatorConfig::default());
        assert_eq!(config.defaults.qubit_count, 100);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = SimulatorConfig::from_toml_str("sede = 4").unwrap_err();
        assert!(matches!(err, QkdError::Config { .. }));
    }

    #[test]
    fn test_unknown_keys_in_defaults_are_rejected() {
        let err = SimulatorConfig::from_toml_str("[defaults]\nqubit_cout = 5").unwrap_err();
        assert!(matches!(err, QkdError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = SimulatorConfig::load("/nonexistent/qkdsim.toml").unwrap_err();
        assert!(matches!(err, QkdError::Config { .. }));
    }
}
