// src/config/mod.rs

//! Simulator configuration.
//!
//! Sources, highest precedence first:
//! 1. Environment variables (`QCOIN_` prefix)
//! 2. A JSON configuration file
//! 3. Default values

use crate::core::{DEFAULT_SHOTS, MAX_NORM_DRIFT, MAX_QUBITS, QcoinError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits and defaults applied by [`crate::Simulator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Largest register a circuit may declare. Capped at [`MAX_QUBITS`].
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,

    /// Shot count used when a request does not name one.
    #[serde(default = "default_shots")]
    pub default_shots: u32,

    /// Fixed RNG seed for reproducible sampling; `None` uses the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Largest `| ||psi||^2 - 1 |` tolerated at measurement time.
    #[serde(default = "default_norm_tolerance")]
    pub norm_tolerance: f64,
}

fn default_max_qubits() -> usize {
    MAX_QUBITS
}

fn default_shots() -> u32 {
    DEFAULT_SHOTS
}

fn default_norm_tolerance() -> f64 {
    MAX_NORM_DRIFT
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            max_qubits: default_max_qubits(),
            default_shots: default_shots(),
            seed: None,
            norm_tolerance: default_norm_tolerance(),
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: SimulatorConfig =
            serde_json::from_str(&contents).map_err(|e| QcoinError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by whatever `QCOIN_*` variables are set.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// File (if given) then environment overrides, validated.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Only variables that are set and parse override the current values.
    fn merge_env(mut self) -> Self {
        if let Ok(v) = std::env::var("QCOIN_MAX_QUBITS") {
            if let Ok(val) = v.parse() {
                self.max_qubits = val;
            }
        }
        if let Ok(v) = std::env::var("QCOIN_DEFAULT_SHOTS") {
            if let Ok(val) = v.parse() {
                self.default_shots = val;
            }
        }
        if let Ok(v) = std::env::var("QCOIN_SEED") {
            if let Ok(val) = v.parse() {
                self.seed = Some(val);
            }
        }
        if let Ok(v) = std::env::var("QCOIN_NORM_TOLERANCE") {
            if let Ok(val) = v.parse() {
                self.norm_tolerance = val;
            }
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_QUBITS {
            return Err(QcoinError::Config(format!(
                "max_qubits must be in 1..={}, got {}",
                MAX_QUBITS, self.max_qubits
            )));
        }
        if !self.norm_tolerance.is_finite() || self.norm_tolerance <= 0.0 {
            return Err(QcoinError::Config(format!(
                "norm_tolerance must be finite and positive, got {}",
                self.norm_tolerance
            )));
        }
        Ok(())
    }

    /// Same configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.max_qubits, 24);
        assert_eq!(config.default_shots, 512);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulatorConfig = serde_json::from_str(r#"{"seed": 42, "max_qubits": 8}"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_qubits, 8);
        assert_eq!(config.default_shots, 512);
        assert!((config.norm_tolerance - 1e-6).abs() < 1e-15);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = SimulatorConfig {
            max_qubits: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(QcoinError::Config(_))));

        let config = SimulatorConfig {
            max_qubits: MAX_QUBITS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimulatorConfig {
            norm_tolerance: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("qcoin-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"default_shots": 1000}"#).unwrap();
        let config = SimulatorConfig::from_file(&path).unwrap();
        assert_eq!(config.default_shots, 1000);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            SimulatorConfig::from_file(std::env::temp_dir().join("qcoin-no-such-config.json")),
            Err(QcoinError::Io(_))
        ));
    }

    // The only test that touches `QCOIN_*`, so no other test observes the variables.
    #[test]
    fn test_env_overrides_file() {
        let path = std::env::temp_dir().join(format!("qcoin-config-env-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"seed": 1, "max_qubits": 8, "default_shots": 100}"#).unwrap();

        // SAFETY: no other test reads or writes these variables.
        unsafe {
            std::env::set_var("QCOIN_SEED", "99");
            std::env::set_var("QCOIN_DEFAULT_SHOTS", "not-a-number");
        }
        let loaded = SimulatorConfig::load(Some(&path));
        let from_env = SimulatorConfig::from_env();
        unsafe {
            std::env::remove_var("QCOIN_SEED");
            std::env::remove_var("QCOIN_DEFAULT_SHOTS");
        }
        std::fs::remove_file(&path).ok();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.seed, Some(99));
        assert_eq!(loaded.max_qubits, 8);
        // unparsable values are ignored
        assert_eq!(loaded.default_shots, 100);

        assert_eq!(from_env.seed, Some(99));
        assert_eq!(from_env.max_qubits, MAX_QUBITS);

        assert_eq!(SimulatorConfig::load(None).unwrap(), SimulatorConfig::default());
    }
}
