//! Tool configuration: where session, policy, and ledger state live, and
//! the safety thresholds the controller runs with.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::safety::{BciSafetyController, BCI_HARD_CEILING};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SncConfig {
    /// Session state file (YAML).
    pub session: PathBuf,
    /// Discipline policy file (YAML).
    pub policy: PathBuf,
    /// Deed ledger file (NDJSON, append-only).
    pub ledger: PathBuf,
    pub safety: SafetyConfig,
}

impl Default for SncConfig {
    fn default() -> Self {
        Self {
            session: PathBuf::from("session.yaml"),
            policy: PathBuf::from("discipline.yaml"),
            ledger: PathBuf::from("deeds.ndjson"),
            safety: SafetyConfig::default(),
        }
    }
}

/// Thresholds for the biocompatibility controller. Both are validated
/// against the compiled ceiling; configuration can tighten the envelope
/// but never widen it.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SafetyConfig {
    pub max_index: f32,
    pub warn_index: f32,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_index: BCI_HARD_CEILING,
            warn_index: 0.20,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl SafetyConfig {
    /// NaN fails both range checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_index > 0.0 && self.max_index <= BCI_HARD_CEILING) {
            return Err(ConfigError::Invalid(format!(
                "safety.max_index {} must be in (0, {}]",
                self.max_index, BCI_HARD_CEILING
            )));
        }
        if !(0.0..=self.max_index).contains(&self.warn_index) {
            return Err(ConfigError::Invalid(format!(
                "safety.warn_index {} must be in [0, max_index {}]",
                self.warn_index, self.max_index
            )));
        }
        Ok(())
    }

    pub fn controller(&self) -> BciSafetyController {
        BciSafetyController::new(self.max_index, self.warn_index)
    }
}

impl SncConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.safety.validate()
    }

    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`SncConfig::load`], but an absent file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Missing { .. }) => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SncConfig::default().validate().unwrap();
    }

    #[test]
    fn ceiling_cannot_be_widened_by_config() {
        let cfg = SafetyConfig {
            max_index: 0.9,
            warn_index: 0.1,
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn warn_above_max_is_invalid() {
        let cfg = SafetyConfig {
            max_index: 0.25,
            warn_index: 0.28,
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn partial_config_files_fill_from_defaults() {
        let cfg: SncConfig = serde_yaml::from_str("safety:\n  warn_index: 0.15\n").unwrap();
        assert_eq!(cfg.session, PathBuf::from("session.yaml"));
        assert!((cfg.safety.warn_index - 0.15).abs() < 1e-6);
        assert!((cfg.safety.max_index - BCI_HARD_CEILING).abs() < 1e-6);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<SncConfig>("sesion: typo.yaml\n").is_err());
    }

    #[test]
    fn absent_file_yields_defaults_but_parse_errors_do_not() {
        let dir = tempfile::tempdir().unwrap();

        let cfg = SncConfig::load_or_default(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(cfg, SncConfig::default());

        let bad = dir.path().join("snc.yaml");
        std::fs::write(&bad, "safety: [not, a, map]\n").unwrap();
        assert!(matches!(
            SncConfig::load_or_default(&bad),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn loaded_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snc.yaml");
        std::fs::write(&path, "safety:\n  max_index: 0.5\n").unwrap();
        assert!(matches!(
            SncConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
