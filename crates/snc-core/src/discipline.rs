//! Discipline policy review.
//!
//! Discipline signals (fear, pain, discomfort bands) are labeled feedback
//! bound to clearly defined learning objectives. They are never tools of
//! punishment. This module checks a declared policy against those rules;
//! the review's outcome is what a session records as its discipline
//! posture.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One labeled feedback signal and the objective it serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisciplineSignal {
    /// Signal label, e.g. "fear", "pain", "discomfort".
    pub label: String,
    /// Normalized intensity bound, 0..1.
    pub intensity: f32,
    /// Learning objective this signal is tied to. Must name one of the
    /// policy's declared objectives.
    pub objective: String,
}

/// Declared discipline policy for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisciplinePolicy {
    pub subject: String,
    /// Learning objectives every signal must bind to.
    pub objectives: Vec<String>,
    #[serde(default)]
    pub signals: Vec<DisciplineSignal>,
    /// Set by a policy that admits punitive use. Always rejected.
    #[serde(default)]
    pub punitive_use: bool,
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy for '{subject}' declares no learning objectives")]
    EmptyObjectives { subject: String },

    #[error("signal '{label}' is bound to undeclared objective '{objective}'")]
    UnboundSignal { label: String, objective: String },

    #[error("signal '{label}' intensity {intensity} outside 0..1")]
    IntensityOutOfRange { label: String, intensity: f32 },

    #[error("policy admits punitive use of discipline signals")]
    PunitiveUse,

    #[error("failed to read policy {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy {}: {source}", path.display())]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl DisciplinePolicy {
    /// Checks the policy top to bottom and reports the first violation:
    /// objectives present, every signal bound to a declared objective
    /// with in-range intensity, no punitive use.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.objectives.is_empty() {
            return Err(PolicyError::EmptyObjectives {
                subject: self.subject.clone(),
            });
        }
        for signal in &self.signals {
            if !self.objectives.contains(&signal.objective) {
                return Err(PolicyError::UnboundSignal {
                    label: signal.label.clone(),
                    objective: signal.objective.clone(),
                });
            }
            // NaN fails the range check.
            if !(0.0..=1.0).contains(&signal.intensity) {
                return Err(PolicyError::IntensityOutOfRange {
                    label: signal.label.clone(),
                    intensity: signal.intensity,
                });
            }
        }
        if self.punitive_use {
            return Err(PolicyError::PunitiveUse);
        }
        Ok(())
    }

    /// The contract's discipline query, answered from this policy.
    pub fn is_personalized_and_non_coercive(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| PolicyError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded_policy() -> DisciplinePolicy {
        DisciplinePolicy {
            subject: "subject-7".to_string(),
            objectives: vec!["gait-stability".to_string(), "impulse-regulation".to_string()],
            signals: vec![
                DisciplineSignal {
                    label: "fear".to_string(),
                    intensity: 0.2,
                    objective: "impulse-regulation".to_string(),
                },
                DisciplineSignal {
                    label: "discomfort".to_string(),
                    intensity: 0.4,
                    objective: "gait-stability".to_string(),
                },
            ],
            punitive_use: false,
        }
    }

    #[test]
    fn bounded_labeled_policy_passes_review() {
        let policy = bounded_policy();
        policy.validate().unwrap();
        assert!(policy.is_personalized_and_non_coercive());
    }

    #[test]
    fn policy_without_objectives_is_rejected() {
        let mut policy = bounded_policy();
        policy.objectives.clear();
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::EmptyObjectives { .. })
        ));
    }

    #[test]
    fn unbound_signal_is_rejected() {
        let mut policy = bounded_policy();
        policy.signals[0].objective = "obedience".to_string();
        let err = policy.validate().unwrap_err();
        assert!(matches!(err, PolicyError::UnboundSignal { .. }));
        assert!(err.to_string().contains("obedience"));
    }

    #[test]
    fn out_of_range_and_nan_intensities_are_rejected() {
        let mut policy = bounded_policy();
        policy.signals[1].intensity = 1.3;
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::IntensityOutOfRange { .. })
        ));

        policy.signals[1].intensity = f32::NAN;
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::IntensityOutOfRange { .. })
        ));
    }

    #[test]
    fn punitive_use_is_rejected_even_when_signals_are_bounded() {
        let mut policy = bounded_policy();
        policy.punitive_use = true;
        assert!(matches!(policy.validate(), Err(PolicyError::PunitiveUse)));
        assert!(!policy.is_personalized_and_non_coercive());
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let raw = "subject: s\nobjectives: [o]\ncoercion_budget: 3\n";
        assert!(serde_yaml::from_str::<DisciplinePolicy>(raw).is_err());
    }

    #[test]
    fn policy_loads_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discipline.yaml");
        std::fs::write(
            &path,
            "subject: subject-7\nobjectives: [gait-stability]\nsignals:\n  - label: discomfort\n    intensity: 0.3\n    objective: gait-stability\n",
        )
        .unwrap();
        let policy = DisciplinePolicy::load(&path).unwrap();
        assert!(policy.is_personalized_and_non_coercive());
    }
}
