//! Session state backing the contract's externally owned facts.
//!
//! A [`Session`] is the source of truth the contract queries reflect:
//! consent grants and revocations, the abort channel, and the discipline
//! posture. The contract itself never mutates this state; callers do,
//! through the explicit transitions below, and the trait impl at the
//! bottom reads it back out.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::SovereignNeuromorphContract;
use crate::errors::SessionError;

/// Consent as granted (or withheld) by the subject.
///
/// `granted_at` keeps the first grant's timestamp across repeated grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentState {
    pub granted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

/// One subject's live operating session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub consent: ConsentState,
    #[serde(default)]
    pub abort_control_armed: bool,
    #[serde(default)]
    pub discipline_non_coercive: bool,
}

impl Session {
    /// Fresh session for `subject`: no consent, no abort channel, discipline
    /// posture unverified. Every contract query except the rollback
    /// prohibition answers false until the caller records otherwise.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            created_at: Utc::now(),
            consent: ConsentState::default(),
            abort_control_armed: false,
            discipline_non_coercive: false,
        }
    }

    /// Record explicit consent. Idempotent: a repeated grant keeps the
    /// original timestamp. A grant after a revocation clears the
    /// revocation mark.
    pub fn grant_consent(&mut self) {
        if !self.consent.granted {
            self.consent.granted = true;
            self.consent.granted_at.get_or_insert_with(Utc::now);
            tracing::debug!(session = %self.id, subject = %self.subject, "consent granted");
        }
        self.consent.revoked_at = None;
    }

    /// Withdraw consent. Participation is revocable at any time; the
    /// grant timestamp is kept for the record.
    pub fn revoke_consent(&mut self) {
        if self.consent.granted {
            self.consent.granted = false;
            self.consent.revoked_at = Some(Utc::now());
            tracing::debug!(session = %self.id, subject = %self.subject, "consent revoked");
        }
    }

    /// Hand the subject a working unilateral stop/pause channel.
    pub fn arm_abort_control(&mut self) {
        self.abort_control_armed = true;
    }

    /// Mark the abort channel as lost or relinquished.
    pub fn surrender_abort_control(&mut self) {
        self.abort_control_armed = false;
    }

    /// Record the outcome of a discipline-policy review.
    pub fn set_discipline_non_coercive(&mut self, verified: bool) {
        self.discipline_non_coercive = verified;
    }

    /// Load a session from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SessionError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                SessionError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        serde_yaml::from_str(&raw).map_err(|source| SessionError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist the session as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let raw = serde_yaml::to_string(self).map_err(|source| SessionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, raw).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SovereignNeuromorphContract for Session {
    fn has_explicit_consent(&self) -> bool {
        self.consent.granted
    }

    fn has_sovereign_abort_control(&self) -> bool {
        self.abort_control_armed
    }

    fn is_discipline_personalized_and_non_coercive(&self) -> bool {
        self.discipline_non_coercive
    }
}
