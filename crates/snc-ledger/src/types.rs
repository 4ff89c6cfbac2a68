//! Deed and rights ledger record types.
//!
//! Deed events are content-addressed: [`DeedEvent::seal`] stores a
//! `sha256:` hash over every field except the hash itself, and
//! [`DeedEvent::verify_hash`] recomputes it on read. Rights entries are
//! Tier-1 monotone records; the ledger layer refuses any entry that
//! would turn reversal into a standing right.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::LedgerError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LifeHarmFlag {
    None,
    Potential,
    Confirmed,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EthicsFlags {
    pub ethics_ok: bool,
    pub life_harm_flag: LifeHarmFlag,
}

impl Default for EthicsFlags {
    fn default() -> Self {
        Self {
            ethics_ok: true,
            life_harm_flag: LifeHarmFlag::None,
        }
    }
}

/// One audited deed: who did what to the subject, with which ethics
/// posture, and whether a reversal was involved.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeedEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub description: String,
    pub ethics_flags: EthicsFlags,
    /// MP-token delta this deed settles (compensation is positive).
    pub mp_delta: f64,
    pub reversal_proposed: bool,
    pub reversal_granted: bool,
    /// `sha256:` hash over all fields above. None until sealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

// Hash input: every field except the hash itself. Field order is the
// canonical serialization order.
#[derive(Serialize)]
struct DeedHashInput<'a> {
    id: &'a Uuid,
    timestamp: &'a DateTime<Utc>,
    actor: &'a str,
    description: &'a str,
    ethics_flags: &'a EthicsFlags,
    mp_delta: f64,
    reversal_proposed: bool,
    reversal_granted: bool,
}

impl DeedEvent {
    /// New unsealed deed with a fresh id and the current time.
    pub fn new(actor: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor: actor.into(),
            description: description.into(),
            ethics_flags: EthicsFlags::default(),
            mp_delta: 0.0,
            reversal_proposed: false,
            reversal_granted: false,
            content_hash: None,
        }
    }

    pub fn with_ethics(mut self, flags: EthicsFlags) -> Self {
        self.ethics_flags = flags;
        self
    }

    pub fn with_mp_delta(mut self, mp_delta: f64) -> Self {
        self.mp_delta = mp_delta;
        self
    }

    pub fn with_reversal(mut self, proposed: bool, granted: bool) -> Self {
        self.reversal_proposed = proposed;
        self.reversal_granted = granted;
        self
    }

    /// Set explicit timestamp (for deterministic replay).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn compute_content_hash(&self) -> Result<String, LedgerError> {
        let input = DeedHashInput {
            id: &self.id,
            timestamp: &self.timestamp,
            actor: &self.actor,
            description: &self.description,
            ethics_flags: &self.ethics_flags,
            mp_delta: self.mp_delta,
            reversal_proposed: self.reversal_proposed,
            reversal_granted: self.reversal_granted,
        };
        let canonical = serde_json::to_vec(&input).map_err(|source| LedgerError::Serialize {
            id: self.id,
            source,
        })?;
        Ok(format!("sha256:{}", hex::encode(Sha256::digest(&canonical))))
    }

    /// Stamp the content hash. Sealing an already sealed deed recomputes
    /// and overwrites the hash.
    pub fn seal(mut self) -> Result<Self, LedgerError> {
        self.content_hash = Some(self.compute_content_hash()?);
        Ok(self)
    }

    /// Recompute the hash and compare against the sealed one.
    pub fn verify_hash(&self) -> Result<(), LedgerError> {
        let expected = match &self.content_hash {
            Some(h) => h,
            None => {
                return Err(LedgerError::Tampered {
                    id: self.id,
                    reason: "deed is unsealed (missing content_hash)".to_string(),
                })
            }
        };
        let actual = self.compute_content_hash()?;
        if &actual != expected {
            return Err(LedgerError::Tampered {
                id: self.id,
                reason: format!("content hash mismatch: expected {expected}, got {actual}"),
            });
        }
        Ok(())
    }
}

/// Subject identity as carried in rights entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Identity {
    pub id: Uuid,
    pub label: String,
}

/// Neurorights protection tier. Tier 1 is the strongest and the only
/// tier this ledger writes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NeurorightsTier {
    Tier1,
    Tier2,
    Tier3,
}

/// One rights declaration for a subject. Entries are monotone: nothing
/// in an entry can weaken a protection a prior entry declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RightsEntry {
    pub subject: Identity,
    pub tier: NeurorightsTier,
    pub allow_neuromorph_reversal: bool,
    pub timestamp: DateTime<Utc>,
    pub statement: String,
}

impl RightsEntry {
    /// Tier-1 entry with reversal disallowed, the only shape the ledger
    /// accepts.
    pub fn monotone_default(subject_label: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            subject: Identity {
                id: Uuid::new_v4(),
                label: subject_label.into(),
            },
            tier: NeurorightsTier::Tier1,
            allow_neuromorph_reversal: false,
            timestamp: Utc::now(),
            statement: statement.into(),
        }
    }

    pub fn is_reversal_allowed(&self) -> bool {
        self.allow_neuromorph_reversal
    }
}
