use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// An entry tried to make reversal a standing right.
    #[error("rights violation: {0}")]
    RightsViolation(String),

    /// A sealed deed no longer matches its content hash.
    #[error("deed {id} failed integrity check: {reason}")]
    Tampered { id: Uuid, reason: String },

    /// A ledger line did not parse as a deed event.
    #[error("invalid deed at line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize deed {id}: {source}")]
    Serialize {
        id: Uuid,
        #[source]
        source: serde_json::Error,
    },

    #[error("ledger read error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("ledger io on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
