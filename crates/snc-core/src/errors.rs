//! Error taxonomy for contract evaluation and session handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while gating an operation on the contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// A contract predicate failed; `code` is the machine-readable
    /// reason (`E_*`) carried by the blocking verdict.
    #[error("contract violation [{code}]: {message}")]
    Violation { code: String, message: String },
}

impl ContractError {
    pub fn violation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Violation {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Reason code of the underlying blocked verdict.
    pub fn code(&self) -> &str {
        match self {
            Self::Violation { code, .. } => code,
        }
    }
}

/// Errors loading or storing session state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read session {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse session {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
