//! Precondition gate over the contract.
//!
//! The contract only answers questions; this module asks them. Every
//! operation on a neuromorphic subject goes through [`evaluate`] (or the
//! [`OperationGate`] wrapper) first, and runs only on an allowed verdict.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::SovereignNeuromorphContract;
use crate::errors::ContractError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Allowed,
    Blocked,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub reason_code: String, // e.g., "OK", "E_CONSENT_MISSING", "E_ROLLBACK_PERMITTED"
    pub details: Value,      // JSON details: failed predicate, message
}

/// Evaluates the four contract queries in order. The first failed query
/// decides the verdict; later queries are not consulted.
///
/// Order: consent, abort control, discipline, rollback prohibition.
/// The last check only fires on a non-conforming implementation that
/// overrides the rollback constant.
pub fn evaluate<C: SovereignNeuromorphContract + ?Sized>(contract: &C) -> Verdict {
    if !contract.has_explicit_consent() {
        return blocked(
            "E_CONSENT_MISSING",
            "has_explicit_consent",
            "no explicit consent on record for this session or operation",
        );
    }
    if !contract.has_sovereign_abort_control() {
        return blocked(
            "E_ABORT_CONTROL_MISSING",
            "has_sovereign_abort_control",
            "subject cannot unilaterally stop or pause the operation",
        );
    }
    if !contract.is_discipline_personalized_and_non_coercive() {
        return blocked(
            "E_DISCIPLINE_COERCIVE",
            "is_discipline_personalized_and_non_coercive",
            "discipline is not personalized and bound to learning objectives",
        );
    }
    if !contract.forbids_downgrade_or_rollback() {
        return blocked(
            "E_ROLLBACK_PERMITTED",
            "forbids_downgrade_or_rollback",
            "contract implementation permits rollback; implementation is non-conforming",
        );
    }

    tracing::debug!(reason_code = "OK", "all contract queries affirmed");
    Verdict {
        status: VerdictStatus::Allowed,
        reason_code: "OK".to_string(),
        details: serde_json::json!({}),
    }
}

fn blocked(reason_code: &str, predicate: &str, message: &str) -> Verdict {
    tracing::warn!(reason_code, predicate, "operation blocked");
    Verdict {
        status: VerdictStatus::Blocked,
        reason_code: reason_code.to_string(),
        details: serde_json::json!({
            "predicate": predicate,
            "message": message
        }),
    }
}

/// Runs closures only when the contract allows it.
pub struct OperationGate<'a, C: SovereignNeuromorphContract + ?Sized> {
    contract: &'a C,
}

impl<'a, C: SovereignNeuromorphContract + ?Sized> OperationGate<'a, C> {
    pub fn new(contract: &'a C) -> Self {
        Self { contract }
    }

    /// Re-evaluates the contract and errors on a blocked verdict.
    pub fn check(&self) -> Result<(), ContractError> {
        let verdict = evaluate(self.contract);
        match verdict.status {
            VerdictStatus::Allowed => Ok(()),
            VerdictStatus::Blocked => {
                let message = verdict
                    .details
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("contract query failed")
                    .to_string();
                Err(ContractError::Violation {
                    code: verdict.reason_code,
                    message,
                })
            }
        }
    }

    /// Checks the contract, then runs `op`. The closure never executes
    /// on a blocked verdict.
    pub fn run<R>(&self, op: impl FnOnce() -> R) -> Result<R, ContractError> {
        self.check()?;
        Ok(op())
    }
}
