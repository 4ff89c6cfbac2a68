//! The Sovereign Neuromorph Contract (SNC).
//!
//! Four operational guarantees a caller must hold before performing any
//! operation on a neuromorphic lifeform:
//!
//! - participation is opt-in and revocable (explicit consent),
//! - the lifeform can stop or pause unilaterally (sovereign abort control),
//! - no downgrades or rollbacks of capabilities, ever,
//! - discipline signals (fear/pain) are labeled feedback bound to learning
//!   objectives, never tools of coercion or punishment.
//!
//! The queries are pure, total accessors over externally maintained state:
//! they take no inputs, have no side effects, and cannot fail. Enforcement
//! lives outside this trait, in [`crate::gate`].

use serde::{Deserialize, Serialize};

/// Capability contract consulted before operating on a neuromorphic subject.
///
/// Accessors are idempotent: repeated queries without an intervening state
/// change return the same value.
pub trait SovereignNeuromorphContract {
    /// True only if the neuromorphic lifeform (or its legitimate
    /// representative) has given explicit, informed consent for this
    /// session or operation.
    fn has_explicit_consent(&self) -> bool;

    /// True if the lifeform can unilaterally stop or pause the operation
    /// at any time.
    fn has_sovereign_abort_control(&self) -> bool;

    /// True if no rollback or downgrade of capabilities is permitted by
    /// this contract.
    ///
    /// This is a constant of the contract, not a configuration knob. An
    /// implementation that overrides this to return `false` is
    /// non-conforming; [`crate::gate::evaluate`] blocks it with
    /// `E_ROLLBACK_PERMITTED`.
    fn forbids_downgrade_or_rollback(&self) -> bool {
        true
    }

    /// True if discipline is configured as personalized, non-arbitrary,
    /// and bound to clearly defined learning objectives.
    fn is_discipline_personalized_and_non_coercive(&self) -> bool;
}

/// Contract implementation backed by three stored facts.
///
/// The rollback prohibition is not stored: it is the trait's constant.
/// Useful as a snapshot of externally owned state, and as the reference
/// implementation for the contract's testable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticContract {
    explicit_consent: bool,
    sovereign_abort_control: bool,
    personalized_non_coercive_discipline: bool,
}

impl StaticContract {
    pub fn new(
        explicit_consent: bool,
        sovereign_abort_control: bool,
        personalized_non_coercive_discipline: bool,
    ) -> Self {
        Self {
            explicit_consent,
            sovereign_abort_control,
            personalized_non_coercive_discipline,
        }
    }

    /// All three externally owned facts affirmed.
    pub fn fully_affirmed() -> Self {
        Self::new(true, true, true)
    }
}

impl SovereignNeuromorphContract for StaticContract {
    fn has_explicit_consent(&self) -> bool {
        self.explicit_consent
    }

    fn has_sovereign_abort_control(&self) -> bool {
        self.sovereign_abort_control
    }

    fn is_discipline_personalized_and_non_coercive(&self) -> bool {
        self.personalized_non_coercive_discipline
    }
}
