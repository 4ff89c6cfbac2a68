//! Emergency reversal adjudication.
//!
//! The contract forbids downgrades and rollbacks unconditionally. What
//! this module adjudicates is the *petition* around that prohibition:
//! who asked, under which conditions, and why the answer is (almost
//! always) no. Denials are first-class outcomes with their own reasons
//! so the audit trail stays meaningful. A granted emergency petition
//! never changes what the contract answers; it is only ever recorded.

use serde::{Deserialize, Serialize};

/// Parties that can co-sign a reversal petition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Host,
    OrganicCpuOwner,
    Regulator,
    SovereignKernel,
}

/// The set of signatures attached to a petition.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RoleSet {
    pub roles: Vec<Role>,
    pub regulator_quorum_threshold: usize,
}

impl RoleSet {
    /// Full sovereign quorum: host, owner, kernel, and at least
    /// `regulator_quorum_threshold` regulators.
    pub fn sovereign_quorum_satisfied(&self) -> bool {
        self.roles.contains(&Role::Host)
            && self.roles.contains(&Role::OrganicCpuOwner)
            && self.roles.contains(&Role::SovereignKernel)
            && self
                .roles
                .iter()
                .filter(|&r| *r == Role::Regulator)
                .count()
                >= self.regulator_quorum_threshold
    }

    pub fn has_owner_signature(&self) -> bool {
        self.roles.contains(&Role::OrganicCpuOwner)
    }
}

/// Measured conditions a petition is argued under.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReversalConditions {
    /// Risk-of-harm estimate, 0..1.
    pub roh: f64,
    /// Substrate decay estimate, 0..1.
    pub decay: f64,
    pub life_harm_flag: bool,
    pub explicit_reversal_order: bool,
    pub mitigations_exhausted: bool,
}

impl ReversalConditions {
    /// Reversal is only arguable when mitigations are exhausted and both
    /// risk and decay sit past their emergency thresholds.
    pub fn no_safer_alternative(&self) -> bool {
        self.mitigations_exhausted && self.roh > 0.3 && self.decay > 0.8
    }
}

/// Outcome of adjudicating a petition. Exactly one granting reason
/// exists; every denial names the first check that failed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    GrantedEmergency,
    DeniedLifeHarmFlag,
    DeniedQuorumUnsatisfied,
    DeniedOwnerNotSigned,
    DeniedNoSaferAlternativeNotProved,
}

impl DecisionReason {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::GrantedEmergency)
    }
}

pub struct ReversalGate;

impl ReversalGate {
    /// Checks run most-protective first; the order is part of the
    /// adjudication contract. A life-harm flag denies before any quorum
    /// arithmetic is consulted.
    pub fn evaluate(role_set: &RoleSet, cond: &ReversalConditions) -> DecisionReason {
        let reason = if cond.life_harm_flag {
            DecisionReason::DeniedLifeHarmFlag
        } else if !role_set.sovereign_quorum_satisfied() {
            DecisionReason::DeniedQuorumUnsatisfied
        } else if !role_set.has_owner_signature() || !cond.explicit_reversal_order {
            DecisionReason::DeniedOwnerNotSigned
        } else if !cond.no_safer_alternative() {
            DecisionReason::DeniedNoSaferAlternativeNotProved
        } else {
            DecisionReason::GrantedEmergency
        };
        tracing::debug!(?reason, "reversal petition adjudicated");
        reason
    }
}

/// MP-token compensation owed to the petitioner on a denial, capped at
/// one token per petition.
pub fn compensation_for_denial(mp_debt: f64) -> f64 {
    if mp_debt <= 0.0 {
        0.0
    } else {
        mp_debt.min(1.0)
    }
}

/// Operating-envelope snapshot used to argue mitigation instead of
/// reversal. All axes normalized 0..1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvelopeSnapshot {
    pub roh: f64,
    pub decay: f64,
    pub lifeforce: f64,
    pub power: f64,
    pub tech: f64,
    pub nano: f64,
    pub smart: f64,
}

/// Non-reversal interventions available before a petition may claim
/// mitigations are exhausted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mitigation {
    TightenEnvelopes,
    PauseOperations,
    InduceRest,
    Custom(String),
}

/// Projects the envelope forward under the given mitigations and reports
/// whether a safer non-reversal path exists.
///
/// Envelope boosts only kick in on substrates with high nano and smart
/// axes; otherwise the projection is returned unjudged as unsafe.
pub fn reproject_without_reversal(
    snapshot: &EnvelopeSnapshot,
    mitigations: &[Mitigation],
) -> (EnvelopeSnapshot, bool) {
    let mut projected = snapshot.clone();

    for mitigation in mitigations {
        match mitigation {
            Mitigation::TightenEnvelopes => {
                projected.roh *= 0.8;
            }
            Mitigation::PauseOperations => {
                projected.decay -= 0.1;
            }
            Mitigation::InduceRest => {
                projected.lifeforce += 0.15;
            }
            Mitigation::Custom(_) => {}
        }
    }

    if projected.nano > 0.7 && projected.smart > 0.8 {
        if projected.power < 0.9 {
            projected.power = 0.9;
        }
        if projected.tech < 0.9 {
            projected.tech = 0.9;
        }
        // The emergency zone needs roh past 0.3 as well as decay past
        // 0.8, so risk back under threshold already clears it.
        let safer = projected.roh <= 0.3;
        (projected, safer)
    } else {
        (projected, false)
    }
}

/// A complete petition as submitted for adjudication.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReversalPetition {
    pub actor: String,
    pub roles: RoleSet,
    pub conditions: ReversalConditions,
    #[serde(default)]
    pub mp_debt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_quorum() -> RoleSet {
        RoleSet {
            roles: vec![
                Role::Host,
                Role::OrganicCpuOwner,
                Role::SovereignKernel,
                Role::Regulator,
                Role::Regulator,
            ],
            regulator_quorum_threshold: 2,
        }
    }

    fn emergency_conditions() -> ReversalConditions {
        ReversalConditions {
            roh: 0.5,
            decay: 0.9,
            life_harm_flag: false,
            explicit_reversal_order: true,
            mitigations_exhausted: true,
        }
    }

    #[test]
    fn quorum_requires_all_three_parties_and_regulators() {
        let mut set = full_quorum();
        assert!(set.sovereign_quorum_satisfied());

        set.roles.retain(|r| *r != Role::SovereignKernel);
        assert!(!set.sovereign_quorum_satisfied());

        let thin = RoleSet {
            roles: vec![
                Role::Host,
                Role::OrganicCpuOwner,
                Role::SovereignKernel,
                Role::Regulator,
            ],
            regulator_quorum_threshold: 2,
        };
        assert!(!thin.sovereign_quorum_satisfied());
    }

    #[test]
    fn life_harm_flag_denies_before_anything_else() {
        let mut cond = emergency_conditions();
        cond.life_harm_flag = true;
        // Even a full quorum with an explicit order is denied.
        assert_eq!(
            ReversalGate::evaluate(&full_quorum(), &cond),
            DecisionReason::DeniedLifeHarmFlag
        );
    }

    #[test]
    fn missing_quorum_denies() {
        let set = RoleSet {
            roles: vec![Role::Host],
            regulator_quorum_threshold: 1,
        };
        assert_eq!(
            ReversalGate::evaluate(&set, &emergency_conditions()),
            DecisionReason::DeniedQuorumUnsatisfied
        );
    }

    #[test]
    fn missing_explicit_order_reads_as_unsigned() {
        let mut cond = emergency_conditions();
        cond.explicit_reversal_order = false;
        assert_eq!(
            ReversalGate::evaluate(&full_quorum(), &cond),
            DecisionReason::DeniedOwnerNotSigned
        );
    }

    #[test]
    fn unexhausted_mitigations_deny_no_safer_alternative() {
        let mut cond = emergency_conditions();
        cond.mitigations_exhausted = false;
        assert_eq!(
            ReversalGate::evaluate(&full_quorum(), &cond),
            DecisionReason::DeniedNoSaferAlternativeNotProved
        );
    }

    #[test]
    fn emergency_grant_requires_every_check_to_pass() {
        let reason = ReversalGate::evaluate(&full_quorum(), &emergency_conditions());
        assert_eq!(reason, DecisionReason::GrantedEmergency);
        assert!(reason.is_granted());
    }

    #[test]
    fn denial_compensation_is_clamped_to_one_token() {
        assert_eq!(compensation_for_denial(-2.0), 0.0);
        assert_eq!(compensation_for_denial(0.0), 0.0);
        assert_eq!(compensation_for_denial(0.4), 0.4);
        assert_eq!(compensation_for_denial(7.5), 1.0);
    }

    #[test]
    fn mitigations_adjust_their_own_axes() {
        let snapshot = EnvelopeSnapshot {
            roh: 0.5,
            decay: 0.9,
            lifeforce: 0.4,
            power: 0.5,
            tech: 0.5,
            nano: 0.8,
            smart: 0.9,
        };
        let (projected, _) = reproject_without_reversal(
            &snapshot,
            &[
                Mitigation::TightenEnvelopes,
                Mitigation::PauseOperations,
                Mitigation::InduceRest,
                Mitigation::Custom("prayer".into()),
            ],
        );
        assert!((projected.roh - 0.4).abs() < 1e-9);
        assert!((projected.decay - 0.8).abs() < 1e-9);
        assert!((projected.lifeforce - 0.55).abs() < 1e-9);
    }

    #[test]
    fn reprojection_finds_safer_path_when_risk_drops_enough() {
        let snapshot = EnvelopeSnapshot {
            roh: 0.35,
            decay: 0.7,
            lifeforce: 0.4,
            power: 0.5,
            tech: 0.5,
            nano: 0.8,
            smart: 0.9,
        };
        let (projected, safer) =
            reproject_without_reversal(&snapshot, &[Mitigation::TightenEnvelopes]);
        assert!(safer);
        assert!(projected.roh <= 0.3);
        assert!(projected.power >= 0.9);
        assert!(projected.tech >= 0.9);
    }

    #[test]
    fn low_nano_substrates_are_never_judged_safer() {
        let snapshot = EnvelopeSnapshot {
            roh: 0.1,
            decay: 0.1,
            lifeforce: 0.9,
            power: 0.9,
            tech: 0.9,
            nano: 0.2,
            smart: 0.9,
        };
        let (_, safer) = reproject_without_reversal(&snapshot, &[]);
        assert!(!safer);
    }

    #[test]
    fn petition_parses_from_yaml() {
        let raw = r#"
actor: host-attendant
roles:
  roles: [host, organic_cpu_owner, sovereign_kernel, regulator]
  regulator_quorum_threshold: 1
conditions:
  roh: 0.5
  decay: 0.9
  life_harm_flag: false
  explicit_reversal_order: true
  mitigations_exhausted: true
mp_debt: 0.6
"#;
        let petition: ReversalPetition = serde_yaml::from_str(raw).unwrap();
        assert_eq!(petition.actor, "host-attendant");
        assert!(petition.roles.has_owner_signature());
        assert_eq!(
            ReversalGate::evaluate(&petition.roles, &petition.conditions),
            DecisionReason::GrantedEmergency
        );
        assert_eq!(compensation_for_denial(petition.mp_debt), 0.6);
    }
}
