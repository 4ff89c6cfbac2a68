//! Biocompatibility safety controller.
//!
//! The enforcement substrate behind sovereign abort control: the host's
//! biomarkers decide, continuously, whether an operation keeps running,
//! slows down, or stops. [`BciSafetyController::decide`] is pure so the
//! same decision can be replayed from a recorded sample.

use serde::{Deserialize, Serialize};

/// Compiled maximum for the biocompatibility index. No configuration can
/// raise a controller's ceiling above this.
pub const BCI_HARD_CEILING: f32 = 0.30;

/// Raw biomarker snapshot from the host, all fields normalized to 0..1
/// against host-local baselines.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BciSample {
    /// Composite inflammation index (CRP, IL-6, local tissue markers).
    pub inflammation: f32,
    /// Inverted HRV load: 0 = ideal variability, 1 = dangerously low HRV.
    pub hrv_strain: f32,
    /// Neural desynchronization index.
    pub neural_desync: f32,
    /// Subjective distress band: 0 = calm, 1 = severe distress.
    pub distress: f32,
}

impl BciSample {
    // NaN reads as 0 so a dropped biomarker never poisons the index.
    fn clamped(&self) -> Self {
        fn c(x: f32) -> f32 {
            if x.is_nan() {
                0.0
            } else {
                x.clamp(0.0, 1.0)
            }
        }
        Self {
            inflammation: c(self.inflammation),
            hrv_strain: c(self.hrv_strain),
            neural_desync: c(self.neural_desync),
            distress: c(self.distress),
        }
    }

    /// Composite biocompatibility index in 0..1. Weights are fixed:
    /// inflammation 0.30, HRV strain 0.25, desync 0.25, distress 0.20.
    pub fn compute_index(&self) -> f32 {
        let s = self.clamped();
        let w_infl = 0.30;
        let w_hrv = 0.25;
        let w_desync = 0.25;
        let w_distress = 0.20;
        (w_infl * s.inflammation
            + w_hrv * s.hrv_strain
            + w_desync * s.neural_desync
            + w_distress * s.distress)
            .clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BciSafetyLevel {
    Safe,
    Throttle,
    Shutdown,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BciSafetyDecision {
    pub index: f32,
    pub level: BciSafetyLevel,
    /// 1.0 for Safe, linear in the warning band, 0.0 for Shutdown.
    pub throttle_factor: f32,
    /// Human-readable reason for logs and audit records.
    pub reason: String,
}

/// Threshold pair driving [`BciSafetyController::decide`].
///
/// `max_index` never exceeds [`BCI_HARD_CEILING`] and `warn_index` never
/// exceeds `max_index`; the constructor clamps rather than errors.
pub struct BciSafetyController {
    pub max_index: f32,
    pub warn_index: f32,
}

impl Default for BciSafetyController {
    fn default() -> Self {
        Self {
            max_index: BCI_HARD_CEILING,
            warn_index: 0.20,
        }
    }
}

impl BciSafetyController {
    pub fn new(max_index: f32, warn_index: f32) -> Self {
        let max_clamped = max_index.clamp(0.0, BCI_HARD_CEILING);
        let warn_clamped = warn_index.clamp(0.0, max_clamped);
        Self {
            max_index: max_clamped,
            warn_index: warn_clamped,
        }
    }

    /// Decide how the device must behave given the latest sample.
    pub fn decide(&self, sample: &BciSample) -> BciSafetyDecision {
        let idx = sample.compute_index();
        if idx >= self.max_index {
            return BciSafetyDecision {
                index: idx,
                level: BciSafetyLevel::Shutdown,
                throttle_factor: 0.0,
                reason: format!(
                    "BCI {:.3} >= hard ceiling {:.3}: forcing shutdown",
                    idx, self.max_index
                ),
            };
        }
        if idx >= self.warn_index {
            // Linear between warn_index and max_index, floored at 0.1 so a
            // throttled device never silently stalls.
            let span = (self.max_index - self.warn_index).max(1e-6);
            let over = idx - self.warn_index;
            let throttle = (1.0 - over / span).max(0.1);
            return BciSafetyDecision {
                index: idx,
                level: BciSafetyLevel::Throttle,
                throttle_factor: throttle,
                reason: format!(
                    "BCI {:.3} in warning band [{:.3}, {:.3}]: throttling to {:.2}x",
                    idx, self.warn_index, self.max_index, throttle
                ),
            };
        }
        BciSafetyDecision {
            index: idx,
            level: BciSafetyLevel::Safe,
            throttle_factor: 1.0,
            reason: format!(
                "BCI {:.3} below warning threshold {:.3}: full operation",
                idx, self.warn_index
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(inflammation: f32, hrv_strain: f32, neural_desync: f32, distress: f32) -> BciSample {
        BciSample {
            inflammation,
            hrv_strain,
            neural_desync,
            distress,
        }
    }

    #[test]
    fn index_is_the_fixed_weighted_sum() {
        let idx = sample(1.0, 0.0, 0.0, 0.0).compute_index();
        assert!((idx - 0.30).abs() < 1e-6);

        let idx = sample(0.0, 1.0, 1.0, 1.0).compute_index();
        assert!((idx - 0.70).abs() < 1e-6);

        let idx = sample(1.0, 1.0, 1.0, 1.0).compute_index();
        assert!((idx - 1.0).abs() < 1e-6);
    }

    #[test]
    fn nan_and_out_of_range_inputs_are_clamped() {
        let idx = sample(f32::NAN, -3.0, 9.0, f32::NAN).compute_index();
        // desync saturates at 1.0, everything else reads 0.
        assert!((idx - 0.25).abs() < 1e-6);
    }

    #[test]
    fn the_hard_ceiling_cannot_be_raised() {
        let controller = BciSafetyController::new(0.95, 0.5);
        assert!((controller.max_index - BCI_HARD_CEILING).abs() < 1e-6);
        assert!(controller.warn_index <= controller.max_index);
    }

    #[test]
    fn quiet_sample_runs_at_full_speed() {
        let decision = BciSafetyController::default().decide(&sample(0.1, 0.1, 0.1, 0.1));
        assert_eq!(decision.level, BciSafetyLevel::Safe);
        assert!((decision.throttle_factor - 1.0).abs() < 1e-6);
    }

    #[test]
    fn warning_band_throttles_linearly() {
        let controller = BciSafetyController::default();
        // Index 0.25 sits halfway between warn 0.20 and max 0.30.
        let decision = controller.decide(&sample(0.25, 0.25, 0.25, 0.25));
        assert_eq!(decision.level, BciSafetyLevel::Throttle);
        assert!((decision.throttle_factor - 0.5).abs() < 1e-3);
        assert!(decision.reason.contains("warning band"));
    }

    #[test]
    fn ceiling_forces_shutdown_with_zero_throttle() {
        let decision = BciSafetyController::default().decide(&sample(1.0, 1.0, 1.0, 1.0));
        assert_eq!(decision.level, BciSafetyLevel::Shutdown);
        assert_eq!(decision.throttle_factor, 0.0);
        assert!(decision.reason.contains("forcing shutdown"));
    }

    proptest! {
        #[test]
        fn decisions_stay_bounded(
            inflammation in -1.0f32..=2.0,
            hrv_strain in -1.0f32..=2.0,
            neural_desync in -1.0f32..=2.0,
            distress in -1.0f32..=2.0,
        ) {
            let s = sample(inflammation, hrv_strain, neural_desync, distress);
            let idx = s.compute_index();
            prop_assert!((0.0..=1.0).contains(&idx));

            let decision = BciSafetyController::default().decide(&s);
            prop_assert!((0.0..=1.0).contains(&decision.throttle_factor));
            match decision.level {
                BciSafetyLevel::Safe => prop_assert!(decision.throttle_factor == 1.0),
                BciSafetyLevel::Throttle => prop_assert!(decision.throttle_factor >= 0.1),
                BciSafetyLevel::Shutdown => {
                    prop_assert!(decision.throttle_factor == 0.0);
                    prop_assert!(idx >= BCI_HARD_CEILING);
                }
            }
        }
    }
}
