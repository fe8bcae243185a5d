// crates/vouch-reputation/src/decay.rs
//
// Time-decay functions for attestation weights.
//
// Old attestations count for less so that reputation reflects recent
// conduct. Decay is a multiplier the caller applies to an attestation's
// weight before propagation; the propagator never sees ages.

use serde::{Deserialize, Serialize};

/// Default half-life for attestation decay: one year.
pub const DEFAULT_HALF_LIFE_DAYS: f64 = 365.0;

/// Exponential decay multiplier for an attestation `age_days` old.
///
/// `exp(-age * ln 2 / half_life)`: exactly 1.0 at age 0, 0.5 at one
/// half-life, approaching but never reaching 0.
///
/// Negative or NaN ages count as 0. A non-positive or NaN half-life decays
/// instantly: 1.0 at age 0, 0.0 for any positive age.
pub fn time_decay(age_days: f64, half_life_days: f64) -> f64 {
    let age = if age_days.is_nan() { 0.0 } else { age_days.max(0.0) };
    if half_life_days.is_nan() || half_life_days <= 0.0 {
        return if age == 0.0 { 1.0 } else { 0.0 };
    }
    (-age * std::f64::consts::LN_2 / half_life_days).exp()
}

/// Half-life decay policy carried in pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayPolicy {
    /// Days for an attestation's weight to halve.
    pub half_life_days: f64,
}

impl DecayPolicy {
    pub fn new(half_life_days: f64) -> Self {
        Self { half_life_days }
    }

    /// Decay multiplier for an attestation of the given age.
    pub fn factor(&self, age_days: f64) -> f64 {
        time_decay(age_days, self.half_life_days)
    }

    /// Apply decay to a weight.
    pub fn apply(&self, weight: f64, age_days: f64) -> f64 {
        weight * self.factor(age_days)
    }
}

impl Default for DecayPolicy {
    fn default() -> Self {
        Self {
            half_life_days: DEFAULT_HALF_LIFE_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exponential_decay_zero() {
        assert_eq!(time_decay(0.0, DEFAULT_HALF_LIFE_DAYS), 1.0);
        assert_eq!(time_decay(0.0, 7.0), 1.0);
    }

    #[test]
    fn test_exponential_decay_half_life() {
        let result = time_decay(365.0, 365.0);
        assert!((result - 0.5).abs() / 0.5 < 0.01);
        assert!((result - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_older_attestations_weigh_less() {
        let recent = time_decay(0.0, 365.0);
        let one_year = time_decay(365.0, 365.0);
        let two_years = time_decay(730.0, 365.0);
        assert!(one_year < recent);
        assert!(two_years < one_year);
        assert!((two_years - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_negative_age_counts_as_new() {
        assert_eq!(time_decay(-30.0, 365.0), 1.0);
        assert_eq!(time_decay(f64::NAN, 365.0), 1.0);
    }

    #[test]
    fn test_zero_half_life_decays_instantly() {
        assert_eq!(time_decay(0.0, 0.0), 1.0);
        assert_eq!(time_decay(1.0, 0.0), 0.0);
        assert_eq!(time_decay(1.0, -5.0), 0.0);
    }

    #[test]
    fn test_policy_scales_weight() {
        let policy = DecayPolicy::new(10.0);
        assert!((policy.apply(4.0, 10.0) - 2.0).abs() < 1e-12);
        assert_eq!(DecayPolicy::default().half_life_days, 365.0);
    }

    proptest! {
        #[test]
        fn decay_strictly_decreasing(a in 0.0f64..1000.0, b in 0.0f64..1000.0, h in 100.0f64..3650.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assume!(hi - lo > 1e-6);
            prop_assert!(time_decay(hi, h) < time_decay(lo, h));
        }

        #[test]
        fn decay_bounded(age in 0.0f64..1e6, h in 1e-3f64..1e4) {
            let d = time_decay(age, h);
            prop_assert!((0.0..=1.0).contains(&d));
        }
    }
}
