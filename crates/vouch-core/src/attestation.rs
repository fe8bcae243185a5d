// crates/vouch-core/src/attestation.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identity handle (a username in the registration layer).
pub type Identity = String;

/// Per-identity reputation score. Every value is >= 0.
pub type ReputationVector = BTreeMap<Identity, f64>;

/// Per-identity cluster discount. Every value is in [0, 1].
pub type DiscountFactors = BTreeMap<Identity, f64>;

/// A single edge of the attestation graph as the engine consumes it.
///
/// `value` is the signed endorsement (positive) or demerit (negative).
/// `weight` is the caller-computed, non-negative scalar derived from the
/// attester's reputation, cluster discount, and age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attestation {
    pub from: Identity,
    pub to: Identity,
    pub value: f64,
    pub weight: f64,
}

impl Attestation {
    /// Create a new attestation edge.
    pub fn new(from: impl Into<Identity>, to: impl Into<Identity>, value: f64, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            value,
            weight,
        }
    }

    /// True if the attester vouches for itself.
    pub fn is_self_attestation(&self) -> bool {
        self.from == self.to
    }
}

/// An attestation row as held by the persistence layer.
///
/// Records carry no weight: the weight depends on the attester's reputation
/// at scoring time and is refreshed on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestationRecord {
    /// Store-assigned record ID.
    pub id: u64,
    /// Attester.
    pub from: Identity,
    /// Subject of the attestation.
    pub to: Identity,
    /// Signed endorsement value.
    pub value: i64,
    /// Free-text context supplied by the attester.
    #[serde(default)]
    pub context: String,
    /// When the attestation was created.
    pub timestamp: DateTime<Utc>,
}

impl AttestationRecord {
    /// Age of the record in fractional days at `now`.
    ///
    /// Records timestamped in the future are treated as brand new.
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        let seconds = (now - self.timestamp).num_milliseconds() as f64 / 1000.0;
        (seconds / 86_400.0).max(0.0)
    }

    /// Convert into an engine edge with the given weight.
    pub fn to_attestation(&self, weight: f64) -> Attestation {
        Attestation {
            from: self.from.clone(),
            to: self.to.clone(),
            value: self.value as f64,
            weight,
        }
    }
}
