// crates/vouch-core/src/snapshot.rs
//
// Immutable attestation snapshot handed to one scoring run.
//
// The caller assembles the full, consistent set of stored attestations
// (read transaction, lock, or copy) before building a snapshot. The engine
// never reads the store itself.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attestation::{AttestationRecord, Identity};
use crate::crypto::hash_bytes;
use crate::error::VouchError;

/// A complete, point-in-time view of every stored attestation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestationSnapshot {
    /// Reference time used to age records.
    pub taken_at: DateTime<Utc>,
    /// All attestation rows, in store order.
    pub records: Vec<AttestationRecord>,
}

impl AttestationSnapshot {
    /// Create a snapshot taken now.
    pub fn new(records: Vec<AttestationRecord>) -> Self {
        Self {
            taken_at: Utc::now(),
            records,
        }
    }

    /// Create a snapshot with an explicit reference time.
    pub fn at(taken_at: DateTime<Utc>, records: Vec<AttestationRecord>) -> Self {
        Self { taken_at, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Boundary shape validation.
    ///
    /// Rejects empty identities and duplicate record IDs. Self-attestations
    /// and repeated (from, to) pairs are legal and pass through.
    pub fn validate(&self) -> Result<(), VouchError> {
        let mut seen_ids = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if record.from.trim().is_empty() {
                return Err(VouchError::InvalidRecord(format!(
                    "record {} has an empty attester",
                    record.id
                )));
            }
            if record.to.trim().is_empty() {
                return Err(VouchError::InvalidRecord(format!(
                    "record {} has an empty subject",
                    record.id
                )));
            }
            if !seen_ids.insert(record.id) {
                return Err(VouchError::InvalidRecord(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
        }
        Ok(())
    }

    /// Sorted, deduplicated identity universe of this snapshot.
    pub fn identities(&self) -> Vec<Identity> {
        let set: BTreeSet<&Identity> = self
            .records
            .iter()
            .flat_map(|r| [&r.from, &r.to])
            .collect();
        set.into_iter().cloned().collect()
    }

    /// SHA-256 over the records in ID order.
    ///
    /// Independent of store order and of `taken_at`, so two snapshots of the
    /// same attestation set share a hash and may share a cached result.
    pub fn content_hash(&self) -> [u8; 32] {
        let mut sorted: Vec<&AttestationRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| r.id);

        let mut buf = Vec::new();
        for r in sorted {
            buf.extend_from_slice(&r.id.to_le_bytes());
            push_str(&mut buf, &r.from);
            push_str(&mut buf, &r.to);
            buf.extend_from_slice(&r.value.to_le_bytes());
            push_str(&mut buf, &r.context);
            buf.extend_from_slice(&r.timestamp.timestamp_millis().to_le_bytes());
        }
        hash_bytes(&buf)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, VouchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot as pretty JSON.
    pub fn to_json(&self) -> Result<String, VouchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// Length-prefixed so ("ab", "c") and ("a", "bc") encode differently.
fn push_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}
