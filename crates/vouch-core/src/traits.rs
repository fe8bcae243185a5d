// crates/vouch-core/src/traits.rs

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::attestation::{Identity, ReputationVector};
use crate::error::VouchError;

/// Trait for the persistence layer that owns stored reputation scores.
///
/// The scoring pipeline reads each attester's latest score through this
/// trait to refresh attestation weights, then writes the new scores back.
/// The engine functions themselves never touch a store.
pub trait ReputationStore: Send + Sync {
    /// Latest stored reputation for an identity, if any.
    fn latest_reputation(&self, identity: &Identity) -> Result<Option<f64>, VouchError>;

    /// Overwrite the stored reputation for an identity.
    fn store_reputation(&self, identity: &Identity, score: f64) -> Result<(), VouchError>;
}

/// Map-backed store for tests and one-shot CLI runs. Never fails.
#[derive(Debug, Default)]
pub struct InMemoryReputationStore {
    scores: RwLock<BTreeMap<Identity, f64>>,
}

impl InMemoryReputationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with scores.
    pub fn with_scores(scores: ReputationVector) -> Self {
        Self {
            scores: RwLock::new(scores),
        }
    }

    /// Copy of every stored score.
    pub fn snapshot(&self) -> ReputationVector {
        self.scores.read().clone()
    }
}

impl ReputationStore for InMemoryReputationStore {
    fn latest_reputation(&self, identity: &Identity) -> Result<Option<f64>, VouchError> {
        Ok(self.scores.read().get(identity).copied())
    }

    fn store_reputation(&self, identity: &Identity, score: f64) -> Result<(), VouchError> {
        self.scores.write().insert(identity.clone(), score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identity_reads_none() {
        let store = InMemoryReputationStore::new();
        assert_eq!(store.latest_reputation(&"ghost".to_string()).unwrap(), None);
    }

    #[test]
    fn store_then_read_back() {
        let store = InMemoryReputationStore::new();
        let alice = "alice".to_string();
        store.store_reputation(&alice, 2.5).unwrap();
        store.store_reputation(&alice, 3.0).unwrap();
        assert_eq!(store.latest_reputation(&alice).unwrap(), Some(3.0));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn concurrent_writers_all_land() {
        let store = std::sync::Arc::new(InMemoryReputationStore::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.store_reputation(&format!("id{}", i), i as f64).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let scores = store.snapshot();
        assert_eq!(scores.len(), 4);
        assert_eq!(scores["id3"], 3.0);
    }
}
