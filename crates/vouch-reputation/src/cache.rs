// crates/vouch-reputation/src/cache.rs
//
// Optional result cache owned by the caller.
//
// Propagation output depends only on the weighted attestation list, so the
// cache is keyed by a hash of that list. The engine functions never consult
// a cache on their own.

use std::num::NonZeroUsize;

use lru::LruCache;

use vouch_core::crypto::hash_bytes;
use vouch_core::{Attestation, ReputationVector};

/// Order-independent SHA-256 of a weighted attestation list.
pub fn engine_input_hash(attestations: &[Attestation]) -> [u8; 32] {
    let mut rows: Vec<&Attestation> = attestations.iter().collect();
    rows.sort_by(|a, b| {
        a.from
            .cmp(&b.from)
            .then_with(|| a.to.cmp(&b.to))
            .then_with(|| a.value.total_cmp(&b.value))
            .then_with(|| a.weight.total_cmp(&b.weight))
    });

    let mut buf = Vec::new();
    for a in rows {
        buf.extend_from_slice(&(a.from.len() as u64).to_le_bytes());
        buf.extend_from_slice(a.from.as_bytes());
        buf.extend_from_slice(&(a.to.len() as u64).to_le_bytes());
        buf.extend_from_slice(a.to.as_bytes());
        buf.extend_from_slice(&a.value.to_bits().to_le_bytes());
        buf.extend_from_slice(&a.weight.to_bits().to_le_bytes());
    }
    hash_bytes(&buf)
}

/// Least-recently-used cache of reputation vectors, with hit/miss counts.
pub struct ScoreCache {
    entries: LruCache<[u8; 32], ReputationVector>,
    hits: u64,
    misses: u64,
}

impl std::fmt::Debug for ScoreCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreCache")
            .field("capacity", &self.entries.cap())
            .field("cached", &self.entries.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

impl ScoreCache {
    /// Create a cache holding at most `capacity` results (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a cached result, recording a hit or miss. A hit marks the
    /// entry as most recently used.
    pub fn get(&mut self, key: &[u8; 32]) -> Option<&ReputationVector> {
        match self.entries.get(key) {
            Some(scores) => {
                self.hits += 1;
                Some(scores)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a result, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: [u8; 32], scores: ReputationVector) {
        self.entries.put(key, scores);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
