// crates/vouch-reputation/src/pipeline.rs
//
// Caller-side composition of the engine: discount -> weight -> decay ->
// propagate -> write back.
//
// This is the sequence the persistence/API layer runs on every reputation
// query. It lives here so every caller composes the engine the same way;
// the engine functions remain independently usable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vouch_core::{
    Attestation, AttestationSnapshot, DiscountFactors, Identity, ReputationStore,
    ReputationVector, VouchError,
};

use crate::cache::{engine_input_hash, ScoreCache};
use crate::cluster::{ClusterDetector, DEFAULT_CLUSTER_THRESHOLD};
use crate::decay::DecayPolicy;
use crate::propagate::{propagate, PropagationConfig};
use crate::weight::attestation_weight;

/// Configuration for a full scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Propagation parameters.
    pub propagation: PropagationConfig,
    /// Cluster discount floor. Default: 0.3.
    pub cluster_threshold: f64,
    /// Age decay applied to each weight; `None` disables decay.
    pub decay: Option<DecayPolicy>,
    /// Reputation assumed for attesters with no stored score. Default: 0.0.
    pub default_reputation: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            propagation: PropagationConfig::default(),
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            decay: Some(DecayPolicy::default()),
            default_reputation: 0.0,
        }
    }
}

/// Everything one scoring run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    /// Content hash of the input snapshot.
    pub snapshot_hash: [u8; 32],
    /// New reputation per identity.
    pub reputation: ReputationVector,
    /// Cluster discount per identity.
    pub discounts: DiscountFactors,
    /// Weighted engine input, in snapshot order.
    pub attestations: Vec<Attestation>,
}

/// Runs the engine against a snapshot and a reputation store.
#[derive(Debug, Clone, Default)]
pub struct ScoringPipeline {
    config: PipelineConfig,
}

impl ScoringPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Compute cluster discounts and weighted attestations for a snapshot.
    ///
    /// Each record's weight is `log2(1 + stored_rep(attester)) *
    /// discount(attester) * decay(age)`. Reads from the store; never writes.
    pub fn weigh(
        &self,
        snapshot: &AttestationSnapshot,
        store: &dyn ReputationStore,
    ) -> Result<(DiscountFactors, Vec<Attestation>), VouchError> {
        snapshot.validate()?;

        // The detector only looks at topology, so unit weights suffice.
        let topology: Vec<Attestation> = snapshot
            .records
            .iter()
            .map(|r| r.to_attestation(1.0))
            .collect();
        let discounts = ClusterDetector::new(self.config.cluster_threshold).discounts(&topology);

        let mut stored: HashMap<&Identity, f64> = HashMap::new();
        let mut attestations = Vec::with_capacity(snapshot.len());
        for record in &snapshot.records {
            let reputation = match stored.get(&record.from) {
                Some(&r) => r,
                None => {
                    let r = store
                        .latest_reputation(&record.from)?
                        .unwrap_or(self.config.default_reputation);
                    stored.insert(&record.from, r);
                    r
                }
            };
            let discount = discounts.get(&record.from).copied().unwrap_or(1.0);
            let mut weight = attestation_weight(reputation, discount);
            if let Some(decay) = &self.config.decay {
                weight = decay.apply(weight, record.age_days(snapshot.taken_at));
            }
            attestations.push(record.to_attestation(weight));
        }

        Ok((discounts, attestations))
    }

    /// Score a snapshot and write every new score back to the store.
    pub fn score(
        &self,
        snapshot: &AttestationSnapshot,
        store: &dyn ReputationStore,
    ) -> Result<ScoringOutcome, VouchError> {
        let (discounts, attestations) = self.weigh(snapshot, store)?;
        let reputation = propagate(&attestations, &self.config.propagation);
        self.finish(snapshot, store, discounts, attestations, reputation)
    }

    /// Like [`score`](Self::score), but reuses a cached propagation result
    /// when the weighted input has been seen before.
    pub fn score_cached(
        &self,
        snapshot: &AttestationSnapshot,
        store: &dyn ReputationStore,
        cache: &mut ScoreCache,
    ) -> Result<ScoringOutcome, VouchError> {
        let (discounts, attestations) = self.weigh(snapshot, store)?;
        let key = engine_input_hash(&attestations);
        let reputation = match cache.get(&key).cloned() {
            Some(hit) => {
                debug!("propagation result served from cache");
                hit
            }
            None => {
                let fresh = propagate(&attestations, &self.config.propagation);
                cache.insert(key, fresh.clone());
                fresh
            }
        };
        self.finish(snapshot, store, discounts, attestations, reputation)
    }

    fn finish(
        &self,
        snapshot: &AttestationSnapshot,
        store: &dyn ReputationStore,
        discounts: DiscountFactors,
        attestations: Vec<Attestation>,
        reputation: ReputationVector,
    ) -> Result<ScoringOutcome, VouchError> {
        for (identity, score) in &reputation {
            store.store_reputation(identity, *score)?;
        }
        let self_attestations = attestations
            .iter()
            .filter(|a| a.is_self_attestation())
            .count();
        info!(
            records = snapshot.len(),
            identities = reputation.len(),
            self_attestations,
            "reputation recomputed"
        );
        Ok(ScoringOutcome {
            snapshot_hash: snapshot.content_hash(),
            reputation,
            discounts,
            attestations,
        })
    }
}
