// crates/vouch-reputation/src/cluster.rs
//
// Isolated-cluster detection for Sybil resistance.
//
// A ring of colluding identities that only vouch for each other has few
// second-degree neighbors outside the ring. Each identity's discount is
// the fraction of the rest of the network reachable in exactly two
// outgoing hops, lifted by a floor `threshold` and capped at 1.0.
//
// Neighborhoods follow outgoing edges only. Attestations an identity
// receives do not widen its neighborhood.

use std::collections::BTreeSet;

use tracing::debug;
use vouch_core::{Attestation, DiscountFactors};

use crate::graph::AttestationGraph;

/// Default discount floor for isolated identities.
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.3;

/// Computes per-identity cluster discounts with a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterDetector {
    threshold: f64,
}

impl ClusterDetector {
    /// Create a detector. The threshold is clamped to [0, 1]; NaN becomes 0.
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Discounts for every identity in the attestation list.
    pub fn discounts(&self, attestations: &[Attestation]) -> DiscountFactors {
        let graph = AttestationGraph::build(attestations);
        self.discounts_for_graph(&graph)
    }

    /// Discounts for every identity in a prebuilt graph.
    pub fn discounts_for_graph(&self, graph: &AttestationGraph) -> DiscountFactors {
        match graph.len() {
            0 => DiscountFactors::new(),
            1 => graph
                .identities()
                .iter()
                .map(|id| (id.clone(), 1.0))
                .collect(),
            _ => {
                let discounts: DiscountFactors = graph
                    .identities()
                    .iter()
                    .enumerate()
                    .map(|(idx, id)| {
                        let discount = (self.threshold + connectivity(graph, idx)).min(1.0);
                        (id.clone(), discount)
                    })
                    .collect();
                let penalized = discounts.values().filter(|&&d| d < 1.0).count();
                debug!(
                    identities = graph.len(),
                    penalized,
                    threshold = self.threshold,
                    "cluster discounts computed"
                );
                discounts
            }
        }
    }
}

impl Default for ClusterDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CLUSTER_THRESHOLD)
    }
}

/// Fraction of the identities outside node `idx`'s direct neighborhood
/// that are reachable in two outgoing hops.
///
/// The denominator counts every identity except `idx` and its direct
/// targets (a self-edge puts `idx` among its own targets and is counted
/// once more). When nothing is left to reach, connectivity is 1.0.
pub fn connectivity(graph: &AttestationGraph, idx: usize) -> f64 {
    let immediate = graph.neighbors(idx);

    let mut extended: BTreeSet<usize> = immediate
        .iter()
        .flat_map(|&n| graph.outgoing(n).iter().copied())
        .collect();
    extended.retain(|n| !immediate.contains(n));
    extended.remove(&idx);

    let total = graph.len() as i64 - immediate.len() as i64 - 1;
    if total <= 0 {
        1.0
    } else {
        extended.len() as f64 / total as f64
    }
}

/// Discount factor in [0, 1] for every identity in `attestations`.
///
/// Empty input gives an empty map; a single-identity graph gives that
/// identity a discount of 1.0.
pub fn detect_isolated_clusters(attestations: &[Attestation], threshold: f64) -> DiscountFactors {
    ClusterDetector::new(threshold).discounts(attestations)
}
