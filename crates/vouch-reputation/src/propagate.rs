// crates/vouch-reputation/src/propagate.rs
//
// Damped reputation propagation over the attestation graph.
//
// A PageRank-style power iteration in which every identity starts at 1.0
// and, each round, receives a flat (1 - d) baseline plus d times the
// value- and weight-scaled share of each attester's previous score.
// Scores are floored at zero so demerits cannot drive an identity negative.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use vouch_core::{Attestation, ReputationVector};

use crate::graph::AttestationGraph;

/// Default damping factor.
pub const DEFAULT_DAMPING_FACTOR: f64 = 0.85;

/// Default number of propagation rounds.
pub const DEFAULT_ITERATIONS: u32 = 20;

/// Configuration for the propagation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagationConfig {
    /// Damping factor (share of score that flows along attestations vs. the flat baseline). Default: 0.85.
    pub damping_factor: f64,
    /// Number of rounds. Always run in full unless `convergence_threshold` is set. Default: 20.
    pub iterations: u32,
    /// Optional early exit: stop once the L1 change between rounds drops
    /// below this value. Default: `None` (run all `iterations`).
    #[serde(default)]
    pub convergence_threshold: Option<f64>,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            damping_factor: DEFAULT_DAMPING_FACTOR,
            iterations: DEFAULT_ITERATIONS,
            convergence_threshold: None,
        }
    }
}

/// Scores plus diagnostics from one propagation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagationReport {
    /// Final reputation per identity.
    pub scores: ReputationVector,
    /// Rounds actually executed.
    pub iterations_run: u32,
    /// L1 change produced by the last round (0.0 if no round ran).
    pub final_delta: f64,
    /// True if the run stopped early on `convergence_threshold`.
    pub converged: bool,
}

/// Compute reputation scores from an attestation list.
///
/// Algorithm:
/// 1. Build the attestation graph
/// 2. Start every identity at 1.0
/// 3. Each round, from the previous round's vector only:
///    score(U) = (1 - d) + d * sum over F -> U of (rep(F) / out_degree(F)) * value * weight
/// 4. Floor each score at 0 and swap buffers
///
/// The result is identical for any ordering of `attestations`.
pub fn propagate(attestations: &[Attestation], config: &PropagationConfig) -> ReputationVector {
    propagate_with_report(attestations, config).scores
}

/// Like [`propagate`], but also returns iteration diagnostics.
pub fn propagate_with_report(
    attestations: &[Attestation],
    config: &PropagationConfig,
) -> PropagationReport {
    let graph = AttestationGraph::build(attestations);
    propagate_graph(&graph, config)
}

/// Run propagation over a prebuilt graph.
pub fn propagate_graph(graph: &AttestationGraph, config: &PropagationConfig) -> PropagationReport {
    let n = graph.len();
    if n == 0 {
        return PropagationReport {
            scores: ReputationVector::new(),
            iterations_run: 0,
            final_delta: 0.0,
            converged: false,
        };
    }

    let d = config.damping_factor;
    let baseline = 1.0 - d;

    let mut scores = vec![1.0_f64; n];
    let mut next = vec![0.0_f64; n];
    let mut iterations_run = 0;
    let mut final_delta = 0.0;
    let mut converged = false;

    for round in 0..config.iterations {
        for (u, slot) in next.iter_mut().enumerate() {
            let mut inflow = 0.0;
            for edge in graph.incoming(u) {
                let out_degree = graph.out_degree(edge.from);
                if out_degree > 0 {
                    inflow += (scores[edge.from] / out_degree as f64) * edge.value * edge.weight;
                }
            }
            // f64::max drops NaN in favour of 0.0.
            *slot = (baseline + d * inflow).max(0.0);
        }

        final_delta = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        std::mem::swap(&mut scores, &mut next);
        iterations_run = round + 1;
        trace!(round = iterations_run, delta = final_delta, "propagation round");

        if let Some(threshold) = config.convergence_threshold {
            if final_delta < threshold {
                converged = true;
                break;
            }
        }
    }

    debug!(
        identities = n,
        edges = graph.edge_count(),
        iterations_run,
        final_delta,
        converged,
        "reputation propagated"
    );

    let scores = graph
        .identities()
        .iter()
        .cloned()
        .zip(scores)
        .collect();

    PropagationReport {
        scores,
        iterations_run,
        final_delta,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn att(from: &str, to: &str, value: f64, weight: f64) -> Attestation {
        Attestation::new(from, to, value, weight)
    }

    #[test]
    fn empty_attestations_return_empty_scores() {
        let result = propagate(&[], &PropagationConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn endorsed_identity_outranks_endorsers() {
        let result = propagate(
            &[att("alice", "bob", 5.0, 1.0), att("charlie", "bob", 3.0, 1.0)],
            &PropagationConfig::default(),
        );
        assert_eq!(result.len(), 3);
        assert!(result["bob"] > 0.0);
        assert!(result["bob"] > result["alice"]);
        assert!(result["bob"] > result["charlie"]);
    }

    #[test]
    fn reputation_reaches_two_hops() {
        let result = propagate(
            &[att("alice", "bob", 5.0, 1.0), att("bob", "charlie", 3.0, 1.0)],
            &PropagationConfig::default(),
        );
        assert!(result["charlie"] > 0.0);
        // charlie = 0.15 + 0.85 * rep(bob) * 3, well above the bare baseline.
        assert!(result["charlie"] > 0.15 + 1e-9);
    }

    #[test]
    fn identity_without_incoming_edges_sits_at_baseline() {
        let result = propagate(&[att("alice", "bob", 1.0, 1.0)], &PropagationConfig::default());
        assert!((result["alice"] - 0.15).abs() < 1e-12);
        // bob = 0.15 + 0.85 * 0.15 after the first round settles alice.
        assert!((result["bob"] - (0.15 + 0.85 * 0.15)).abs() < 1e-12);
    }

    #[test]
    fn single_iteration_reads_initial_vector() {
        let config = PropagationConfig {
            iterations: 1,
            ..PropagationConfig::default()
        };
        let result = propagate(&[att("alice", "bob", 2.0, 0.5)], &config);
        // Round one uses rep0(alice) = 1.0.
        assert!((result["bob"] - (0.15 + 0.85 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn demerits_floor_at_zero() {
        let result = propagate(
            &[att("alice", "bob", -10.0, 1.0), att("charlie", "bob", -10.0, 1.0)],
            &PropagationConfig::default(),
        );
        assert_eq!(result["bob"], 0.0);
        assert!(result.values().all(|&s| s >= 0.0));
    }

    #[test]
    fn out_degree_splits_attester_score() {
        let result = propagate(
            &[att("alice", "bob", 1.0, 1.0), att("alice", "carol", 1.0, 1.0)],
            &PropagationConfig::default(),
        );
        assert!((result["bob"] - result["carol"]).abs() < 1e-15);
        assert!((result["bob"] - (0.15 + 0.85 * 0.15 / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn duplicate_edges_count_separately() {
        let once = propagate(&[att("alice", "bob", 1.0, 1.0)], &PropagationConfig::default());
        let twice = propagate(
            &[att("alice", "bob", 1.0, 1.0), att("alice", "bob", 1.0, 1.0)],
            &PropagationConfig::default(),
        );
        // Two edges halve each share but there are two shares: same total.
        assert!((once["bob"] - twice["bob"]).abs() < 1e-12);
    }

    #[test]
    fn self_attestation_feeds_back() {
        let result = propagate(&[att("alice", "alice", 1.0, 1.0)], &PropagationConfig::default());
        // Fixed point of x = 0.15 + 0.85x is 1.0, and the start is 1.0.
        assert!((result["alice"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_blocks_propagation() {
        let result = propagate(&[att("alice", "bob", 5.0, 0.0)], &PropagationConfig::default());
        assert!((result["bob"] - 0.15).abs() < 1e-12);
    }

    #[test]
    fn fixed_iteration_count_by_default() {
        let report = propagate_with_report(
            &[att("alice", "bob", 1.0, 1.0)],
            &PropagationConfig::default(),
        );
        assert_eq!(report.iterations_run, DEFAULT_ITERATIONS);
        assert!(!report.converged);
    }

    #[test]
    fn convergence_threshold_stops_early() {
        let edges = [att("alice", "bob", 1.0, 1.0), att("bob", "alice", 1.0, 1.0)];
        let config = PropagationConfig {
            iterations: 1_000,
            convergence_threshold: Some(1e-9),
            ..PropagationConfig::default()
        };
        let report = propagate_with_report(&edges, &config);
        assert!(report.converged);
        assert!(report.iterations_run < 1_000);
        assert!(report.final_delta < 1e-9);
    }

    #[test]
    fn zero_damping_gives_flat_scores() {
        let config = PropagationConfig {
            damping_factor: 0.0,
            ..PropagationConfig::default()
        };
        let result = propagate(&[att("alice", "bob", 9.0, 3.0)], &config);
        assert!(result.values().all(|&s| s == 1.0));
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let edges = vec![
            att("alice", "bob", 5.0, 1.2),
            att("bob", "charlie", -2.0, 0.7),
            att("charlie", "alice", 3.0, 0.9),
            att("dave", "bob", 1.0, 0.3),
        ];
        let a = propagate(&edges, &PropagationConfig::default());
        let b = propagate(&edges, &PropagationConfig::default());
        assert_eq!(a, b);
    }

    fn arb_attestations() -> impl Strategy<Value = Vec<Attestation>> {
        prop::collection::vec((0u8..6, 0u8..6, -5i32..=5, 0.0f64..3.0), 1..30).prop_map(|rows| {
            rows.into_iter()
                .map(|(f, t, v, w)| att(&format!("id{}", f), &format!("id{}", t), v as f64, w))
                .collect()
        })
    }

    fn arb_reordered_attestations() -> impl Strategy<Value = (Vec<Attestation>, Vec<Attestation>)> {
        arb_attestations().prop_flat_map(|edges| (Just(edges.clone()), Just(edges).prop_shuffle()))
    }

    proptest! {
        #[test]
        fn scores_are_never_negative(edges in arb_attestations()) {
            let result = propagate(&edges, &PropagationConfig::default());
            for s in result.values() {
                prop_assert!(*s >= 0.0);
            }
        }

        #[test]
        fn reordering_input_changes_nothing((edges, shuffled) in arb_reordered_attestations()) {
            let a = propagate(&edges, &PropagationConfig::default());
            let b = propagate(&shuffled, &PropagationConfig::default());
            prop_assert_eq!(a, b);
        }
    }
}
