// crates/vouch-reputation/src/lib.rs
//
// vouch-reputation: Attestation graph, cluster discounts, time decay, and
// damped reputation propagation for the Vouch reputation engine.
//
// Every engine function is pure and total: it takes an explicit attestation
// snapshot, keeps no state between calls, and never fails on well-typed
// input. The `pipeline` and `cache` modules are the optional caller-side
// layer that composes the engine against a reputation store.

pub mod cache;
pub mod cluster;
pub mod decay;
pub mod graph;
pub mod pipeline;
pub mod propagate;
pub mod weight;

pub use cache::{engine_input_hash, ScoreCache};
pub use cluster::{detect_isolated_clusters, ClusterDetector, DEFAULT_CLUSTER_THRESHOLD};
pub use decay::{time_decay, DecayPolicy, DEFAULT_HALF_LIFE_DAYS};
pub use graph::AttestationGraph;
pub use pipeline::{PipelineConfig, ScoringOutcome, ScoringPipeline};
pub use propagate::{
    propagate, propagate_with_report, PropagationConfig, PropagationReport, DEFAULT_DAMPING_FACTOR,
    DEFAULT_ITERATIONS,
};
pub use weight::{attestation_weight, base_weight};
