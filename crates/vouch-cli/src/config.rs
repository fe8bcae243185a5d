// crates/vouch-cli/src/config.rs
//
// Engine configuration for the vouch CLI.
// Loaded from a TOML file or populated with sensible defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use vouch_core::VouchError;
use vouch_reputation::{
    DecayPolicy, PipelineConfig, PropagationConfig, DEFAULT_CLUSTER_THRESHOLD,
    DEFAULT_DAMPING_FACTOR, DEFAULT_HALF_LIFE_DAYS, DEFAULT_ITERATIONS,
};

/// Runtime configuration for a scoring run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Share of score that flows along attestations each round.
    #[serde(default = "default_damping_factor")]
    pub damping_factor: f64,

    /// Number of propagation rounds.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Stop early once the L1 change between rounds is below this.
    /// Unset (default) means always run every round.
    #[serde(default)]
    pub convergence_threshold: Option<f64>,

    /// Cluster discount floor.
    #[serde(default = "default_cluster_threshold")]
    pub cluster_threshold: f64,

    /// Attestation half-life in days.
    #[serde(default = "default_half_life_days")]
    pub half_life_days: f64,

    /// Whether to age-decay attestation weights.
    #[serde(default = "default_apply_decay")]
    pub apply_decay: bool,

    /// Reputation assumed for attesters with no stored score.
    #[serde(default)]
    pub default_reputation: f64,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_damping_factor() -> f64 {
    DEFAULT_DAMPING_FACTOR
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_cluster_threshold() -> f64 {
    DEFAULT_CLUSTER_THRESHOLD
}

fn default_half_life_days() -> f64 {
    DEFAULT_HALF_LIFE_DAYS
}

fn default_apply_decay() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            damping_factor: default_damping_factor(),
            iterations: default_iterations(),
            convergence_threshold: None,
            cluster_threshold: default_cluster_threshold(),
            half_life_days: default_half_life_days(),
            apply_decay: default_apply_decay(),
            default_reputation: 0.0,
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, VouchError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, VouchError> {
        toml::from_str(contents).map_err(|e| VouchError::Config(e.to_string()))
    }

    /// Reject parameters outside their meaningful ranges.
    pub fn validate(&self) -> Result<(), VouchError> {
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(VouchError::Config(format!(
                "damping_factor must be in [0, 1], got {}",
                self.damping_factor
            )));
        }
        if self.iterations == 0 {
            return Err(VouchError::Config("iterations must be at least 1".to_string()));
        }
        if let Some(eps) = self.convergence_threshold {
            if !(eps > 0.0) {
                return Err(VouchError::Config(format!(
                    "convergence_threshold must be positive, got {}",
                    eps
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.cluster_threshold) {
            return Err(VouchError::Config(format!(
                "cluster_threshold must be in [0, 1], got {}",
                self.cluster_threshold
            )));
        }
        if !(self.half_life_days > 0.0) {
            return Err(VouchError::Config(format!(
                "half_life_days must be positive, got {}",
                self.half_life_days
            )));
        }
        Ok(())
    }

    /// Propagation parameters.
    pub fn propagation(&self) -> PropagationConfig {
        PropagationConfig {
            damping_factor: self.damping_factor,
            iterations: self.iterations,
            convergence_threshold: self.convergence_threshold,
        }
    }

    /// Full pipeline configuration.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            propagation: self.propagation(),
            cluster_threshold: self.cluster_threshold,
            decay: self
                .apply_decay
                .then(|| DecayPolicy::new(self.half_life_days)),
            default_reputation: self.default_reputation,
        }
    }
}
