// crates/vouch-cli/src/commands/score.rs
//
// `vouch score <snapshot>`: recompute every identity's reputation from an
// attestation snapshot and the stored reputations of its attesters.

use std::path::PathBuf;

use clap::Args;
use vouch_core::crypto::hex_digest;
use vouch_core::InMemoryReputationStore;
use vouch_reputation::ScoringPipeline;

use crate::config::EngineConfig;
use crate::files::{load_reputations, load_snapshot, save_reputations};
use crate::output::{format_json, format_table, score_rows, OutputFormat};

/// Full reputation recomputation command.
#[derive(Debug, Args)]
pub struct ScoreCmd {
    /// Path to the attestation snapshot (JSON).
    #[arg()]
    pub snapshot: PathBuf,

    /// Path to stored reputations (JSON object of identity -> score).
    /// Attesters missing from this file get the configured default.
    #[arg(long)]
    pub reputations: Option<PathBuf>,

    /// Write the new scores back to the reputations file.
    #[arg(long, requires = "reputations")]
    pub write_back: bool,

    /// Override the configured number of propagation rounds.
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Override the configured damping factor.
    #[arg(long)]
    pub damping: Option<f64>,

    /// Stop early once scores change by less than this (L1).
    #[arg(long)]
    pub converge: Option<f64>,

    /// Skip age decay of attestation weights.
    #[arg(long)]
    pub no_decay: bool,
}

/// Run the score command.
pub fn run(
    cmd: &ScoreCmd,
    config: &EngineConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config.clone();
    if let Some(iterations) = cmd.iterations {
        config.iterations = iterations;
    }
    if let Some(damping) = cmd.damping {
        config.damping_factor = damping;
    }
    if cmd.converge.is_some() {
        config.convergence_threshold = cmd.converge;
    }
    if cmd.no_decay {
        config.apply_decay = false;
    }
    config.validate()?;

    let snapshot = load_snapshot(&cmd.snapshot)?;
    let stored = match &cmd.reputations {
        Some(path) => load_reputations(path)?,
        None => Default::default(),
    };
    tracing::info!(
        "Scoring {} attestations across {} identities against {} stored reputations",
        snapshot.len(),
        snapshot.identities().len(),
        stored.len()
    );

    let store = InMemoryReputationStore::with_scores(stored);
    let outcome = ScoringPipeline::new(config.pipeline()).score(&snapshot, &store)?;

    if cmd.write_back {
        if let Some(path) = &cmd.reputations {
            save_reputations(path, &store.snapshot())?;
            tracing::info!("Wrote {} scores to {}", outcome.reputation.len(), path.display());
        }
    }

    let rows = score_rows(&outcome.reputation, &outcome.discounts);
    match format {
        OutputFormat::Table => {
            println!("Snapshot {}", hex_digest(&outcome.snapshot_hash));
            println!(
                "{} identities, {} attestations",
                outcome.reputation.len(),
                outcome.attestations.len()
            );
            println!();
            println!("{}", format_table(&rows));
        }
        OutputFormat::Json => println!("{}", format_json(&rows)),
    }

    Ok(())
}
