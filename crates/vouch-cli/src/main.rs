// crates/vouch-cli/src/main.rs
//
// CLI entrypoint for the Vouch reputation engine.
//
// Initializes tracing, loads engine configuration, and dispatches to
// subcommands for scoring snapshots and inspecting discounts, weights,
// and decay.

mod commands;
mod config;
mod files;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::decay::DecayCmd;
use commands::discounts::DiscountsCmd;
use commands::score::ScoreCmd;
use commands::weight::WeightCmd;
use config::EngineConfig;
use output::OutputFormat;

/// Vouch: Sybil-resistant reputation from peer attestations.
#[derive(Parser, Debug)]
#[command(
    name = "vouch",
    version = "0.1.0",
    about = "Vouch CLI: weighted, Sybil-resistant reputation from peer attestations"
)]
struct Cli {
    /// Path to the TOML configuration file (default: ~/.vouch/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Recompute reputation for every identity in a snapshot.
    Score(ScoreCmd),

    /// Show cluster discounts for a snapshot.
    Discounts(DiscountsCmd),

    /// Weight of one attestation from an attester's reputation.
    Weight(WeightCmd),

    /// Time-decay multiplier for an attestation age.
    Decay(DecayCmd),
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vouch")
        .join("config.toml")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, falling back to defaults if the
    // file is not found. Logging is not up yet, so report after init.
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let (engine_config, load_error) = match EngineConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (EngineConfig::default(), Some(e)),
    };

    // Initialize tracing subscriber for structured logging. RUST_LOG wins
    // over the configured level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&engine_config.log_level)),
        )
        .init();

    match load_error {
        None => tracing::info!("Loaded configuration from {}", config_path.display()),
        Some(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            config_path.display(),
            e
        ),
    }
    engine_config.validate()?;

    match &cli.command {
        Commands::Score(cmd) => commands::score::run(cmd, &engine_config, cli.format)?,
        Commands::Discounts(cmd) => commands::discounts::run(cmd, &engine_config, cli.format)?,
        Commands::Weight(cmd) => commands::weight::run(cmd, cli.format)?,
        Commands::Decay(cmd) => commands::decay::run(cmd, &engine_config, cli.format)?,
    }

    Ok(())
}
