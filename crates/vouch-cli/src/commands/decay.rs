// crates/vouch-cli/src/commands/decay.rs
//
// `vouch decay <age_days>`: time-decay multiplier for an attestation age.

use clap::Args;
use vouch_reputation::time_decay;

use crate::config::EngineConfig;
use crate::output::{format_json, OutputFormat};

/// Decay multiplier command.
#[derive(Debug, Args)]
pub struct DecayCmd {
    /// Attestation age in days.
    #[arg()]
    pub age_days: f64,

    /// Override the configured half-life in days.
    #[arg(long)]
    pub half_life: Option<f64>,
}

/// Run the decay command.
pub fn run(
    cmd: &DecayCmd,
    config: &EngineConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let half_life = cmd.half_life.unwrap_or(config.half_life_days);
    let factor = time_decay(cmd.age_days, half_life);
    match format {
        OutputFormat::Table => println!("{:.6}", factor),
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({
                "age_days": cmd.age_days,
                "half_life_days": half_life,
                "factor": factor,
            }))
        ),
    }
    Ok(())
}
