// crates/vouch-cli/src/commands/weight.rs
//
// `vouch weight <reputation>`: weight of one attestation from an attester
// with the given reputation.

use clap::Args;
use vouch_reputation::attestation_weight;

use crate::output::{format_json, OutputFormat};

/// Single attestation weight command.
#[derive(Debug, Args)]
pub struct WeightCmd {
    /// Attester reputation.
    #[arg(allow_negative_numbers = true)]
    pub reputation: f64,

    /// Cluster discount in [0, 1].
    #[arg(long, default_value = "1.0")]
    pub discount: f64,
}

/// Run the weight command.
pub fn run(cmd: &WeightCmd, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let weight = attestation_weight(cmd.reputation, cmd.discount);
    match format {
        OutputFormat::Table => println!("{:.6}", weight),
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({
                "reputation": cmd.reputation,
                "discount": cmd.discount,
                "weight": weight,
            }))
        ),
    }
    Ok(())
}
