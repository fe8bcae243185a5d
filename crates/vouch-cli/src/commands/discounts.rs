// crates/vouch-cli/src/commands/discounts.rs
//
// `vouch discounts <snapshot>`: show each identity's cluster discount.

use std::path::PathBuf;

use clap::Args;
use tabled::Tabled;
use vouch_core::Attestation;
use vouch_reputation::detect_isolated_clusters;

use crate::config::EngineConfig;
use crate::files::load_snapshot;
use crate::output::{format_json, format_table, OutputFormat};

/// Cluster discount inspection command.
#[derive(Debug, Args)]
pub struct DiscountsCmd {
    /// Path to the attestation snapshot (JSON).
    #[arg()]
    pub snapshot: PathBuf,

    /// Override the configured discount floor.
    #[arg(long)]
    pub threshold: Option<f64>,
}

/// A row in the discount table.
#[derive(Tabled)]
struct DiscountRow {
    #[tabled(rename = "Identity")]
    identity: String,
    #[tabled(rename = "Discount")]
    discount: String,
}

/// Run the discounts command.
pub fn run(
    cmd: &DiscountsCmd,
    config: &EngineConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let threshold = cmd.threshold.unwrap_or(config.cluster_threshold);
    let snapshot = load_snapshot(&cmd.snapshot)?;
    let topology: Vec<Attestation> = snapshot
        .records
        .iter()
        .map(|r| r.to_attestation(1.0))
        .collect();
    let discounts = detect_isolated_clusters(&topology, threshold);

    match format {
        OutputFormat::Table => {
            let rows: Vec<DiscountRow> = discounts
                .iter()
                .map(|(identity, d)| DiscountRow {
                    identity: identity.clone(),
                    discount: format!("{:.4}", d),
                })
                .collect();
            println!("Cluster threshold: {}", threshold);
            println!("{}", format_table(&rows));
        }
        OutputFormat::Json => println!("{}", format_json(&discounts)),
    }

    Ok(())
}
