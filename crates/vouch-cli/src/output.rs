// crates/vouch-cli/src/output.rs
//
// Output formatting utilities for the vouch CLI.
// Supports table and JSON output modes.

use std::borrow::Cow;

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled};
use vouch_core::{DiscountFactors, ReputationVector};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// One identity's row in the score table.
#[derive(Debug, Serialize)]
pub struct ScoreRow {
    pub identity: String,
    pub reputation: f64,
    pub discount: f64,
}

// Scores print at fixed precision in tables but stay numeric in JSON.
impl Tabled for ScoreRow {
    const LENGTH: usize = 3;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.identity.as_str()),
            Cow::Owned(format!("{:.4}", self.reputation)),
            Cow::Owned(format!("{:.4}", self.discount)),
        ]
    }

    fn headers() -> Vec<Cow<'static, str>> {
        vec![
            Cow::Borrowed("Identity"),
            Cow::Borrowed("Reputation"),
            Cow::Borrowed("Discount"),
        ]
    }
}

/// Join scores and discounts into rows, highest reputation first.
pub fn score_rows(reputation: &ReputationVector, discounts: &DiscountFactors) -> Vec<ScoreRow> {
    let mut rows: Vec<ScoreRow> = reputation
        .iter()
        .map(|(identity, &score)| ScoreRow {
            identity: identity.clone(),
            reputation: score,
            discount: discounts.get(identity).copied().unwrap_or(1.0),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.reputation
            .total_cmp(&a.reputation)
            .then_with(|| a.identity.cmp(&b.identity))
    });
    rows
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}
