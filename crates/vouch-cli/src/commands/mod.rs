// crates/vouch-cli/src/commands/mod.rs
//
// Command module declarations for the vouch CLI.

pub mod decay;
pub mod discounts;
pub mod score;
pub mod weight;
