// crates/vouch-core/src/lib.rs
//
// vouch-core: Core attestation types, snapshots, and collaborator traits
// for the Vouch reputation engine.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the canonical attestation shapes, the snapshot handed to each
// scoring run, the error type, and the trait the persistence layer implements.

pub mod attestation;
pub mod crypto;
pub mod error;
pub mod snapshot;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use vouch_core::Attestation;`

// Attestation types
pub use attestation::{Attestation, AttestationRecord, DiscountFactors, Identity, ReputationVector};

// Snapshot types
pub use snapshot::AttestationSnapshot;

// Error type
pub use error::VouchError;

// Traits
pub use traits::{InMemoryReputationStore, ReputationStore};
