use thiserror::Error;

/// Boundary error types for the Vouch reputation engine.
///
/// The scoring functions themselves are total and never return these;
/// they surface only from snapshot loading, store access, and configuration.
#[derive(Debug, Error)]
pub enum VouchError {
    /// A stored attestation record failed shape validation.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Reputation store read or write failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration could not be loaded or is out of range.
    #[error("Config error: {0}")]
    Config(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for VouchError {
    fn from(e: serde_json::Error) -> Self {
        VouchError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for VouchError {
    fn from(e: std::io::Error) -> Self {
        VouchError::Io(e.to_string())
    }
}
