// crates/vouch-cli/src/files.rs
//
// JSON file I/O for snapshots and stored reputations.
//
// A reputations file is a flat JSON object: {"alice": 1.25, "bob": 0.15}.

use std::fs;
use std::path::Path;

use vouch_core::{AttestationSnapshot, ReputationVector, VouchError};

/// Read and validate an attestation snapshot.
pub fn load_snapshot(path: &Path) -> Result<AttestationSnapshot, VouchError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| VouchError::Io(format!("{}: {}", path.display(), e)))?;
    let snapshot = AttestationSnapshot::from_json(&contents)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Read stored reputations. A missing file is an empty store.
pub fn load_reputations(path: &Path) -> Result<ReputationVector, VouchError> {
    if !path.exists() {
        tracing::debug!("No reputations file at {}, starting empty", path.display());
        return Ok(ReputationVector::new());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write reputations, replacing the file.
pub fn save_reputations(path: &Path, scores: &ReputationVector) -> Result<(), VouchError> {
    let json = serde_json::to_string_pretty(scores)?;
    fs::write(path, json)?;
    Ok(())
}
