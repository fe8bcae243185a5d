// crates/vouch-core/src/crypto.rs
//
// Hashing helpers. Signature verification happens upstream of the engine;
// only content addressing of snapshots lives here.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the given bytes.
///
/// Returns a 32-byte hash.
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Lowercase hex encoding of a 32-byte digest.
pub fn hex_digest(hash: &[u8; 32]) -> String {
    hex::encode(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_bytes(b"vouch"), hash_bytes(b"vouch"));
        assert_ne!(hash_bytes(b"vouch"), hash_bytes(b"vouch!"));
    }

    #[test]
    fn empty_input_matches_known_digest() {
        assert_eq!(
            hex_digest(&hash_bytes(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
