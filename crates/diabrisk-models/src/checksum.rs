//! SHA-256 integrity checks for artifact files.
//!
//! A configured checksum pins the exact bytes of an artifact. Any edit,
//! truncation, or swapped file changes the digest and is rejected at load.

use sha2::{Digest, Sha256};

/// Lowercase 64-character hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Compare `bytes` against an expected hex digest.
///
/// The comparison ignores case and surrounding whitespace in `expected`.
/// On mismatch, returns a message containing both digests.
pub fn verify_sha256(bytes: &[u8], expected: &str) -> Result<(), String> {
    let actual = sha256_hex(bytes);
    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(format!(
            "checksum mismatch (expected sha256 {}, found {}); artifact may be corrupt",
            expected.trim(),
            actual
        ))
    }
}
