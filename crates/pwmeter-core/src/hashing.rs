//! Short password fingerprints for exports.
//!
//! The fingerprint hides the password in exported files. Ten hex characters
//! are not collision resistant and are not a storage format.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest.
pub const FINGERPRINT_LEN: usize = 10;

/// First [`FINGERPRINT_LEN`] lowercase hex characters of SHA-256(password).
pub fn fingerprint(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}
