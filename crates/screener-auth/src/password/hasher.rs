//! SHA-256 password hashing and verification.
//!
//! Hashes are unsalted lowercase hex digests so that hashes stored by earlier
//! deployments keep verifying.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hashes and verifies per-link access passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Returns the lowercase hex SHA-256 digest of `password`.
    pub fn hash_password(&self, password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    /// Recomputes the digest of `password` and compares it to `hash` in
    /// constant time. A malformed stored hash never matches.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let computed = self.hash_password(password);
        computed.as_bytes().ct_eq(hash.as_bytes()).into()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_hex() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("secret");
        assert_eq!(hash, hasher.hash_password("secret"));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            PasswordHasher::new().hash_password("secret"),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn test_verify_password() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("secret");
        assert!(hasher.verify_password("secret", &hash));
        assert!(!hasher.verify_password("wrong", &hash));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("secret", "not-a-hash"));
        assert!(!hasher.verify_password("secret", ""));
    }
}
