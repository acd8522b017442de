//! Credential primitives: password hashing and opaque session tokens.
//!
//! Sessions are bearer tokens: 256 random bits, handed to the client once and
//! stored server-side only as a SHA-256 digest, so a leaked sessions table
//! does not leak usable tokens.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns [`CredentialError::Hash`] if the hasher rejects the input.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Verify a password against a stored Argon2 hash.
///
/// A hash that fails to parse verifies as `false` rather than erroring:
/// a corrupt stored hash must never let a login through.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Generate a new opaque session token (64 lowercase hex characters).
#[must_use]
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// SHA-256 digest of a session token, hex-encoded. This is what gets stored.
#[must_use]
pub fn token_digest(token: &str) -> String {
    hex_encode(&Sha256::digest(token.as_bytes()))
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").expect("hash");
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        let h1 = hash_password("password1").expect("hash");
        let h2 = hash_password("password1").expect("hash");
        assert_ne!(h1, h2);
    }

    #[test]
    fn corrupt_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn session_tokens_are_64_hex_chars_and_unique() {
        let t1 = generate_session_token();
        let t2 = generate_session_token();
        assert_eq!(t1.len(), 64);
        assert!(t1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(t1, t2);
    }

    #[test]
    fn token_digest_is_stable_and_distinct_from_token() {
        let token = generate_session_token();
        let d1 = token_digest(&token);
        let d2 = token_digest(&token);
        assert_eq!(d1, d2);
        assert_eq!(d1.len(), 64);
        assert_ne!(d1, token);
    }
}
