//! Password hashing and verification using Argon2id
//!
//! The hash output is a PHC string that embeds the algorithm parameters and
//! a fresh random salt, so hashing the same password twice produces
//! different stored values that both verify. Verification delegates to the
//! `argon2` crate's constant-time comparison.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    HashingFailed(String),

    #[error("invalid password hash format")]
    InvalidHashFormat,

    #[error("failed to verify password: {0}")]
    VerificationFailed(String),
}

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// The returned PHC string is safe to store; it embeds the salt and
/// parameters needed for later verification.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// A malformed stored hash is an `InvalidHashFormat` error, never a panic;
/// a well-formed hash that does not match yields `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("secret1").expect("failed to hash");

        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("secret2", &hash).unwrap());
    }

    #[test]
    fn hash_never_equals_the_password() {
        let hash = hash_password("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per call
        let hash1 = hash_password("secret1").unwrap();
        let hash2 = hash_password("secret1").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("secret1", &hash1).unwrap());
        assert!(verify_password("secret1", &hash2).unwrap());
    }

    #[test]
    fn malformed_hash_fails_without_panicking() {
        let result = verify_password("secret1", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }
}
