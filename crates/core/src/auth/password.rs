//! Argon2id hashing for manager account passwords.
//!
//! Hashes are stored as PHC strings, so parameters and salt travel with the
//! hash and defaults can change without invalidating stored credentials.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use thiserror::Error;

/// Errors from hashing or checking a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing the plaintext failed.
    #[error("failed to hash password: {0}")]
    HashError(String),

    /// Verification failed for a reason other than a wrong password.
    #[error("failed to verify password: {0}")]
    VerifyError(String),

    /// The stored hash is not a parseable PHC string.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Hashes a plaintext password with a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordError::HashError`] if hashing fails.
///
/// ```
/// use konak_core::auth::hash_password;
///
/// let hash = hash_password("hunter2-but-longer").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Checks a plaintext password against a stored PHC hash.
///
/// A wrong password is `Ok(false)`, not an error; errors are reserved for
/// malformed hashes and backend failures.
///
/// # Errors
///
/// Returns [`PasswordError::InvalidHash`] if the hash cannot be parsed, or
/// [`PasswordError::VerifyError`] on any other verification failure.
///
/// ```
/// use konak_core::auth::{hash_password, verify_password};
///
/// let hash = hash_password("hunter2-but-longer").unwrap();
/// assert!(verify_password("hunter2-but-longer", &hash).unwrap());
/// assert!(!verify_password("hunter3", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_a_phc_string() {
        let hash = hash_password("demo1234").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "demo1234");
    }

    #[test]
    fn matching_password_verifies() {
        let hash = hash_password("demo1234").unwrap();
        assert!(verify_password("demo1234", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("demo1234").unwrap();
        assert!(!verify_password("demo12345", &hash).unwrap());
    }

    #[test]
    fn rehashing_salts_differently() {
        let first = hash_password("demo1234").unwrap();
        let second = hash_password("demo1234").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn garbage_hash_is_rejected_as_invalid() {
        let result = verify_password("demo1234", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }
}
