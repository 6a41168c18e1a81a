//! Password hashing and verification using Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use anyhow::anyhow;

use crate::error::DomainError;

/// Stored credential for federated accounts. Not a valid PHC string, so it
/// can never verify against any password.
pub const FEDERATED_SENTINEL: &str = "!federated";

/// Hash a password using Argon2id.
///
/// Returns the PHC-formatted hash string that includes the salt and parameters.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(anyhow!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash.
///
/// A stored value that is not a PHC string (the federated sentinel included)
/// verifies as false rather than erroring, so login failures stay uniform.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
