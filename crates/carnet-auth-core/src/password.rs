//! Password hashing with bcrypt
//!
//! bcrypt is salted per call, so equal plaintexts produce different
//! digests, and the cost factor keeps brute-forcing expensive. Plaintext
//! passwords are never persisted or logged.

use bcrypt::DEFAULT_COST;

use crate::AuthError;

/// Hash a plaintext password
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, DEFAULT_COST)
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored digest
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, digest)
        .map_err(|e| AuthError::Internal(format!("password verification failed: {e}")))
}
