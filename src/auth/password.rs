//! Password hashing
//!
//! bcrypt with a fixed work factor. Hashes embed their own salt, so two
//! hashes of the same password never compare equal as strings; comparison
//! goes through [`verify`] only.

use crate::core::error::AuthError;

/// bcrypt work factor
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password
pub fn hash(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, HASH_COST).map_err(|e| AuthError::Hashing {
        message: e.to_string(),
    })
}

/// Check a plaintext password against a stored hash
pub fn verify(plaintext: &str, stored_hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, stored_hash).map_err(|e| AuthError::Hashing {
        message: e.to_string(),
    })
}
