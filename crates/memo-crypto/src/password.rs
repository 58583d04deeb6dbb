//! Password hashing using Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{CryptoError, CryptoResult};

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// Returns the PHC string encoding (`$argon2id$v=19$...`), which embeds the
/// algorithm parameters and salt and is the only form ever persisted.
pub fn hash_password(password: &str) -> CryptoResult<String> {
    if password.is_empty() {
        return Err(CryptoError::EmptyPassword);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CryptoError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
///
/// The comparison inside the argon2 crate is constant-time; a mismatch and
/// a match take equivalent work. Returns `Ok(false)` on mismatch and `Err`
/// only when the stored hash itself is malformed.
pub fn verify_password(stored_hash: &str, password: &str) -> CryptoResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| CryptoError::InvalidHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CryptoError::InvalidHash(e.to_string())),
    }
}
