//! Password hashing and verification with Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, error, instrument};

use super::AuthError;

/// Hashes a plain-text password with a fresh random salt.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    debug!("Attempting to hash password.");
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "Argon2 password hashing failed.");
            AuthError::Hashing(e.to_string())
        })
}

/// Returns `Ok(false)` on a mismatch and `Err` only when the stored hash is unusable.
#[instrument(name = "auth::verify_password", skip_all, err(Display))]
pub fn verify_password(stored_hash: &str, provided: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        error!(error = %e, "Failed to parse stored password hash string.");
        AuthError::Hashing(e.to_string())
    })?;
    match Argon2::default().verify_password(provided.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => {
            debug!("Password verification failed: Passwords do not match.");
            Ok(false)
        }
        Err(e) => Err(AuthError::Hashing(e.to_string())),
    }
}

/// [`hash_password`] on tokio's blocking pool, off the calling worker.
pub async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

/// [`verify_password`] on tokio's blocking pool, off the calling worker.
pub async fn verify_password_blocking(stored_hash: String, provided: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&stored_hash, &provided))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}
