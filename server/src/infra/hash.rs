use anyhow::Context as _;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task;

use crate::domain::repository::CredentialStore;
use crate::error::TrackerServiceError;

/// Argon2 implementation of the credential store. One-way PHC-string hashes;
/// verification is a constant-time comparison inside the argon2 crate.
#[derive(Clone, Default)]
pub struct Argon2CredentialStore;

impl Argon2CredentialStore {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialStore for Argon2CredentialStore {
    // Argon2 is CPU-intensive and would stall the async runtime if run
    // inline, so both operations go through spawn_blocking.
    async fn hash(&self, plaintext: &str) -> Result<String, TrackerServiceError> {
        let plaintext = plaintext.to_owned();
        let hash = task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| anyhow::anyhow!("hash password: {e}"))
        })
        .await
        .context("password hashing task panicked")??;
        Ok(hash)
    }

    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, TrackerServiceError> {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        let is_valid = task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hash)
                .map_err(|e| anyhow::anyhow!("invalid password hash format: {e}"))?;
            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok(),
            )
        })
        .await
        .context("password verification task panicked")??;
        Ok(is_valid)
    }
}
