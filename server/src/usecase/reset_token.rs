use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{
    CredentialStore, ResetNotifier, ResetTokenRepository, UserRepository,
};
use crate::domain::types::{
    MIN_PASSWORD_LEN, PasswordResetToken, RESET_TOKEN_LEN, RESET_TOKEN_TTL_HOURS,
};
use crate::error::TrackerServiceError;

/// Charset for generating random reset tokens (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..RESET_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── IssueResetToken ──────────────────────────────────────────────────────────

pub struct IssueResetTokenInput {
    pub email: String,
}

pub struct IssueResetTokenUseCase<U, T, N>
where
    U: UserRepository,
    T: ResetTokenRepository,
    N: ResetNotifier,
{
    pub users: U,
    pub tokens: T,
    pub notifier: N,
}

impl<U, T, N> IssueResetTokenUseCase<U, T, N>
where
    U: UserRepository,
    T: ResetTokenRepository,
    N: ResetNotifier,
{
    /// Issues a fresh token valid for 24 hours. Outstanding tokens for the
    /// same user stay live; the raw token travels only through the notifier.
    pub async fn execute(&self, input: IssueResetTokenInput) -> Result<String, TrackerServiceError> {
        // 1. Find user by email → 404 if not found
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(TrackerServiceError::UserNotFound)?;

        // 2. Generate token + record
        let token_str = generate_token();
        let now = Utc::now();
        let token = PasswordResetToken {
            id: Uuid::new_v4(),
            token: token_str.clone(),
            user_id: user.id,
            expires_at: now + Duration::hours(RESET_TOKEN_TTL_HOURS),
            created_at: now,
            updated_at: now,
        };

        // 3. Persist, then hand off for out-of-band delivery
        self.tokens.create(&token).await?;
        self.notifier.notify(&user.email, &token_str).await?;
        Ok(token_str)
    }
}

// ── ResolveResetToken ────────────────────────────────────────────────────────

pub struct ResolveResetTokenUseCase<T: ResetTokenRepository> {
    pub tokens: T,
}

impl<T: ResetTokenRepository> ResolveResetTokenUseCase<T> {
    /// Expired and never-issued tokens produce the same failure; the caller
    /// gets no token-guessing feedback.
    pub async fn execute(&self, token: &str) -> Result<Uuid, TrackerServiceError> {
        self.tokens
            .find_valid(token)
            .await?
            .map(|t| t.user_id)
            .ok_or(TrackerServiceError::InvalidResetToken)
    }
}

// ── CompletePasswordReset ────────────────────────────────────────────────────

pub struct CompletePasswordResetInput {
    pub token: String,
    pub password: String,
}

pub struct CompletePasswordResetUseCase<U, T, C>
where
    U: UserRepository,
    T: ResetTokenRepository,
    C: CredentialStore,
{
    pub users: U,
    pub tokens: T,
    pub credentials: C,
}

impl<U, T, C> CompletePasswordResetUseCase<U, T, C>
where
    U: UserRepository,
    T: ResetTokenRepository,
    C: CredentialStore,
{
    pub async fn execute(
        &self,
        input: CompletePasswordResetInput,
    ) -> Result<(), TrackerServiceError> {
        // 1. Resolve the token; generic failure on miss or expiry
        let token = self
            .tokens
            .find_valid(&input.token)
            .await?
            .ok_or(TrackerServiceError::InvalidResetToken)?;

        // 2. Strength check before any write; counted in characters, not bytes
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TrackerServiceError::WeakPassword);
        }

        // 3. Hash, store (activates the account), consume the token
        let hash = self.credentials.hash(&input.password).await?;
        self.users.set_password_hash(token.user_id, &hash).await?;
        self.tokens.delete(&input.token).await?;
        Ok(())
    }
}

// ── InvalidateResetToken ─────────────────────────────────────────────────────

pub struct InvalidateResetTokenUseCase<T: ResetTokenRepository> {
    pub tokens: T,
}

impl<T: ResetTokenRepository> InvalidateResetTokenUseCase<T> {
    /// Unconditional delete; safe on already-expired or unknown tokens.
    pub async fn execute(&self, token: &str) -> Result<(), TrackerServiceError> {
        self.tokens.delete(token).await
    }
}
