use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CredentialStore, UserRepository};
use crate::domain::types::{MIN_PASSWORD_LEN, User};
use crate::error::TrackerServiceError;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
}

pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    /// Creates an inactive account without a password. The first password is
    /// set through the reset flow, which also activates the account.
    pub async fn execute(&self, input: RegisterUserInput) -> Result<Uuid, TrackerServiceError> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(TrackerServiceError::EmailTaken);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash: None,
            is_active: false,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        Ok(user.id)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, TrackerServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(TrackerServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<(), TrackerServiceError> {
        if input.username.is_none() && input.email.is_none() {
            return Err(TrackerServiceError::MissingData);
        }
        if let Some(ref email) = input.email {
            // A hit on the user's own record means an unchanged email — allowed.
            if let Some(existing) = self.repo.find_by_email(email).await? {
                if existing.id != user_id {
                    return Err(TrackerServiceError::EmailTaken);
                }
            }
        }
        self.repo
            .update_profile(user_id, input.username.as_deref(), input.email.as_deref())
            .await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R, C>
where
    R: UserRepository,
    C: CredentialStore,
{
    pub repo: R,
    pub credentials: C,
}

impl<R, C> LoginUseCase<R, C>
where
    R: UserRepository,
    C: CredentialStore,
{
    /// Every failure path collapses to `InvalidCredentials` — unknown email,
    /// inactive account, unset password, and wrong password are
    /// indistinguishable to the caller.
    pub async fn execute(&self, input: LoginInput) -> Result<User, TrackerServiceError> {
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(TrackerServiceError::InvalidCredentials)?;
        if !user.is_active {
            return Err(TrackerServiceError::InvalidCredentials);
        }
        let hash = user
            .password_hash
            .as_deref()
            .ok_or(TrackerServiceError::InvalidCredentials)?;
        if !self.credentials.verify(&input.password, hash).await? {
            return Err(TrackerServiceError::InvalidCredentials);
        }
        Ok(user)
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordUseCase<R, C>
where
    R: UserRepository,
    C: CredentialStore,
{
    pub repo: R,
    pub credentials: C,
}

impl<R, C> ChangePasswordUseCase<R, C>
where
    R: UserRepository,
    C: CredentialStore,
{
    pub async fn execute(&self, user_id: Uuid, password: &str) -> Result<(), TrackerServiceError> {
        // Length in characters, not bytes; multibyte input counts per char.
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TrackerServiceError::WeakPassword);
        }
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(TrackerServiceError::UserNotFound)?;
        let hash = self.credentials.hash(password).await?;
        self.repo.set_password_hash(user_id, &hash).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), TrackerServiceError> {
        if !self.repo.delete(user_id).await? {
            return Err(TrackerServiceError::UserNotFound);
        }
        Ok(())
    }
}
