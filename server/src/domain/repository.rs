#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Company, PasswordResetToken, User};
use crate::error::TrackerServiceError;

/// Repository for account records.
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup; used for login and uniqueness checks.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TrackerServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, TrackerServiceError>;

    /// Insert a new record. The unique index on email is the race backstop;
    /// a lost race surfaces as `EmailTaken`.
    async fn create(&self, user: &User) -> Result<(), TrackerServiceError>;

    /// Update username and/or email, bumping `updated_at`.
    async fn update_profile(
        &self,
        id: Uuid,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), TrackerServiceError>;

    /// Store a new password hash and activate the account.
    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), TrackerServiceError>;

    /// Delete an account. Returns `true` if deleted, `false` if not found.
    /// Owned tokens and companies go with it (FK cascade).
    async fn delete(&self, id: Uuid) -> Result<bool, TrackerServiceError>;
}

/// Repository for one-time password reset tokens.
pub trait ResetTokenRepository: Send + Sync {
    async fn create(&self, token: &PasswordResetToken) -> Result<(), TrackerServiceError>;

    /// Find by exact token string, unexpired only. Expired and never-existed
    /// are indistinguishable to the caller.
    async fn find_valid(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, TrackerServiceError>;

    /// Delete by token string unconditionally. No-op when absent or expired.
    async fn delete(&self, token: &str) -> Result<(), TrackerServiceError>;
}

/// Repository for company research records.
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: &Company) -> Result<(), TrackerServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, TrackerServiceError>;

    /// System-wide exact-name probe (global uniqueness scope).
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, TrackerServiceError>;

    /// Owner-scoped exact-name probe (per-owner uniqueness scope).
    async fn find_by_name_for_owner(
        &self,
        owner_user_id: Uuid,
        name: &str,
    ) -> Result<Option<Company>, TrackerServiceError>;

    /// All records created by the given user, in insertion order.
    async fn list_by_owner(&self, owner_user_id: Uuid)
    -> Result<Vec<Company>, TrackerServiceError>;

    /// Case-sensitive substring match on name, scoped to the owner.
    async fn search_by_name(
        &self,
        owner_user_id: Uuid,
        substring: &str,
    ) -> Result<Vec<Company>, TrackerServiceError>;

    /// Replace the mutable fields of an existing record, bumping `updated_at`.
    async fn update(&self, company: &Company) -> Result<(), TrackerServiceError>;

    /// Delete by id. Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, TrackerServiceError>;
}

/// Port for the password hash/verify capability. Implementations must never
/// hand back plaintext; only PHC hash strings cross this boundary.
pub trait CredentialStore: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, TrackerServiceError>;

    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, TrackerServiceError>;
}

/// Port for out-of-band delivery of a freshly issued reset token.
pub trait ResetNotifier: Send + Sync {
    async fn notify(&self, email: &str, token: &str) -> Result<(), TrackerServiceError>;
}
