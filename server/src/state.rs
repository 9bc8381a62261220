use sea_orm::DatabaseConnection;

use crate::config::CompanyNameScope;
use crate::infra::db::{DbCompanyRepository, DbResetTokenRepository, DbUserRepository};
use crate::infra::hash::Argon2CredentialStore;
use crate::infra::notifier::TracingResetNotifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub company_name_scope: CompanyNameScope,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn reset_token_repo(&self) -> DbResetTokenRepository {
        DbResetTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn company_repo(&self) -> DbCompanyRepository {
        DbCompanyRepository {
            db: self.db.clone(),
        }
    }

    pub fn credential_store(&self) -> Argon2CredentialStore {
        Argon2CredentialStore::new()
    }

    pub fn reset_notifier(&self) -> TracingResetNotifier {
        TracingResetNotifier
    }
}
