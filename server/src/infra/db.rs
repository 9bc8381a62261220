use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use shukatsu_schema::{companies, password_reset_tokens, users};

use crate::domain::repository::{CompanyRepository, ResetTokenRepository, UserRepository};
use crate::domain::types::{Company, PasswordResetToken, SelectionStep, User};
use crate::error::TrackerServiceError;

/// Escape `%`, `_` and the escape character itself so a user-supplied
/// substring matches literally inside a LIKE pattern.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Translate a storage-level unique violation (a lost check-then-act race)
/// into the matching conflict variant; anything else becomes `Internal`.
fn map_unique_violation(
    err: sea_orm::DbErr,
    conflict: TrackerServiceError,
    context: &'static str,
) -> TrackerServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => anyhow::Error::from(err).context(context).into(),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, TrackerServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, TrackerServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), TrackerServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, TrackerServiceError::EmailTaken, "create user"))?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), TrackerServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(new_username) = username {
            am.username = Set(new_username.to_owned());
        }
        if let Some(new_email) = email {
            am.email = Set(new_email.to_owned());
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.map_err(|e| {
            map_unique_violation(e, TrackerServiceError::EmailTaken, "update user profile")
        })?;
        Ok(())
    }

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), TrackerServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(Some(hash.to_owned())),
            is_active: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set password hash")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, TrackerServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Reset token repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbResetTokenRepository {
    pub db: DatabaseConnection,
}

impl ResetTokenRepository for DbResetTokenRepository {
    async fn create(&self, token: &PasswordResetToken) -> Result<(), TrackerServiceError> {
        password_reset_tokens::ActiveModel {
            id: Set(token.id),
            token: Set(token.token.clone()),
            user_id: Set(token.user_id),
            expires_at: Set(token.expires_at),
            created_at: Set(token.created_at),
            updated_at: Set(token.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create reset token")?;
        Ok(())
    }

    async fn find_valid(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, TrackerServiceError> {
        // Expiry is evaluated lazily here; expired rows linger until consumed
        // or swept externally.
        let now = Utc::now();
        let model = password_reset_tokens::Entity::find()
            .filter(password_reset_tokens::Column::Token.eq(token))
            .filter(password_reset_tokens::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find valid reset token")?;
        Ok(model.map(reset_token_from_model))
    }

    async fn delete(&self, token: &str) -> Result<(), TrackerServiceError> {
        password_reset_tokens::Entity::delete_many()
            .filter(password_reset_tokens::Column::Token.eq(token))
            .exec(&self.db)
            .await
            .context("delete reset token")?;
        Ok(())
    }
}

fn reset_token_from_model(model: password_reset_tokens::Model) -> PasswordResetToken {
    PasswordResetToken {
        id: model.id,
        token: model.token,
        user_id: model.user_id,
        expires_at: model.expires_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Company repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCompanyRepository {
    pub db: DatabaseConnection,
}

impl CompanyRepository for DbCompanyRepository {
    async fn create(&self, company: &Company) -> Result<(), TrackerServiceError> {
        companies::ActiveModel {
            id: Set(company.id),
            owner_user_id: Set(company.owner_user_id),
            name: Set(company.name.clone()),
            wishpoint: Set(company.wishpoint),
            step: Set(company.step.as_str().to_owned()),
            scale: Set(company.scale),
            startmoney: Set(company.startmoney),
            numemploy: Set(company.numemploy),
            comment: Set(company.comment.clone()),
            created_at: Set(company.created_at),
            updated_at: Set(company.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            map_unique_violation(e, TrackerServiceError::CompanyNameTaken, "create company")
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, TrackerServiceError> {
        let model = companies::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find company by id")?;
        model.map(company_from_model).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, TrackerServiceError> {
        let model = companies::Entity::find()
            .filter(companies::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find company by name")?;
        model.map(company_from_model).transpose()
    }

    async fn find_by_name_for_owner(
        &self,
        owner_user_id: Uuid,
        name: &str,
    ) -> Result<Option<Company>, TrackerServiceError> {
        let model = companies::Entity::find()
            .filter(companies::Column::OwnerUserId.eq(owner_user_id))
            .filter(companies::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find company by name for owner")?;
        model.map(company_from_model).transpose()
    }

    async fn list_by_owner(
        &self,
        owner_user_id: Uuid,
    ) -> Result<Vec<Company>, TrackerServiceError> {
        let models = companies::Entity::find()
            .filter(companies::Column::OwnerUserId.eq(owner_user_id))
            .order_by_asc(companies::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list companies by owner")?;
        models.into_iter().map(company_from_model).collect()
    }

    async fn search_by_name(
        &self,
        owner_user_id: Uuid,
        substring: &str,
    ) -> Result<Vec<Company>, TrackerServiceError> {
        let pattern = format!("%{}%", escape_like(substring));
        let models = companies::Entity::find()
            .filter(companies::Column::OwnerUserId.eq(owner_user_id))
            .filter(companies::Column::Name.like(pattern))
            .order_by_asc(companies::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("search companies by name")?;
        models.into_iter().map(company_from_model).collect()
    }

    async fn update(&self, company: &Company) -> Result<(), TrackerServiceError> {
        companies::ActiveModel {
            id: Set(company.id),
            name: Set(company.name.clone()),
            wishpoint: Set(company.wishpoint),
            step: Set(company.step.as_str().to_owned()),
            scale: Set(company.scale),
            startmoney: Set(company.startmoney),
            numemploy: Set(company.numemploy),
            comment: Set(company.comment.clone()),
            updated_at: Set(company.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| {
            map_unique_violation(e, TrackerServiceError::CompanyNameTaken, "update company")
        })?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, TrackerServiceError> {
        let result = companies::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete company")?;
        Ok(result.rows_affected > 0)
    }
}

fn company_from_model(model: companies::Model) -> Result<Company, TrackerServiceError> {
    // A stage outside the fixed set can only appear through outside writes;
    // surface it as an internal inconsistency rather than a client error.
    let step = SelectionStep::parse(&model.step).map_err(|_| {
        anyhow::anyhow!("unknown step {:?} stored for company {}", model.step, model.id)
    })?;
    Ok(Company {
        id: model.id,
        owner_user_id: model.owner_user_id,
        name: model.name,
        wishpoint: model.wishpoint,
        step,
        scale: model.scale,
        startmoney: model.startmoney,
        numemploy: model.numemploy,
        comment: model.comment,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
