use chrono::Utc;
use uuid::Uuid;

use crate::config::CompanyNameScope;
use crate::domain::repository::CompanyRepository;
use crate::domain::types::{Company, SelectionStep, WISHPOINT_MAX};
use crate::error::TrackerServiceError;

fn validate_wishpoint(wishpoint: i32) -> Result<(), TrackerServiceError> {
    if (0..=WISHPOINT_MAX).contains(&wishpoint) {
        Ok(())
    } else {
        Err(TrackerServiceError::WishpointOutOfRange)
    }
}

// ── CreateCompany ────────────────────────────────────────────────────────────

pub struct CompanyInput {
    pub name: String,
    pub wishpoint: i32,
    pub step: String,
    pub scale: i32,
    pub startmoney: i32,
    pub numemploy: i32,
    pub comment: String,
}

pub struct CreateCompanyUseCase<R: CompanyRepository> {
    pub repo: R,
    pub name_scope: CompanyNameScope,
}

impl<R: CompanyRepository> CreateCompanyUseCase<R> {
    pub async fn execute(
        &self,
        owner_user_id: Uuid,
        input: CompanyInput,
    ) -> Result<Uuid, TrackerServiceError> {
        validate_wishpoint(input.wishpoint)?;
        let step = SelectionStep::parse(&input.step)?;

        // Uniqueness probe; the DB unique index backstops the global scope.
        let existing = match self.name_scope {
            CompanyNameScope::Global => self.repo.find_by_name(&input.name).await?,
            CompanyNameScope::Owner => {
                self.repo
                    .find_by_name_for_owner(owner_user_id, &input.name)
                    .await?
            }
        };
        if existing.is_some() {
            return Err(TrackerServiceError::CompanyNameTaken);
        }

        let now = Utc::now();
        let company = Company {
            id: Uuid::now_v7(),
            owner_user_id,
            name: input.name,
            wishpoint: input.wishpoint,
            step,
            scale: input.scale,
            startmoney: input.startmoney,
            numemploy: input.numemploy,
            comment: input.comment,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&company).await?;
        Ok(company.id)
    }
}

// ── GetCompany ───────────────────────────────────────────────────────────────

pub struct GetCompanyUseCase<R: CompanyRepository> {
    pub repo: R,
}

impl<R: CompanyRepository> GetCompanyUseCase<R> {
    pub async fn execute(
        &self,
        acting_user_id: Uuid,
        company_id: Uuid,
    ) -> Result<Company, TrackerServiceError> {
        let company = self
            .repo
            .find_by_id(company_id)
            .await?
            .ok_or(TrackerServiceError::CompanyNotFound)?;
        company.assert_owner(acting_user_id)?;
        Ok(company)
    }
}

// ── ListCompanies ────────────────────────────────────────────────────────────

pub struct ListCompaniesUseCase<R: CompanyRepository> {
    pub repo: R,
}

impl<R: CompanyRepository> ListCompaniesUseCase<R> {
    pub async fn execute(&self, owner_user_id: Uuid) -> Result<Vec<Company>, TrackerServiceError> {
        self.repo.list_by_owner(owner_user_id).await
    }
}

// ── SearchCompanies ──────────────────────────────────────────────────────────

pub struct SearchCompaniesUseCase<R: CompanyRepository> {
    pub repo: R,
}

impl<R: CompanyRepository> SearchCompaniesUseCase<R> {
    /// Owner-scoped so one user's search can never surface another's records.
    pub async fn execute(
        &self,
        owner_user_id: Uuid,
        substring: &str,
    ) -> Result<Vec<Company>, TrackerServiceError> {
        self.repo.search_by_name(owner_user_id, substring).await
    }
}

// ── UpdateCompany ────────────────────────────────────────────────────────────

pub struct UpdateCompanyUseCase<R: CompanyRepository> {
    pub repo: R,
    pub name_scope: CompanyNameScope,
}

impl<R: CompanyRepository> UpdateCompanyUseCase<R> {
    pub async fn execute(
        &self,
        acting_user_id: Uuid,
        company_id: Uuid,
        input: CompanyInput,
    ) -> Result<(), TrackerServiceError> {
        let mut company = self
            .repo
            .find_by_id(company_id)
            .await?
            .ok_or(TrackerServiceError::CompanyNotFound)?;
        company.assert_owner(acting_user_id)?;

        validate_wishpoint(input.wishpoint)?;
        let step = SelectionStep::parse(&input.step)?;

        // A probe hit on the record itself means an unchanged name — allowed.
        let existing = match self.name_scope {
            CompanyNameScope::Global => self.repo.find_by_name(&input.name).await?,
            CompanyNameScope::Owner => {
                self.repo
                    .find_by_name_for_owner(acting_user_id, &input.name)
                    .await?
            }
        };
        if let Some(other) = existing {
            if other.id != company.id {
                return Err(TrackerServiceError::CompanyNameTaken);
            }
        }

        company.name = input.name;
        company.wishpoint = input.wishpoint;
        company.step = step;
        company.scale = input.scale;
        company.startmoney = input.startmoney;
        company.numemploy = input.numemploy;
        company.comment = input.comment;
        company.updated_at = Utc::now();
        self.repo.update(&company).await
    }
}

// ── DeleteCompany ────────────────────────────────────────────────────────────

pub struct DeleteCompanyUseCase<R: CompanyRepository> {
    pub repo: R,
}

impl<R: CompanyRepository> DeleteCompanyUseCase<R> {
    pub async fn execute(
        &self,
        acting_user_id: Uuid,
        company_id: Uuid,
    ) -> Result<(), TrackerServiceError> {
        let company = self
            .repo
            .find_by_id(company_id)
            .await?
            .ok_or(TrackerServiceError::CompanyNotFound)?;
        company.assert_owner(acting_user_id)?;
        self.repo.delete(company_id).await?;
        Ok(())
    }
}
