use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Company;
use crate::error::TrackerServiceError;
use crate::handlers::user::CreatedResponse;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::company::{
    CompanyInput, CreateCompanyUseCase, DeleteCompanyUseCase, GetCompanyUseCase,
    ListCompaniesUseCase, SearchCompaniesUseCase, UpdateCompanyUseCase,
};

#[derive(Serialize)]
pub struct CompanyResponse {
    pub id: String,
    pub name: String,
    pub wishpoint: i32,
    pub step: String,
    pub scale: i32,
    pub startmoney: i32,
    pub numemploy: i32,
    pub comment: String,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.to_string(),
            name: company.name,
            wishpoint: company.wishpoint,
            step: company.step.as_str().to_owned(),
            scale: company.scale,
            startmoney: company.startmoney,
            numemploy: company.numemploy,
            comment: company.comment,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    pub wishpoint: i32,
    pub step: String,
    pub scale: i32,
    pub startmoney: i32,
    pub numemploy: i32,
    pub comment: String,
}

impl From<CompanyRequest> for CompanyInput {
    fn from(body: CompanyRequest) -> Self {
        Self {
            name: body.name,
            wishpoint: body.wishpoint,
            step: body.step,
            scale: body.scale,
            startmoney: body.startmoney,
            numemploy: body.numemploy,
            comment: body.comment,
        }
    }
}

// ── POST /companies ──────────────────────────────────────────────────────────

pub async fn create_company(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CompanyRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), TrackerServiceError> {
    let usecase = CreateCompanyUseCase {
        repo: state.company_repo(),
        name_scope: state.company_name_scope,
    };
    let id = usecase.execute(identity.user_id, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

// ── GET /companies ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ListCompaniesQuery {
    /// Case-sensitive substring filter on company name.
    pub name: Option<String>,
}

pub async fn list_companies(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<Json<Vec<CompanyResponse>>, TrackerServiceError> {
    let companies = match query.name {
        Some(ref substring) => {
            let usecase = SearchCompaniesUseCase {
                repo: state.company_repo(),
            };
            usecase.execute(identity.user_id, substring).await?
        }
        None => {
            let usecase = ListCompaniesUseCase {
                repo: state.company_repo(),
            };
            usecase.execute(identity.user_id).await?
        }
    };
    Ok(Json(companies.into_iter().map(Into::into).collect()))
}

// ── GET /companies/{id} ──────────────────────────────────────────────────────

pub async fn get_company(
    identity: Identity,
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<CompanyResponse>, TrackerServiceError> {
    let usecase = GetCompanyUseCase {
        repo: state.company_repo(),
    };
    let company = usecase.execute(identity.user_id, company_id).await?;
    Ok(Json(company.into()))
}

// ── PATCH /companies/{id} ────────────────────────────────────────────────────

pub async fn update_company(
    identity: Identity,
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(body): Json<CompanyRequest>,
) -> Result<StatusCode, TrackerServiceError> {
    let usecase = UpdateCompanyUseCase {
        repo: state.company_repo(),
        name_scope: state.company_name_scope,
    };
    usecase
        .execute(identity.user_id, company_id, body.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /companies/{id} ───────────────────────────────────────────────────

pub async fn delete_company(
    identity: Identity,
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<StatusCode, TrackerServiceError> {
    let usecase = DeleteCompanyUseCase {
        repo: state.company_repo(),
    };
    usecase.execute(identity.user_id, company_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
