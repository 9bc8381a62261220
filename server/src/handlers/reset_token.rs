use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::TrackerServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::reset_token::{
    CompletePasswordResetInput, CompletePasswordResetUseCase, IssueResetTokenInput,
    IssueResetTokenUseCase,
};
use crate::usecase::user::ChangePasswordUseCase;

// ── POST /auth/password-reset ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestPasswordResetRequest {
    pub email: String,
}

/// The raw token leaves only through the notifier; the response body stays
/// empty.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestPasswordResetRequest>,
) -> Result<StatusCode, TrackerServiceError> {
    let usecase = IssueResetTokenUseCase {
        users: state.user_repo(),
        tokens: state.reset_token_repo(),
        notifier: state.reset_notifier(),
    };
    usecase
        .execute(IssueResetTokenInput { email: body.email })
        .await?;
    Ok(StatusCode::ACCEPTED)
}

// ── PATCH /auth/password-reset ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CompletePasswordResetRequest {
    pub token: String,
    pub password: String,
}

pub async fn complete_password_reset(
    State(state): State<AppState>,
    Json(body): Json<CompletePasswordResetRequest>,
) -> Result<StatusCode, TrackerServiceError> {
    let usecase = CompletePasswordResetUseCase {
        users: state.user_repo(),
        tokens: state.reset_token_repo(),
        credentials: state.credential_store(),
    };
    usecase
        .execute(CompletePasswordResetInput {
            token: body.token,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /auth/password ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

pub async fn change_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, TrackerServiceError> {
    let usecase = ChangePasswordUseCase {
        repo: state.user_repo(),
        credentials: state.credential_store(),
    };
    usecase.execute(identity.user_id, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}
