use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Tracker service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum TrackerServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("company not found")]
    CompanyNotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error("company name already registered")]
    CompanyNameTaken,
    #[error("password too short")]
    WeakPassword,
    #[error("wishpoint out of range")]
    WishpointOutOfRange,
    #[error("invalid selection step")]
    InvalidStep,
    #[error("missing data")]
    MissingData,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired reset token")]
    InvalidResetToken,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl TrackerServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CompanyNotFound => "COMPANY_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::CompanyNameTaken => "COMPANY_NAME_TAKEN",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::WishpointOutOfRange => "WISHPOINT_OUT_OF_RANGE",
            Self::InvalidStep => "INVALID_STEP",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidResetToken => "INVALID_RESET_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for TrackerServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::CompanyNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::CompanyNameTaken => StatusCode::CONFLICT,
            Self::WeakPassword
            | Self::WishpointOutOfRange
            | Self::InvalidStep
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidResetToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
