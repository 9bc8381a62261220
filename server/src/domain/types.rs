use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TrackerServiceError;

/// Registered account. The hash is `None` until the first password is set
/// through the reset flow; the account stays inactive until then.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-time password reset token, delivered out-of-band via email.
#[derive(Debug, Clone)]
pub struct PasswordResetToken {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// Per-user company research record.
#[derive(Debug, Clone)]
pub struct Company {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    pub wishpoint: i32,
    pub step: SelectionStep,
    pub scale: i32,
    pub startmoney: i32,
    pub numemploy: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Ownership assertion applied by every by-id use case.
    pub fn assert_owner(&self, user_id: Uuid) -> Result<(), TrackerServiceError> {
        if self.owner_user_id == user_id {
            Ok(())
        } else {
            Err(TrackerServiceError::Forbidden)
        }
    }
}

/// Fixed interview stage set for a company record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStep {
    BeforeSelection,
    CompanyBriefing,
    EntrySheetSubmitted,
    FirstInterview,
    SecondInterview,
    FinalInterview,
    OfferReceived,
    DeclinedOrRejected,
}

impl SelectionStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeSelection => "before_selection",
            Self::CompanyBriefing => "company_briefing",
            Self::EntrySheetSubmitted => "entry_sheet_submitted",
            Self::FirstInterview => "first_interview",
            Self::SecondInterview => "second_interview",
            Self::FinalInterview => "final_interview",
            Self::OfferReceived => "offer_received",
            Self::DeclinedOrRejected => "declined_or_rejected",
        }
    }

    /// Parse a stage string; anything outside the fixed set is rejected.
    pub fn parse(s: &str) -> Result<Self, TrackerServiceError> {
        match s {
            "before_selection" => Ok(Self::BeforeSelection),
            "company_briefing" => Ok(Self::CompanyBriefing),
            "entry_sheet_submitted" => Ok(Self::EntrySheetSubmitted),
            "first_interview" => Ok(Self::FirstInterview),
            "second_interview" => Ok(Self::SecondInterview),
            "final_interview" => Ok(Self::FinalInterview),
            "offer_received" => Ok(Self::OfferReceived),
            "declined_or_rejected" => Ok(Self::DeclinedOrRejected),
            _ => Err(TrackerServiceError::InvalidStep),
        }
    }
}

/// Reset token time-to-live in hours.
pub const RESET_TOKEN_TTL_HOURS: i64 = 24;

/// Reset token length in characters.
pub const RESET_TOKEN_LEN: usize = 32;

/// Minimum password length accepted by the reset and change flows.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Inclusive upper bound for a company's interest score.
pub const WISHPOINT_MAX: i32 = 100;
