use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AttendanceError>;

/// Every way an attendance operation can be rejected.
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Employee record not found. Please check your email address.")]
    IdentityNotFound,

    #[error("A photo is required for every time-in and time-out")]
    EvidenceRequired,

    #[error("Photo is not valid base64 image data")]
    InvalidEvidence,

    #[error("Photo exceeds the maximum size of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("A department or site is required")]
    LocationRequired,

    #[error("Invalid team roster: {0}")]
    InvalidRoster(String),

    #[error("Already timed in today")]
    AlreadyTimedIn,

    #[error("You have already timed out for today")]
    AlreadyTimedOut,

    #[error("No active time-in record found for today")]
    NoActiveEntry,

    #[error("An attendance record already exists for this person and date")]
    DuplicateEntry,

    #[error("Photo upload failed: {0}")]
    UploadFailed(String),

    #[error("Attendance record not found")]
    RecordNotFound,

    #[error("Timed out while waiting for {0}")]
    Timeout(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AttendanceError {
    /// Stable machine-readable code sent to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            AttendanceError::IdentityNotFound => "IDENTITY_NOT_FOUND",
            AttendanceError::EvidenceRequired => "EVIDENCE_REQUIRED",
            AttendanceError::InvalidEvidence => "INVALID_EVIDENCE",
            AttendanceError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AttendanceError::LocationRequired => "LOCATION_REQUIRED",
            AttendanceError::InvalidRoster(_) => "INVALID_ROSTER",
            AttendanceError::AlreadyTimedIn => "ALREADY_TIMED_IN",
            AttendanceError::AlreadyTimedOut => "ALREADY_TIMED_OUT",
            AttendanceError::NoActiveEntry => "NO_ACTIVE_ENTRY",
            AttendanceError::DuplicateEntry => "DUPLICATE_ENTRY",
            AttendanceError::UploadFailed(_) => "UPLOAD_FAILED",
            AttendanceError::RecordNotFound => "RECORD_NOT_FOUND",
            AttendanceError::Timeout(_) => "TIMEOUT",
            AttendanceError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            AttendanceError::IdentityNotFound | AttendanceError::RecordNotFound => {
                StatusCode::NOT_FOUND
            }
            AttendanceError::EvidenceRequired
            | AttendanceError::InvalidEvidence
            | AttendanceError::LocationRequired
            | AttendanceError::InvalidRoster(_)
            | AttendanceError::NoActiveEntry => StatusCode::BAD_REQUEST,
            AttendanceError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AttendanceError::AlreadyTimedIn
            | AttendanceError::AlreadyTimedOut
            | AttendanceError::DuplicateEntry => StatusCode::CONFLICT,
            AttendanceError::UploadFailed(_) => StatusCode::BAD_GATEWAY,
            AttendanceError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AttendanceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // don't leak driver details to the client
        let message = match self {
            AttendanceError::Database(_) => {
                "Something went wrong, Contact with system admin".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": message
        }))
    }
}
