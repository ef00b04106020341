use crate::schemas::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use model::entities::user::AccountStatus;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::{debug, error};

/// Result type used by handlers and helpers of the service.
pub type AppResult<T> = Result<T, AppError>;

/// Everything a request can fail with, mapped onto an HTTP status and a stable error code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{}", account_status_message(.0))]
    AccountNotApproved(AccountStatus),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn account_status_message(status: &AccountStatus) -> &'static str {
    match status {
        AccountStatus::Pending => "Your account is pending approval. Please wait for admin approval.",
        AccountStatus::Rejected => "Your account has been rejected. Please contact administration.",
        AccountStatus::Suspended => "Your account has been suspended. Please contact administration.",
        AccountStatus::Approved => "Your account is not approved for login.",
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::AccountNotApproved(_) | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::AccountNotApproved(AccountStatus::Pending) => "ACCOUNT_PENDING",
            AppError::AccountNotApproved(AccountStatus::Rejected) => "ACCOUNT_REJECTED",
            AppError::AccountNotApproved(AccountStatus::Suspended) => "ACCOUNT_SUSPENDED",
            AppError::AccountNotApproved(AccountStatus::Approved) => "ACCOUNT_NOT_APPROVED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("{} not found with id: {}", entity, id))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Conflict(format!("Duplicate value: {}", detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                AppError::BadRequest(format!("Referenced record does not exist: {}", detail))
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("password hashing failed: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            error!(error = %self, code = code, "Request failed");
        } else {
            debug!(error = %self, code = code, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}
