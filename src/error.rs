use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("{0}")]
    AccountUnverified(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("System is under maintenance")]
    Maintenance,

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),
            ServerError::InvalidCredentials
            | ServerError::AccountInactive
            | ServerError::AccountUnverified(_)
            | ServerError::AuthRequired
            | ServerError::InvalidToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            ServerError::PermissionDenied => (StatusCode::FORBIDDEN, self.to_string()),
            ServerError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Maintenance => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            // Missed single-row lookups are not distinguished from database
            // failures at the HTTP boundary; both surface as a generic 500.
            ServerError::NotFound(what) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch {}", what),
            ),
            ServerError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
