//! JSON error responses shared by the API handlers.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reelmark_core::{AccountError, BookmarkError};
use serde::Serialize;
use tracing::error;

/// Error body: `{"error": ...}` plus optional `details` / `field`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            field: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    BadRequest(String),
    UserNotFound,
    AlreadyBookmarked,
    AccountExists,
    Validation { field: &'static str, message: String },
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, ErrorResponse::new("Unauthorized")),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
            ApiError::UserNotFound => (StatusCode::NOT_FOUND, ErrorResponse::new("User not found")),
            ApiError::AlreadyBookmarked => {
                (StatusCode::CONFLICT, ErrorResponse::new("Already bookmarked"))
            }
            ApiError::AccountExists => (
                StatusCode::CONFLICT,
                ErrorResponse::new("This account already exists"),
            ),
            ApiError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: message,
                    details: None,
                    field: Some(field.to_string()),
                },
            ),
            ApiError::Internal(details) => {
                error!("Internal error: {}", details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        details: Some(details),
                        field: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<BookmarkError> for ApiError {
    fn from(e: BookmarkError) -> Self {
        match e {
            BookmarkError::UserNotFound(_) => ApiError::UserNotFound,
            BookmarkError::Conflict(_) => ApiError::AlreadyBookmarked,
            BookmarkError::Internal(details) => ApiError::Internal(details),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Validation { field, error } => ApiError::Validation {
                field: field.name(),
                message: error.to_string(),
            },
            AccountError::AlreadyExists => ApiError::AccountExists,
            AccountError::InvalidCredentials => ApiError::Unauthorized,
            AccountError::Internal(details) => ApiError::Internal(details),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
