//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// The persistence operation that was in flight when a failure occurred.
///
/// Drives the per-operation wording of 500 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOperation {
    Create,
    Retrieve,
    RetrieveMany,
    Update,
    Delete,
}

impl DbOperation {
    /// Message for a recognized persistence failure
    pub fn failure_message(&self) -> &'static str {
        match self {
            DbOperation::Create => "Failed to create user",
            DbOperation::Retrieve => "Failed to retrieve user",
            DbOperation::RetrieveMany => "Failed to retrieve users",
            DbOperation::Update => "Failed to update user",
            DbOperation::Delete => "Failed to delete user",
        }
    }

    /// Noun used in the unknown-failure message
    pub fn phase(&self) -> &'static str {
        match self {
            DbOperation::Create => "creation",
            DbOperation::Retrieve | DbOperation::RetrieveMany => "retrieval",
            DbOperation::Update => "update",
            DbOperation::Delete => "deletion",
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Email uniqueness conflict at creation or update
    #[error("Email already exists")]
    DuplicateEmail,

    /// No user matches the supplied identifier
    #[error("User not found")]
    NotFound,

    /// Malformed request body
    #[error("{0}")]
    BadRequest(String),

    /// Recognized persistence failure; the database detail is
    /// surfaced alongside the operation wording
    #[error("{}", .operation.failure_message())]
    Database {
        operation: DbOperation,
        #[source]
        source: DbErr,
    },

    /// A failure signal that is not a structured database error.
    ///
    /// The SeaORM-backed store always yields a structured `DbErr`,
    /// so no persistence path constructs this variant; it holds the
    /// place in the error space for failure signals carrying no
    /// database detail.
    #[error("Unknown error occurred during {}", .0.phase())]
    Unknown(DbOperation),

    /// Process-level failure (startup, bind, migration)
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Wrap a database error, mapping unique-constraint violations
    /// to the email conflict variant.
    ///
    /// The unique index on `users.email` is the sole source of truth
    /// for uniqueness; there is no pre-insert existence check.
    pub fn db(operation: DbOperation, source: DbErr) -> Self {
        if matches!(source.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return AppError::DuplicateEmail;
        }
        AppError::Database { operation, source }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database { .. } | AppError::Unknown(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Database detail included alongside recognized failures
    fn details(&self) -> Option<String> {
        match self {
            AppError::Database { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {:?}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_400() {
        let (status, body) = body_json(AppError::DuplicateEmail).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Email already exists" }));
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, body) = body_json(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "User not found" }));
    }

    #[tokio::test]
    async fn database_failure_carries_operation_wording_and_details() {
        let err = AppError::db(
            DbOperation::Create,
            DbErr::Custom("connection reset".to_string()),
        );
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to create user");
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("connection reset"));
    }

    #[tokio::test]
    async fn retrieval_wording_differs_for_one_and_many() {
        assert_eq!(
            DbOperation::Retrieve.failure_message(),
            "Failed to retrieve user"
        );
        assert_eq!(
            DbOperation::RetrieveMany.failure_message(),
            "Failed to retrieve users"
        );
        assert_eq!(DbOperation::Retrieve.phase(), "retrieval");
        assert_eq!(DbOperation::RetrieveMany.phase(), "retrieval");
    }

    #[tokio::test]
    async fn unknown_failure_hides_details() {
        let (status, body) = body_json(AppError::Unknown(DbOperation::Delete)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Unknown error occurred during deletion" })
        );
    }

    #[tokio::test]
    async fn bad_request_echoes_message() {
        let (status, body) = body_json(AppError::bad_request("invalid request body")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid request body");
    }
}
