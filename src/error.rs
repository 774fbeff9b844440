//! Error types for the Elimu backend
//!
//! One enum covers the whole request path: handlers return `Result<_, Error>`
//! and the `IntoResponse` impl maps each variant to an HTTP status. Expected
//! failures (NotFound, Conflict, InvalidInput) carry their message through to
//! the client; everything else collapses to a generic 500 body so internal
//! detail never leaks.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Common result type for backend operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate unique key (video already registered, repeated review, taken email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed URL/id or a request that fails validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// YouTube Data API unreachable or returned a non-success status
    #[error("YouTube API error: {0}")]
    YouTube(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convert a sqlx error into Conflict when it is a unique-constraint
    /// violation, passing everything else through as Database.
    ///
    /// Duplicate prevention is enforced by real UNIQUE constraints rather than
    /// check-then-act probes, so the constraint violation *is* the conflict
    /// signal.
    pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Error::Conflict(message.to_string());
            }
        }
        Error::Database(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            Error::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg),
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg),
            // Transport and internal failures are logged server-side; the
            // client only sees a generic message.
            Error::YouTube(ref msg) => {
                tracing::error!("YouTube API failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                )
            }
            Error::Database(ref err) => {
                tracing::error!("Database failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                )
            }
            Error::Config(ref msg) | Error::Internal(ref msg) => {
                tracing::error!("Internal failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
