//! Error types for the HTTP application layer.
//!
//! [`AppError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bfield_db::DbError;

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A write was rejected by a model validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The data layer failed.
    #[error("database error: {0}")]
    Database(DbError),

    /// A template failed to render.
    #[error("template error: {0}")]
    Template(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        // Lookup and validation failures keep their identity so they map
        // to the right status code; everything else is a 500.
        match err {
            DbError::NotFound(msg) => Self::NotFound(msg),
            DbError::Validation(msg) => Self::Validation(msg),
            other => Self::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            Self::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Template(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
