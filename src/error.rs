//! Error types shared by the storage and route layers.
//!
//! Every handler failure funnels into `ApiError`, whose `IntoResponse` impl
//! maps it to the right status code and a `{"message": ...}` JSON body.
//! Validation and conflict messages stay generic on the wire; the underlying
//! cause of a 500 is logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

// ---

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced by the in-memory store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Update target missing; carries the entity name for the message.
    #[error("{0} not found")]
    NotFound(&'static str),
}

/// Request-level failures, one variant per status code in the taxonomy.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with a fixed per-endpoint message.
    #[error("{0}")]
    Validation(&'static str),
    /// 401; identical wording whether the username or the password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// 404 with an entity- or location-specific message.
    #[error("{0}")]
    NotFound(String),
    /// 409; currently only duplicate usernames at signup.
    #[error("{0}")]
    Conflict(&'static str),
    /// 500; the client sees only the operation's generic message.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    // ---
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        ApiError::Internal {
            message,
            source: source.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    // ---
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    // ---
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ApiError::Internal { message, source } = &self {
            tracing::error!(error = %source, "{message}");
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
