//! API error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::store::StoreError;

/// Errors surfaced by resource operations.
///
/// Every operation either returns a fully resolved record or one of these;
/// there are no partial results. Idempotent no-ops (deleting an absent key
/// at the store layer, removing an absent sub-record, an empty merge)
/// complete successfully and never reach this type.
#[derive(Debug)]
pub enum ApiError {
    /// Input failed schema validation; raised before any store access.
    Validation(String),
    /// A record or sub-record id did not resolve.
    NotFound { kind: &'static str, id: String },
    /// The underlying store faulted; never silently swallowed.
    Store(StoreError),
}

impl ApiError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "validation failed: {}", msg),
            ApiError::NotFound { kind, id } => write!(f, "{} {} not found", kind, id),
            ApiError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

/// JSON error body returned to clients.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_failed"),
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Store(e) => {
                tracing::error!("store failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "store_failure")
            }
        };
        let message = self.to_string();
        (status, Json(ErrorBody { error, message })).into_response()
    }
}
