//! Error types for the API
//!
//! Provides unified error handling using thiserror. Every failure is turned
//! into a status code and a JSON body at the handler boundary.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::{ErrorResponse, ValidationError};
use crate::store::StoreError;

// == API Error Enum ==
/// Unified error type for the request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Path parameter is not a well-formed object id
    #[error("The id '{0}' seems wrong")]
    InvalidId(String),

    /// Request body failed decoding or field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Well-formed id with no matching record
    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: String },

    /// The store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Not-found error for the given resource name.
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::Malformed(rejection.body_text()))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::InvalidId(id) => {
                warn!(id = %id, "Rejected malformed id");
                ErrorResponse::new("invalid_id", self.to_string())
            }
            ApiError::Validation(e) => {
                warn!(error = %e, "Rejected invalid payload");
                ErrorResponse::new("validation_error", e.to_string())
            }
            ApiError::NotFound { resource, id } => {
                warn!(resource = %resource, id = %id, "Record not found");
                ErrorResponse::new("not_found", self.to_string())
            }
            ApiError::Store(e) => {
                // Log the actual error, return generic message
                error!(error = %e, "Store error");
                ErrorResponse::new("internal_error", "an internal error occurred")
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
