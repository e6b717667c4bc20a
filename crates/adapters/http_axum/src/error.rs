//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use estore_domain::error::{EstoreError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`EstoreError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(EstoreError);

impl From<EstoreError> for ApiError {
    fn from(err: EstoreError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    /// The domain error behind this response.
    #[must_use]
    pub fn kind(&self) -> &EstoreError {
        &self.0
    }

    /// Status code this error is answered with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            EstoreError::Validation(_) => StatusCode::BAD_REQUEST,
            EstoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            EstoreError::NotFound(_) => StatusCode::NOT_FOUND,
            EstoreError::Conflict(_) | EstoreError::InvariantViolation(_) => StatusCode::CONFLICT,
            EstoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            EstoreError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                "internal server error".to_string()
            }
            EstoreError::InvariantViolation(err) => {
                tracing::warn!(error = %err, "default address invariant rejected a write");
                err.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
