//! Translation of domain errors into HTTP responses.

use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::PreconditionFailed { .. } => StatusCode::PRECONDITION_FAILED,
            DomainError::NotModified => StatusCode::NOT_MODIFIED,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let DomainError::NotModified = self {
            debug!("Responding 304 Not Modified");
            return (status, Body::empty()).into_response();
        }

        warn!("Request rejected with {}: {}", status, self);
        (status, self.to_string()).into_response()
    }
}

/// Malformed JSON bodies are reported like any other invalid input
pub fn json_rejection(rejection: JsonRejection) -> DomainError {
    DomainError::Validation(rejection.body_text())
}
