use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::error::DomainError;

/// Domain error wrapped for the HTTP boundary.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
            DomainError::InvalidEmail
            | DomainError::EmptyName
            | DomainError::NegativePrice
            | DomainError::InvalidRating => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            DomainError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            DomainError::Inconsistency { .. }
            | DomainError::Repository(_)
            | DomainError::TokenSigning(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Storage details stay out of responses; they are logged instead.
    fn message(&self) -> String {
        match &self.0 {
            DomainError::Repository(err) => {
                tracing::error!(error = %err, "storage error");
                "A storage error occurred".to_string()
            }
            DomainError::TokenSigning(err) => {
                tracing::error!(error = %err, "token signing error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
