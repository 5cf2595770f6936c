use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{domain::error::DomainError, presentation::error::ApiError};

/// Raw token pulled from an `Authorization: Bearer <token>` header. A
/// missing or malformed header rejects the request before any handler
/// logic runs; verification itself happens in the auth usecase.
pub struct Bearer(pub String);

impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::from(DomainError::Unauthenticated))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::from(DomainError::Unauthenticated))?;
        Ok(Self(token.to_string()))
    }
}
