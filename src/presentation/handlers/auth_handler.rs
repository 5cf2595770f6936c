use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};

use crate::{
    domain::services::token_service::{TokenIssuer, TokenVerifier},
    presentation::error::ApiError,
    usecase::auth_usecase::AuthUsecase,
};

/// json for token issuance request
#[derive(Serialize, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// json for token issuance response
#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

pub struct AppState<I: TokenIssuer, V: TokenVerifier> {
    pub auth: Arc<AuthUsecase<I, V>>,
}

impl<I: TokenIssuer, V: TokenVerifier> Clone for AppState<I, V> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
        }
    }
}

pub fn create_auth_router<I, V>(auth: Arc<AuthUsecase<I, V>>) -> Router
where
    I: TokenIssuer + 'static,
    V: TokenVerifier + 'static,
{
    Router::new()
        .route("/jwt", post(issue_token::<I, V>))
        .with_state(AppState { auth })
}

/// handler function for credential issuance
async fn issue_token<I: TokenIssuer, V: TokenVerifier>(
    State(state): State<AppState<I, V>>,
    Json(payload): Json<TokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.auth.issue_token(payload.email)?;
    Ok((StatusCode::OK, Json(TokenResponse { token })))
}
