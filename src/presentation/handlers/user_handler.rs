use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::user::ProfileUpdate,
        repositories::user_repository::UserRepository,
        services::token_service::{TokenIssuer, TokenVerifier},
    },
    presentation::{error::ApiError, extract::Bearer},
    usecase::{
        auth_usecase::AuthUsecase,
        user_usecase::{UpsertOutcome, UserDraft, UserUsecase},
    },
};

// Request

/// json for the idempotent user upsert
#[derive(Serialize, Deserialize)]
pub struct UpsertUserRequest {
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// json for the self-service profile update
#[derive(Serialize, Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct UpsertUserResponse {
    pub inserted_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct AdminCheckResponse {
    pub admin: bool,
}

pub struct AppState<U: UserRepository, I: TokenIssuer, V: TokenVerifier> {
    pub users: Arc<UserUsecase<U>>,
    pub auth: Arc<AuthUsecase<I, V>>,
}

impl<U: UserRepository, I: TokenIssuer, V: TokenVerifier> Clone for AppState<U, I, V> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            auth: self.auth.clone(),
        }
    }
}

pub fn create_user_router<U, I, V>(
    users: Arc<UserUsecase<U>>,
    auth: Arc<AuthUsecase<I, V>>,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    I: TokenIssuer + 'static,
    V: TokenVerifier + 'static,
{
    Router::new()
        .route("/users", post(upsert_user::<U, I, V>))
        .route("/users/{email}", patch(update_profile::<U, I, V>))
        .route("/users/admin/{email}", get(check_admin::<U, I, V>))
        .with_state(AppState { users, auth })
}

/// handler for the idempotent upsert: a second call with the same e-mail
/// reports "already exists" and no new identifier
async fn upsert_user<U: UserRepository + Send + Sync, I: TokenIssuer, V: TokenVerifier>(
    State(state): State<AppState<U, I, V>>,
    Json(payload): Json<UpsertUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .users
        .upsert(UserDraft {
            email: payload.email,
            name: payload.name,
            image: payload.image,
            address: payload.address,
            phone: payload.phone,
        })
        .await?;
    Ok(match outcome {
        UpsertOutcome::Created(user) => (
            StatusCode::CREATED,
            Json(UpsertUserResponse {
                inserted_id: Some(user.id().to_string()),
                message: None,
            }),
        ),
        UpsertOutcome::AlreadyExists => (
            StatusCode::OK,
            Json(UpsertUserResponse {
                inserted_id: None,
                message: Some("Already exist".to_string()),
            }),
        ),
    })
}

async fn update_profile<U: UserRepository + Send + Sync, I: TokenIssuer, V: TokenVerifier>(
    State(state): State<AppState<U, I, V>>,
    Bearer(token): Bearer,
    Path(email): Path<String>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    state
        .users
        .update_profile(
            &claim,
            &email,
            ProfileUpdate {
                name: payload.name,
                image: payload.image,
                address: payload.address,
                phone: payload.phone,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn check_admin<U: UserRepository + Send + Sync, I: TokenIssuer, V: TokenVerifier>(
    State(state): State<AppState<U, I, V>>,
    Bearer(token): Bearer,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let admin = state.users.is_admin(&claim, &email).await?;
    Ok((StatusCode::OK, Json(AdminCheckResponse { admin })))
}
