use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        models::registration::Registration,
        repositories::{
            camp_repository::CampRepository, payment_repository::PaymentRepository,
            registration_repository::RegistrationRepository, user_repository::UserRepository,
        },
        services::token_service::{TokenIssuer, TokenVerifier},
    },
    presentation::{error::ApiError, extract::Bearer},
    usecase::{auth_usecase::AuthUsecase, registration_usecase::RegistrationUsecase},
};

// Request

#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub camp_id: Uuid,
    pub participant_name: String,
}

#[derive(Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub id: String,
    pub camp_id: String,
    pub camp_name: String,
    pub camp_fee: f64,
    pub participant_name: String,
    pub participant_email: String,
    pub status: String,
    pub payment_status: String,
    pub created_at: String,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id().to_string(),
            camp_id: registration.camp_id().to_string(),
            camp_name: registration.camp_name().to_string(),
            camp_fee: registration.camp_fee(),
            participant_name: registration.participant().name().to_string(),
            participant_email: registration.participant().email().to_string(),
            status: registration.status().as_str().to_string(),
            payment_status: registration.payment_status().as_str().to_string(),
            created_at: registration.created_at().to_rfc3339(),
        }
    }
}

/// caller's registrations alongside the filter-narrowed subset
#[derive(Serialize, Deserialize)]
pub struct RegistrationListingResponse {
    pub all: Vec<RegistrationResponse>,
    pub filtered: Vec<RegistrationResponse>,
}

pub struct AppState<
    R: RegistrationRepository,
    C: CampRepository,
    P: PaymentRepository,
    U: UserRepository,
    I: TokenIssuer,
    V: TokenVerifier,
> {
    pub registrations: Arc<RegistrationUsecase<R, C, P, U>>,
    pub auth: Arc<AuthUsecase<I, V>>,
}

impl<
    R: RegistrationRepository,
    C: CampRepository,
    P: PaymentRepository,
    U: UserRepository,
    I: TokenIssuer,
    V: TokenVerifier,
> Clone for AppState<R, C, P, U, I, V>
{
    fn clone(&self) -> Self {
        Self {
            registrations: self.registrations.clone(),
            auth: self.auth.clone(),
        }
    }
}

pub fn create_registration_router<R, C, P, U, I, V>(
    registrations: Arc<RegistrationUsecase<R, C, P, U>>,
    auth: Arc<AuthUsecase<I, V>>,
) -> Router
where
    R: RegistrationRepository + Send + Sync + 'static,
    C: CampRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    I: TokenIssuer + 'static,
    V: TokenVerifier + 'static,
{
    Router::new()
        .route("/registrations", post(register::<R, C, P, U, I, V>))
        .route("/registrations", get(list_all::<R, C, P, U, I, V>))
        .route("/registrations/mine", get(list_mine::<R, C, P, U, I, V>))
        .route(
            "/registrations/{id}",
            get(get_registration::<R, C, P, U, I, V>),
        )
        .route(
            "/registrations/{id}/confirm",
            patch(confirm::<R, C, P, U, I, V>),
        )
        .route("/registrations/{id}", delete(cancel::<R, C, P, U, I, V>))
        .with_state(AppState {
            registrations,
            auth,
        })
}

async fn register<
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, C, P, U, I, V>>,
    Bearer(token): Bearer,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let registration = state
        .registrations
        .register(&claim, payload.camp_id, payload.participant_name)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(registration)),
    ))
}

/// administrator view over every registration
async fn list_all<
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, C, P, U, I, V>>,
    Bearer(token): Bearer,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let registrations = state
        .registrations
        .list_for_admin(&claim, query.filter.as_deref())
        .await?;
    Ok((
        StatusCode::OK,
        Json(
            registrations
                .into_iter()
                .map(RegistrationResponse::from)
                .collect::<Vec<_>>(),
        ),
    ))
}

async fn list_mine<
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, C, P, U, I, V>>,
    Bearer(token): Bearer,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let listing = state
        .registrations
        .list_for_user(&claim, query.filter.as_deref())
        .await?;
    Ok((
        StatusCode::OK,
        Json(RegistrationListingResponse {
            all: listing
                .all
                .into_iter()
                .map(RegistrationResponse::from)
                .collect(),
            filtered: listing
                .filtered
                .into_iter()
                .map(RegistrationResponse::from)
                .collect(),
        }),
    ))
}

async fn get_registration<
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, C, P, U, I, V>>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let registration = state.registrations.get_for_payment(&claim, id).await?;
    Ok((
        StatusCode::OK,
        Json(RegistrationResponse::from(registration)),
    ))
}

async fn confirm<
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, C, P, U, I, V>>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    state.registrations.confirm(&claim, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn cancel<
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, C, P, U, I, V>>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    state.registrations.cancel(&claim, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
