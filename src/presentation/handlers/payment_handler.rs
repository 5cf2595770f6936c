use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        models::payment::Payment,
        repositories::{
            camp_repository::CampRepository, payment_repository::PaymentRepository,
            registration_repository::RegistrationRepository, user_repository::UserRepository,
        },
        services::{payment_gateway::PaymentGateway, token_service::{TokenIssuer, TokenVerifier}},
    },
    presentation::{error::ApiError, extract::Bearer},
    usecase::{
        auth_usecase::AuthUsecase,
        payment_usecase::{PaymentDraft, PaymentUsecase},
    },
};

// Request

#[derive(Serialize, Deserialize)]
pub struct IntentRequest {
    pub camp_id: Uuid,
}

#[derive(Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub registration_id: Uuid,
    pub camp_name: String,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct IntentResponse {
    pub client_secret: String,
}

#[derive(Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub registration_id: String,
    pub camp_name: String,
    pub participant_email: String,
    pub amount: f64,
    pub status: String,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id().to_string(),
            registration_id: payment.registration_id().to_string(),
            camp_name: payment.camp_name().to_string(),
            participant_email: payment.participant_email().to_string(),
            amount: payment.amount(),
            status: payment.state().as_str().to_string(),
            created_at: payment.created_at().to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct PaymentHistoryResponse {
    pub all: Vec<PaymentResponse>,
    pub filtered: Vec<PaymentResponse>,
}

pub struct AppState<
    P: PaymentRepository,
    R: RegistrationRepository,
    C: CampRepository,
    G: PaymentGateway,
    U: UserRepository,
    I: TokenIssuer,
    V: TokenVerifier,
> {
    pub payments: Arc<PaymentUsecase<P, R, C, G, U>>,
    pub auth: Arc<AuthUsecase<I, V>>,
}

impl<
    P: PaymentRepository,
    R: RegistrationRepository,
    C: CampRepository,
    G: PaymentGateway,
    U: UserRepository,
    I: TokenIssuer,
    V: TokenVerifier,
> Clone for AppState<P, R, C, G, U, I, V>
{
    fn clone(&self) -> Self {
        Self {
            payments: self.payments.clone(),
            auth: self.auth.clone(),
        }
    }
}

pub fn create_payment_router<P, R, C, G, U, I, V>(
    payments: Arc<PaymentUsecase<P, R, C, G, U>>,
    auth: Arc<AuthUsecase<I, V>>,
) -> Router
where
    P: PaymentRepository + Send + Sync + 'static,
    R: RegistrationRepository + Send + Sync + 'static,
    C: CampRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    I: TokenIssuer + 'static,
    V: TokenVerifier + 'static,
{
    Router::new()
        .route(
            "/payments/intent",
            post(create_intent::<P, R, C, G, U, I, V>),
        )
        .route("/payments", post(record_payment::<P, R, C, G, U, I, V>))
        .route("/payments/mine", get(history::<P, R, C, G, U, I, V>))
        .with_state(AppState { payments, auth })
}

async fn create_intent<
    P: PaymentRepository + Send + Sync,
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<P, R, C, G, U, I, V>>,
    Bearer(token): Bearer,
    Json(payload): Json<IntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let intent = state.payments.create_intent(&claim, payload.camp_id).await?;
    Ok((
        StatusCode::OK,
        Json(IntentResponse {
            client_secret: intent.client_secret,
        }),
    ))
}

async fn record_payment<
    P: PaymentRepository + Send + Sync,
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<P, R, C, G, U, I, V>>,
    Bearer(token): Bearer,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let payment = state
        .payments
        .record_payment(
            &claim,
            PaymentDraft {
                registration_id: payload.registration_id,
                camp_name: payload.camp_name,
                amount: payload.amount,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

async fn history<
    P: PaymentRepository + Send + Sync,
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<P, R, C, G, U, I, V>>,
    Bearer(token): Bearer,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let history = state
        .payments
        .history(&claim, query.filter.as_deref())
        .await?;
    Ok((
        StatusCode::OK,
        Json(PaymentHistoryResponse {
            all: history.all.into_iter().map(PaymentResponse::from).collect(),
            filtered: history
                .filtered
                .into_iter()
                .map(PaymentResponse::from)
                .collect(),
        }),
    ))
}
