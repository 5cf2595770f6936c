use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::stats::{AdminStats, UserStats},
        repositories::{
            camp_repository::CampRepository, payment_repository::PaymentRepository,
            registration_repository::RegistrationRepository, user_repository::UserRepository,
        },
        services::token_service::{TokenIssuer, TokenVerifier},
    },
    presentation::{error::ApiError, extract::Bearer},
    usecase::{auth_usecase::AuthUsecase, stats_usecase::StatsUsecase},
};

#[derive(Serialize, Deserialize)]
pub struct UserStatsResponse {
    pub total_camps: u64,
    pub total_spent: f64,
    pub confirmed_count: u64,
    pub pending_count: u64,
    pub paid_count: u64,
    pub unpaid_count: u64,
}

impl From<UserStats> for UserStatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            total_camps: stats.total_camps,
            total_spent: stats.total_spent,
            confirmed_count: stats.confirmed_count,
            pending_count: stats.pending_count,
            paid_count: stats.paid_count,
            unpaid_count: stats.unpaid_count,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct AdminStatsResponse {
    pub total_camps: u64,
    pub total_users: u64,
    pub total_registrations: u64,
    pub paid_registrations: u64,
    pub unpaid_registrations: u64,
    pub total_revenue: f64,
}

impl From<AdminStats> for AdminStatsResponse {
    fn from(stats: AdminStats) -> Self {
        Self {
            total_camps: stats.total_camps,
            total_users: stats.total_users,
            total_registrations: stats.total_registrations,
            paid_registrations: stats.paid_registrations,
            unpaid_registrations: stats.unpaid_registrations,
            total_revenue: stats.total_revenue,
        }
    }
}

pub struct AppState<
    R: RegistrationRepository,
    P: PaymentRepository,
    C: CampRepository,
    U: UserRepository,
    I: TokenIssuer,
    V: TokenVerifier,
> {
    pub stats: Arc<StatsUsecase<R, P, C, U>>,
    pub auth: Arc<AuthUsecase<I, V>>,
}

impl<
    R: RegistrationRepository,
    P: PaymentRepository,
    C: CampRepository,
    U: UserRepository,
    I: TokenIssuer,
    V: TokenVerifier,
> Clone for AppState<R, P, C, U, I, V>
{
    fn clone(&self) -> Self {
        Self {
            stats: self.stats.clone(),
            auth: self.auth.clone(),
        }
    }
}

pub fn create_stats_router<R, P, C, U, I, V>(
    stats: Arc<StatsUsecase<R, P, C, U>>,
    auth: Arc<AuthUsecase<I, V>>,
) -> Router
where
    R: RegistrationRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    C: CampRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    I: TokenIssuer + 'static,
    V: TokenVerifier + 'static,
{
    Router::new()
        .route("/stats/me", get(user_stats::<R, P, C, U, I, V>))
        .route("/stats/admin", get(admin_stats::<R, P, C, U, I, V>))
        .with_state(AppState { stats, auth })
}

async fn user_stats<
    R: RegistrationRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, P, C, U, I, V>>,
    Bearer(token): Bearer,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let stats = state.stats.user_stats(&claim).await?;
    Ok((StatusCode::OK, Json(UserStatsResponse::from(stats))))
}

async fn admin_stats<
    R: RegistrationRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, P, C, U, I, V>>,
    Bearer(token): Bearer,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let stats = state.stats.admin_stats(&claim).await?;
    Ok((StatusCode::OK, Json(AdminStatsResponse::from(stats))))
}
