use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        models::camp::{Camp, CampSort, PageRequest},
        repositories::{camp_repository::CampRepository, user_repository::UserRepository},
        services::token_service::{TokenIssuer, TokenVerifier},
    },
    presentation::{error::ApiError, extract::Bearer},
    usecase::{
        auth_usecase::AuthUsecase,
        camp_usecase::{CampDraft, CampUsecase},
    },
};

// Request

/// json for camp create/update
#[derive(Serialize, Deserialize)]
pub struct CampRequest {
    pub name: String,
    pub organizer: String,
    pub location: String,
    pub date: String,
    pub price: f64,
    pub description: String,
}

impl From<CampRequest> for CampDraft {
    fn from(request: CampRequest) -> Self {
        Self {
            name: request.name,
            organizer: request.organizer,
            location: request.location,
            date: request.date,
            price: request.price,
            description: request.description,
        }
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort: Option<String>,
}

#[derive(Deserialize)]
pub struct PopularQuery {
    pub limit: Option<u64>,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct CampResponse {
    pub id: String,
    pub name: String,
    pub organizer: String,
    pub location: String,
    pub date: String,
    pub price: f64,
    pub participant_count: i32,
    pub description: String,
}

impl From<Camp> for CampResponse {
    fn from(camp: Camp) -> Self {
        Self {
            id: camp.id().to_string(),
            name: camp.name().to_string(),
            organizer: camp.organizer().to_string(),
            location: camp.location().to_string(),
            date: camp.date().to_string(),
            price: camp.price(),
            participant_count: camp.participant_count(),
            description: camp.description().to_string(),
        }
    }
}

/// page of camps plus the total matching count
#[derive(Serialize, Deserialize)]
pub struct CampListResponse {
    pub camps: Vec<CampResponse>,
    pub total: u64,
}

pub struct AppState<C: CampRepository, U: UserRepository, I: TokenIssuer, V: TokenVerifier> {
    pub camps: Arc<CampUsecase<C, U>>,
    pub auth: Arc<AuthUsecase<I, V>>,
}

impl<C: CampRepository, U: UserRepository, I: TokenIssuer, V: TokenVerifier> Clone
    for AppState<C, U, I, V>
{
    fn clone(&self) -> Self {
        Self {
            camps: self.camps.clone(),
            auth: self.auth.clone(),
        }
    }
}

pub fn create_camp_router<C, U, I, V>(
    camps: Arc<CampUsecase<C, U>>,
    auth: Arc<AuthUsecase<I, V>>,
) -> Router
where
    C: CampRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    I: TokenIssuer + 'static,
    V: TokenVerifier + 'static,
{
    Router::new()
        .route("/camps", post(create_camp::<C, U, I, V>))
        .route("/camps", get(search_camps::<C, U, I, V>))
        .route("/camps/popular", get(popular_camps::<C, U, I, V>))
        .route("/camps/{id}", get(get_camp::<C, U, I, V>))
        .route("/camps/{id}", put(update_camp::<C, U, I, V>))
        .route("/camps/{id}", delete(delete_camp::<C, U, I, V>))
        .with_state(AppState { camps, auth })
}

async fn create_camp<
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<C, U, I, V>>,
    Bearer(token): Bearer,
    Json(payload): Json<CampRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let camp = state.camps.create(&claim, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(CampResponse::from(camp))))
}

/// open catalog search: no credential required
async fn search_camps<
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<C, U, I, V>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.page.map(|page| PageRequest::new(page, query.size));
    let sort = query.sort.as_deref().and_then(CampSort::from_key);
    let result = state
        .camps
        .search(query.search.as_deref(), page, sort)
        .await?;
    Ok((
        StatusCode::OK,
        Json(CampListResponse {
            camps: result.camps.into_iter().map(CampResponse::from).collect(),
            total: result.total,
        }),
    ))
}

async fn popular_camps<
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<C, U, I, V>>,
    Query(query): Query<PopularQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let camps = state.camps.popular(query.limit).await?;
    Ok((
        StatusCode::OK,
        Json(
            camps
                .into_iter()
                .map(CampResponse::from)
                .collect::<Vec<_>>(),
        ),
    ))
}

async fn get_camp<
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<C, U, I, V>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let camp = state.camps.get(id).await?;
    Ok((StatusCode::OK, Json(CampResponse::from(camp))))
}

async fn update_camp<
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<C, U, I, V>>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(payload): Json<CampRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let camp = state.camps.update(&claim, id, payload.into()).await?;
    Ok((StatusCode::OK, Json(CampResponse::from(camp))))
}

async fn delete_camp<
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<C, U, I, V>>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    state.camps.delete(&claim, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
