use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::review::Review,
        repositories::{review_repository::ReviewRepository, user_repository::UserRepository},
        services::token_service::{TokenIssuer, TokenVerifier},
    },
    presentation::{error::ApiError, extract::Bearer},
    usecase::{
        auth_usecase::AuthUsecase,
        review_usecase::{ReviewDraft, ReviewUsecase},
    },
};

#[derive(Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub camp_name: String,
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: String,
}

#[derive(Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: String,
    pub camp_name: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id().to_string(),
            camp_name: review.camp_name().to_string(),
            reviewer_name: review.reviewer_name().to_string(),
            reviewer_email: review.reviewer_email().to_string(),
            rating: review.rating(),
            comment: review.comment().to_string(),
            created_at: review.created_at().to_rfc3339(),
        }
    }
}

pub struct AppState<R: ReviewRepository, U: UserRepository, I: TokenIssuer, V: TokenVerifier> {
    pub reviews: Arc<ReviewUsecase<R, U>>,
    pub auth: Arc<AuthUsecase<I, V>>,
}

impl<R: ReviewRepository, U: UserRepository, I: TokenIssuer, V: TokenVerifier> Clone
    for AppState<R, U, I, V>
{
    fn clone(&self) -> Self {
        Self {
            reviews: self.reviews.clone(),
            auth: self.auth.clone(),
        }
    }
}

pub fn create_review_router<R, U, I, V>(
    reviews: Arc<ReviewUsecase<R, U>>,
    auth: Arc<AuthUsecase<I, V>>,
) -> Router
where
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    I: TokenIssuer + 'static,
    V: TokenVerifier + 'static,
{
    Router::new()
        .route("/reviews", post(create_review::<R, U, I, V>))
        .route("/reviews", get(list_reviews::<R, U, I, V>))
        .with_state(AppState { reviews, auth })
}

async fn create_review<
    R: ReviewRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, U, I, V>>,
    Bearer(token): Bearer,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.auth.authenticate(&token)?;
    let review = state
        .reviews
        .create(
            &claim,
            ReviewDraft {
                camp_name: payload.camp_name,
                reviewer_name: payload.reviewer_name,
                rating: payload.rating,
                comment: payload.comment,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

/// public testimonial wall
async fn list_reviews<
    R: ReviewRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    I: TokenIssuer,
    V: TokenVerifier,
>(
    State(state): State<AppState<R, U, I, V>>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = state.reviews.list().await?;
    Ok((
        StatusCode::OK,
        Json(
            reviews
                .into_iter()
                .map(ReviewResponse::from)
                .collect::<Vec<_>>(),
        ),
    ))
}
