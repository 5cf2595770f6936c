use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::services::notification_service::{ContactMessage, NotificationRelay},
    presentation::error::ApiError,
    usecase::contact_usecase::ContactUsecase,
};

#[derive(Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub struct AppState<N: NotificationRelay> {
    pub contact: Arc<ContactUsecase<N>>,
}

impl<N: NotificationRelay> Clone for AppState<N> {
    fn clone(&self) -> Self {
        Self {
            contact: self.contact.clone(),
        }
    }
}

pub fn create_contact_router<N>(contact: Arc<ContactUsecase<N>>) -> Router
where
    N: NotificationRelay + Send + Sync + 'static,
{
    Router::new()
        .route("/contact", post(send_message::<N>))
        .with_state(AppState { contact })
}

/// accepts the message once the relay call has been handed off
async fn send_message<N: NotificationRelay + Send + Sync>(
    State(state): State<AppState<N>>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .contact
        .send(ContactMessage {
            name: payload.name,
            email: payload.email,
            message: payload.message,
        })
        .await?;
    Ok(StatusCode::ACCEPTED)
}
