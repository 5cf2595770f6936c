use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Best-effort delivery to a fixed destination. Not part of the
/// consistency model; a failure never touches stored state.
#[async_trait]
pub trait NotificationRelay {
    async fn relay(&self, message: &ContactMessage) -> Result<(), DomainError>;
}
