use crate::domain::{
    error::DomainError,
    services::notification_service::{ContactMessage, NotificationRelay},
};

/// Contact-message relay. Delegates to the notification collaborator and
/// never touches stored state, so a relay failure cannot corrupt anything.
pub struct ContactUsecase<N: NotificationRelay> {
    relay: N,
}

impl<N: NotificationRelay + Send + Sync> ContactUsecase<N> {
    pub fn new(relay: N) -> Self {
        Self { relay }
    }

    pub async fn send(&self, message: ContactMessage) -> Result<(), DomainError> {
        self.relay.relay(&message).await
    }
}
