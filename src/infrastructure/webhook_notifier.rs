use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    error::DomainError,
    services::notification_service::{ContactMessage, NotificationRelay},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Posts contact messages to a fixed webhook destination.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl NotificationRelay for WebhookNotifier {
    async fn relay(&self, message: &ContactMessage) -> Result<(), DomainError> {
        let response = self
            .client
            .post(&self.url)
            .json(message)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    DomainError::UpstreamTimeout("notification relay")
                } else {
                    DomainError::UpstreamFailure(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(DomainError::UpstreamFailure(format!(
                "notification relay returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
