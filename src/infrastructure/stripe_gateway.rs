use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{
    error::DomainError,
    services::payment_gateway::{PaymentGateway, PaymentIntent},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_ENDPOINT: &str = "https://api.stripe.com/v1/payment_intents";

#[derive(Clone)]
pub struct StripePaymentGateway {
    client: reqwest::Client,
    secret_key: String,
    endpoint: String,
}

impl StripePaymentGateway {
    pub fn new(secret_key: String) -> Self {
        Self::with_endpoint(secret_key, DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(secret_key: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
            endpoint,
        }
    }
}

#[derive(Deserialize)]
struct IntentResponse {
    client_secret: String,
}

fn map_transport_error(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::UpstreamTimeout("payment processor")
    } else {
        DomainError::UpstreamFailure(err.to_string())
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, DomainError> {
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(DomainError::UpstreamFailure(format!(
                "payment processor returned {}",
                response.status()
            )));
        }

        let body: IntentResponse = response.json().await.map_err(map_transport_error)?;
        Ok(PaymentIntent {
            client_secret: body.client_secret,
        })
    }
}
