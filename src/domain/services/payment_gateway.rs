use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Opaque client-side handle returned by the external payment processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// External payment processor. The core only shapes the request (amount in
/// minor units, currency) and passes the handle back.
#[async_trait]
pub trait PaymentGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, DomainError>;
}
