use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{error::RepositoryError, models::payment::Payment};

#[async_trait]
pub trait PaymentRepository {
    async fn insert(&self, payment: &Payment) -> Result<(), RepositoryError>;
    async fn list_by_participant(&self, email: &str) -> Result<Vec<Payment>, RepositoryError>;
    /// Marks every payment referencing the registration as confirmed.
    /// `NotFound` when no payment references it.
    async fn confirm_for_registration(&self, registration_id: Uuid)
    -> Result<(), RepositoryError>;
    /// Revenue aggregate over all payment amounts.
    async fn total_amount(&self) -> Result<f64, RepositoryError>;
}
