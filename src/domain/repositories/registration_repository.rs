use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::registration::{PaymentStatus, Registration, RegistrationStatus},
};

#[async_trait]
pub trait RegistrationRepository {
    async fn insert(&self, registration: &Registration) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Registration>, RepositoryError>;
    async fn list_by_participant(&self, email: &str)
    -> Result<Vec<Registration>, RepositoryError>;
    async fn set_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<(), RepositoryError>;
    async fn set_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;
    async fn count_by_payment_status(
        &self,
        status: PaymentStatus,
    ) -> Result<u64, RepositoryError>;
}
