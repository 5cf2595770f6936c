use async_trait::async_trait;

use crate::domain::{error::RepositoryError, models::review::Review};

#[async_trait]
pub trait ReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Review>, RepositoryError>;
}
