use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{ProfileUpdate, User},
};

#[async_trait]
pub trait UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;
    /// Updates only the self-service profile fields; the role column is
    /// untouched by design.
    async fn update_profile(
        &self,
        email: &str,
        update: &ProfileUpdate,
    ) -> Result<(), RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;
}
