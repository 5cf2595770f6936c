use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::camp::{Camp, CampPage, CampSort, PageRequest},
};

#[async_trait]
pub trait CampRepository {
    async fn insert(&self, camp: &Camp) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Camp>, RepositoryError>;
    /// Case-insensitive substring search OR-combined over the textual
    /// fields (the contract is [`Camp::matches`]), with optional pagination
    /// and sorting. Always reports the total matching count.
    async fn search(
        &self,
        filter: Option<&str>,
        page: Option<PageRequest>,
        sort: Option<CampSort>,
    ) -> Result<CampPage, RepositoryError>;
    async fn popular(&self, limit: u64) -> Result<Vec<Camp>, RepositoryError>;
    /// Replace-or-insert. On conflict every column except the participant
    /// counter is replaced; a fresh insert starts the counter at zero.
    async fn upsert(&self, camp: &Camp) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// Single atomic +1 on the participant counter. `NotFound` when no camp
    /// has this id.
    async fn increment_count(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn decrement_count(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;
}
