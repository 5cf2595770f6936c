use uuid::Uuid;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::{
            camp::{Camp, CampPage, CampSort, PageRequest},
            identity::IdentityClaim,
        },
        policy::Operation,
        repositories::{camp_repository::CampRepository, user_repository::UserRepository},
    },
    usecase::access_control::AccessControl,
};

pub const DEFAULT_POPULAR_LIMIT: u64 = 6;

#[derive(Debug, Clone)]
pub struct CampDraft {
    pub name: String,
    pub organizer: String,
    pub location: String,
    pub date: String,
    pub price: f64,
    pub description: String,
}

pub struct CampUsecase<C: CampRepository, U: UserRepository> {
    camps: C,
    access: AccessControl<U>,
}

impl<C, U> CampUsecase<C, U>
where
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn new(camps: C, access: AccessControl<U>) -> Self {
        Self { camps, access }
    }

    pub async fn create(
        &self,
        claim: &IdentityClaim,
        draft: CampDraft,
    ) -> Result<Camp, DomainError> {
        self.access
            .authorize(Operation::CreateCamp, claim, None)
            .await?;
        let camp = Camp::new(
            Uuid::new_v4(),
            draft.name,
            draft.organizer,
            draft.location,
            draft.date,
            draft.price,
            draft.description,
        )?;
        self.camps.insert(&camp).await?;
        Ok(camp)
    }

    pub async fn search(
        &self,
        filter: Option<&str>,
        page: Option<PageRequest>,
        sort: Option<CampSort>,
    ) -> Result<CampPage, DomainError> {
        Ok(self.camps.search(filter, page, sort).await?)
    }

    pub async fn popular(&self, limit: Option<u64>) -> Result<Vec<Camp>, DomainError> {
        Ok(self
            .camps
            .popular(limit.unwrap_or(DEFAULT_POPULAR_LIMIT))
            .await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Camp, DomainError> {
        self.camps
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("camp"))
    }

    /// Replace-or-insert: an existing camp is rewritten wholesale (counter
    /// preserved by the store), an unknown id creates a fresh record.
    pub async fn update(
        &self,
        claim: &IdentityClaim,
        id: Uuid,
        draft: CampDraft,
    ) -> Result<Camp, DomainError> {
        self.access
            .authorize(Operation::UpdateCamp, claim, None)
            .await?;
        let camp = Camp::new(
            id,
            draft.name,
            draft.organizer,
            draft.location,
            draft.date,
            draft.price,
            draft.description,
        )?;
        self.camps.upsert(&camp).await?;
        Ok(camp)
    }

    /// No cascade: registrations referencing the camp are left in place.
    pub async fn delete(&self, claim: &IdentityClaim, id: Uuid) -> Result<(), DomainError> {
        self.access
            .authorize(Operation::DeleteCamp, claim, None)
            .await?;
        self.camps.delete(id).await.map_err(|err| match err {
            RepositoryError::NotFound => DomainError::NotFound("camp"),
            other => other.into(),
        })
    }
}
