use uuid::Uuid;

use crate::{
    domain::{
        error::DomainError,
        models::{identity::IdentityClaim, review::Review},
        policy::Operation,
        repositories::{review_repository::ReviewRepository, user_repository::UserRepository},
    },
    usecase::access_control::AccessControl,
};

#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub camp_name: String,
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: String,
}

pub struct ReviewUsecase<V: ReviewRepository, U: UserRepository> {
    reviews: V,
    access: AccessControl<U>,
}

impl<V, U> ReviewUsecase<V, U>
where
    V: ReviewRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn new(reviews: V, access: AccessControl<U>) -> Self {
        Self { reviews, access }
    }

    pub async fn create(
        &self,
        claim: &IdentityClaim,
        draft: ReviewDraft,
    ) -> Result<Review, DomainError> {
        self.access
            .authorize(Operation::CreateReview, claim, None)
            .await?;
        let review = Review::new(
            Uuid::new_v4(),
            draft.camp_name,
            draft.reviewer_name,
            claim.as_str().to_string(),
            draft.rating,
            draft.comment,
        )?;
        self.reviews.insert(&review).await?;
        Ok(review)
    }

    pub async fn list(&self) -> Result<Vec<Review>, DomainError> {
        Ok(self.reviews.list_all().await?)
    }
}
