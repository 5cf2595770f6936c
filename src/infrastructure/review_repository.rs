use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::{
    error::RepositoryError, models::review::Review,
    repositories::review_repository::ReviewRepository,
};
use entity::reviews;

#[derive(Clone)]
pub struct PostgresReviewRepository {
    db: DatabaseConnection,
}

impl PostgresReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), RepositoryError> {
        let model = reviews::ActiveModel {
            id: Set(review.id()),
            camp_name: Set(review.camp_name().to_string()),
            reviewer_name: Set(review.reviewer_name().to_string()),
            reviewer_email: Set(review.reviewer_email().to_string()),
            rating: Set(review.rating()),
            comment: Set(review.comment().to_string()),
            created_at: Set(review.created_at().fixed_offset()),
        };
        reviews::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Review>, RepositoryError> {
        let models = reviews::Entity::find()
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(models
            .into_iter()
            .map(|model| {
                Review::reconstruct(
                    model.id,
                    model.camp_name,
                    model.reviewer_name,
                    model.reviewer_email,
                    model.rating,
                    model.comment,
                    model.created_at.with_timezone(&Utc),
                )
            })
            .collect())
    }
}
