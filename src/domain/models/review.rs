use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct Review {
    id: Uuid,
    camp_name: String,
    reviewer_name: String,
    reviewer_email: String,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        id: Uuid,
        camp_name: String,
        reviewer_name: String,
        reviewer_email: String,
        rating: i32,
        comment: String,
    ) -> Result<Self, DomainError> {
        if reviewer_name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if !(1..=5).contains(&rating) {
            return Err(DomainError::InvalidRating);
        }
        Ok(Self {
            id,
            camp_name,
            reviewer_name,
            reviewer_email,
            rating,
            comment,
            created_at: Utc::now(),
        })
    }

    pub fn reconstruct(
        id: Uuid,
        camp_name: String,
        reviewer_name: String,
        reviewer_email: String,
        rating: i32,
        comment: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            camp_name,
            reviewer_name,
            reviewer_email,
            rating,
            comment,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn camp_name(&self) -> &str {
        &self.camp_name
    }
    pub fn reviewer_name(&self) -> &str {
        &self.reviewer_name
    }
    pub fn reviewer_email(&self) -> &str {
        &self.reviewer_email
    }
    pub fn rating(&self) -> i32 {
        self.rating
    }
    pub fn comment(&self) -> &str {
        &self.comment
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
