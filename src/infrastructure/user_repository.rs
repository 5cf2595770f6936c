use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

use crate::domain::{
    error::RepositoryError,
    models::{
        identity::Role,
        user::{ProfileUpdate, User},
    },
    repositories::user_repository::UserRepository,
};
use entity::users;

#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: users::Model) -> User {
    User::reconstruct(
        model.id,
        model.email,
        model.name,
        Role::parse(&model.role),
        model.image,
        model.address,
        model.phone,
        model.created_at.with_timezone(&Utc),
    )
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(user.map(to_domain))
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let model = users::ActiveModel {
            id: Set(user.id()),
            email: Set(user.email().to_string()),
            name: Set(user.name().to_string()),
            role: Set(user.role().as_str().to_string()),
            image: Set(user.image().map(str::to_string)),
            address: Set(user.address().map(str::to_string)),
            phone: Set(user.phone().map(str::to_string)),
            created_at: Set(user.created_at().fixed_offset()),
        };
        users::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn update_profile(
        &self,
        email: &str,
        update: &ProfileUpdate,
    ) -> Result<(), RepositoryError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        // role is deliberately never written here
        let mut active: users::ActiveModel = model.into();
        if let Some(name) = &update.name {
            active.name = Set(name.clone());
        }
        if let Some(image) = &update.image {
            active.image = Set(Some(image.clone()));
        }
        if let Some(address) = &update.address {
            active.address = Set(Some(address.clone()));
        }
        if let Some(phone) = &update.phone {
            active.phone = Set(Some(phone.clone()));
        }
        users::Entity::update(active)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        users::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}
