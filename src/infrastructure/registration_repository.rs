use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::registration::{Participant, PaymentStatus, Registration, RegistrationStatus},
    repositories::registration_repository::RegistrationRepository,
};
use entity::registrations;

#[derive(Clone)]
pub struct PostgresRegistrationRepository {
    db: DatabaseConnection,
}

impl PostgresRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: registrations::Model) -> Result<Registration, RepositoryError> {
    let status = RegistrationStatus::parse(&model.status).ok_or_else(|| {
        RepositoryError::DatabaseError(format!("unknown registration status: {}", model.status))
    })?;
    let payment_status = PaymentStatus::parse(&model.payment_status).ok_or_else(|| {
        RepositoryError::DatabaseError(format!("unknown payment status: {}", model.payment_status))
    })?;
    let participant = Participant::new(model.participant_name, model.participant_email)
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
    Ok(Registration::reconstruct(
        model.id,
        model.camp_id,
        model.camp_name,
        model.camp_fee,
        participant,
        status,
        payment_status,
        model.created_at.with_timezone(&Utc),
    ))
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn insert(&self, registration: &Registration) -> Result<(), RepositoryError> {
        let model = registrations::ActiveModel {
            id: Set(registration.id()),
            camp_id: Set(registration.camp_id()),
            camp_name: Set(registration.camp_name().to_string()),
            camp_fee: Set(registration.camp_fee()),
            participant_name: Set(registration.participant().name().to_string()),
            participant_email: Set(registration.participant().email().to_string()),
            status: Set(registration.status().as_str().to_string()),
            payment_status: Set(registration.payment_status().as_str().to_string()),
            created_at: Set(registration.created_at().fixed_offset()),
        };
        registrations::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>, RepositoryError> {
        let model = registrations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        model.map(to_domain).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Registration>, RepositoryError> {
        let models = registrations::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        models.into_iter().map(to_domain).collect()
    }

    async fn list_by_participant(
        &self,
        email: &str,
    ) -> Result<Vec<Registration>, RepositoryError> {
        let models = registrations::Entity::find()
            .filter(registrations::Column::ParticipantEmail.eq(email))
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        models.into_iter().map(to_domain).collect()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<(), RepositoryError> {
        let result = registrations::Entity::update_many()
            .col_expr(registrations::Column::Status, Expr::value(status.as_str()))
            .filter(registrations::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn set_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<(), RepositoryError> {
        let result = registrations::Entity::update_many()
            .col_expr(
                registrations::Column::PaymentStatus,
                Expr::value(status.as_str()),
            )
            .filter(registrations::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = registrations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        registrations::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn count_by_payment_status(
        &self,
        status: PaymentStatus,
    ) -> Result<u64, RepositoryError> {
        registrations::Entity::find()
            .filter(registrations::Column::PaymentStatus.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}
