use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::payment::{Payment, PaymentState},
    repositories::payment_repository::PaymentRepository,
};
use entity::payments;

#[derive(Clone)]
pub struct PostgresPaymentRepository {
    db: DatabaseConnection,
}

impl PostgresPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: payments::Model) -> Result<Payment, RepositoryError> {
    let state = PaymentState::parse(&model.status).ok_or_else(|| {
        RepositoryError::DatabaseError(format!("unknown payment state: {}", model.status))
    })?;
    Ok(Payment::reconstruct(
        model.id,
        model.registration_id,
        model.camp_name,
        model.participant_email,
        model.amount,
        state,
        model.created_at.with_timezone(&Utc),
    ))
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, payment: &Payment) -> Result<(), RepositoryError> {
        let model = payments::ActiveModel {
            id: Set(payment.id()),
            registration_id: Set(payment.registration_id()),
            camp_name: Set(payment.camp_name().to_string()),
            participant_email: Set(payment.participant_email().to_string()),
            amount: Set(payment.amount()),
            status: Set(payment.state().as_str().to_string()),
            created_at: Set(payment.created_at().fixed_offset()),
        };
        payments::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn list_by_participant(&self, email: &str) -> Result<Vec<Payment>, RepositoryError> {
        let models = payments::Entity::find()
            .filter(payments::Column::ParticipantEmail.eq(email))
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        models.into_iter().map(to_domain).collect()
    }

    async fn confirm_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let result = payments::Entity::update_many()
            .col_expr(
                payments::Column::Status,
                Expr::value(PaymentState::Confirmed.as_str()),
            )
            .filter(payments::Column::RegistrationId.eq(registration_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn total_amount(&self) -> Result<f64, RepositoryError> {
        let total: Option<Option<f64>> = payments::Entity::find()
            .select_only()
            .column_as(Expr::col(payments::Column::Amount).sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(total.flatten().unwrap_or(0.0))
    }
}
