use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, Func, OnConflict},
};
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::camp::{Camp, CampPage, CampSort, PageRequest},
    repositories::camp_repository::CampRepository,
};
use entity::camps;

#[derive(Clone)]
pub struct PostgresCampRepository {
    db: DatabaseConnection,
}

impl PostgresCampRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: camps::Model) -> Camp {
    Camp::reconstruct(
        model.id,
        model.name,
        model.organizer,
        model.location,
        model.date,
        model.price,
        model.participant_count,
        model.description,
    )
}

fn active_model(camp: &Camp) -> camps::ActiveModel {
    camps::ActiveModel {
        id: Set(camp.id()),
        name: Set(camp.name().to_string()),
        organizer: Set(camp.organizer().to_string()),
        location: Set(camp.location().to_string()),
        date: Set(camp.date().to_string()),
        price: Set(camp.price()),
        participant_count: Set(camp.participant_count()),
        description: Set(camp.description().to_string()),
    }
}

/// SQL rendition of [`Camp::matches`]: lower(field) LIKE %filter%,
/// OR-combined across the searchable columns.
fn filter_condition(filter: &str) -> Condition {
    let pattern = format!("%{}%", filter.to_lowercase());
    let mut condition = Condition::any();
    for column in [
        camps::Column::Name,
        camps::Column::Organizer,
        camps::Column::Location,
        camps::Column::Date,
        camps::Column::Description,
    ] {
        condition = condition.add(Expr::expr(Func::lower(Expr::col(column))).like(pattern.clone()));
    }
    condition
}

#[async_trait]
impl CampRepository for PostgresCampRepository {
    async fn insert(&self, camp: &Camp) -> Result<(), RepositoryError> {
        camps::Entity::insert(active_model(camp))
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Camp>, RepositoryError> {
        let camp = camps::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(camp.map(to_domain))
    }

    async fn search(
        &self,
        filter: Option<&str>,
        page: Option<PageRequest>,
        sort: Option<CampSort>,
    ) -> Result<CampPage, RepositoryError> {
        let mut query = camps::Entity::find();
        if let Some(filter) = filter {
            query = query.filter(filter_condition(filter));
        }
        query = match sort {
            Some(CampSort::PriceAsc) => query.order_by_asc(camps::Column::Price),
            Some(CampSort::PriceDesc) => query.order_by_desc(camps::Column::Price),
            Some(CampSort::NameAsc) => query.order_by_asc(camps::Column::Name),
            None => query,
        };

        match page {
            Some(page) => {
                let paginator = query.paginate(&self.db, page.size());
                let total = paginator
                    .num_items()
                    .await
                    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
                let models = paginator
                    .fetch_page(page.index())
                    .await
                    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
                Ok(CampPage {
                    camps: models.into_iter().map(to_domain).collect(),
                    total,
                })
            }
            None => {
                let models = query
                    .all(&self.db)
                    .await
                    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
                let total = models.len() as u64;
                Ok(CampPage {
                    camps: models.into_iter().map(to_domain).collect(),
                    total,
                })
            }
        }
    }

    async fn popular(&self, limit: u64) -> Result<Vec<Camp>, RepositoryError> {
        let models = camps::Entity::find()
            .order_by_desc(camps::Column::ParticipantCount)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn upsert(&self, camp: &Camp) -> Result<(), RepositoryError> {
        // the participant counter is excluded from the conflict update so a
        // rewrite cannot clobber the running count
        camps::Entity::insert(active_model(camp))
            .on_conflict(
                OnConflict::column(camps::Column::Id)
                    .update_columns([
                        camps::Column::Name,
                        camps::Column::Organizer,
                        camps::Column::Location,
                        camps::Column::Date,
                        camps::Column::Price,
                        camps::Column::Description,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = camps::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn increment_count(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = camps::Entity::update_many()
            .col_expr(
                camps::Column::ParticipantCount,
                Expr::col(camps::Column::ParticipantCount).add(1),
            )
            .filter(camps::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn decrement_count(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = camps::Entity::update_many()
            .col_expr(
                camps::Column::ParticipantCount,
                Expr::col(camps::Column::ParticipantCount).sub(1),
            )
            .filter(camps::Column::Id.eq(id))
            .filter(camps::Column::ParticipantCount.gt(0))
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        camps::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}
