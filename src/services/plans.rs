use crate::db::DbPool;
use crate::entities::{customer_plan, plan};
use crate::errors::ServiceError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct PlanCreate {
    #[validate(length(min = 1, max = 120, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    pub description: Option<String>,
}

/// Service for managing subscription plans. Plans have no update operation;
/// changing one means delete and recreate.
#[derive(Clone)]
pub struct PlanService {
    db: Arc<DbPool>,
}

impl PlanService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_plan(&self, payload: PlanCreate) -> Result<plan::Model, ServiceError> {
        payload.validate()?;

        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let created = plan::ActiveModel {
            name: Set(payload.name),
            price: Set(payload.price),
            description: Set(payload.description),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;

        info!(plan_id = created.id, "plan created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_plan(&self, id: i32) -> Result<plan::Model, ServiceError> {
        plan::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::NotFound(format!("Plan {} not found", id)))
    }

    /// Lists all plans. Intentionally unpaginated; see DESIGN.md.
    #[instrument(skip(self))]
    pub async fn list_plans(&self) -> Result<Vec<plan::Model>, ServiceError> {
        plan::Entity::find()
            .order_by_asc(plan::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db)
    }

    /// Deletes a plan along with any membership rows that reference it.
    #[instrument(skip(self))]
    pub async fn delete_plan(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_plan(id).await?;

        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        customer_plan::Entity::delete_many()
            .filter(customer_plan::Column::PlanId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::db)?;
        existing.delete(&txn).await.map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;

        info!(plan_id = id, "plan deleted");
        Ok(())
    }
}
