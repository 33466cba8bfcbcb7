use crate::db::DbPool;
use crate::entities::{customer, customer_plan, plan, MembershipStatus};
use crate::errors::ServiceError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Manages the customer↔plan association as a first-class joined entity.
#[derive(Clone)]
pub struct MembershipService {
    db: Arc<DbPool>,
}

impl MembershipService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Enrolls a customer in a plan. Linking an already-linked pair updates
    /// the status in place rather than creating a second row.
    #[instrument(skip(self))]
    pub async fn link_plan(
        &self,
        customer_id: i32,
        plan_id: i32,
        status: MembershipStatus,
    ) -> Result<customer_plan::Model, ServiceError> {
        self.ensure_customer(customer_id).await?;
        if plan::Entity::find_by_id(plan_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db)?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!(
                "Plan {} not found",
                plan_id
            )));
        }

        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let existing = customer_plan::Entity::find()
            .filter(customer_plan::Column::CustomerId.eq(customer_id))
            .filter(customer_plan::Column::PlanId.eq(plan_id))
            .one(&txn)
            .await
            .map_err(ServiceError::db)?;

        let link = match existing {
            Some(link) => {
                let mut active: customer_plan::ActiveModel = link.into();
                active.status = Set(status);
                active.update(&txn).await.map_err(ServiceError::db)?
            }
            None => customer_plan::ActiveModel {
                customer_id: Set(customer_id),
                plan_id: Set(plan_id),
                status: Set(status),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::db)?,
        };
        txn.commit().await.map_err(ServiceError::db)?;

        info!(customer_id, plan_id, status = %link.status, "customer linked to plan");
        Ok(link)
    }

    /// Returns the plans a customer is linked to with exactly the given
    /// status. The filter is required; there is no "all statuses" mode.
    #[instrument(skip(self))]
    pub async fn list_plans_for_customer(
        &self,
        customer_id: i32,
        status: MembershipStatus,
    ) -> Result<Vec<plan::Model>, ServiceError> {
        self.ensure_customer(customer_id).await?;

        let rows = customer_plan::Entity::find()
            .filter(customer_plan::Column::CustomerId.eq(customer_id))
            .filter(customer_plan::Column::Status.eq(status))
            .find_also_related(plan::Entity)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db)?;

        Ok(rows.into_iter().filter_map(|(_, plan)| plan).collect())
    }

    #[instrument(skip(self))]
    pub async fn unlink_plan(&self, customer_id: i32, plan_id: i32) -> Result<(), ServiceError> {
        let link = customer_plan::Entity::find()
            .filter(customer_plan::Column::CustomerId.eq(customer_id))
            .filter(customer_plan::Column::PlanId.eq(plan_id))
            .one(&*self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::NotFound("Customer plan not found".to_string()))?;

        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        link.delete(&txn).await.map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;

        info!(customer_id, plan_id, "customer unlinked from plan");
        Ok(())
    }

    async fn ensure_customer(&self, customer_id: i32) -> Result<(), ServiceError> {
        customer::Entity::find_by_id(customer_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db)?
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", customer_id)))
    }
}
