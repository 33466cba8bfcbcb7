use crate::db::DbPool;
use crate::entities::{customer, customer_plan, transaction};
use crate::errors::ServiceError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

/// Payload for creating a customer.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct CustomerCreate {
    #[validate(length(min = 1, max = 120, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(range(min = 0, max = 150, message = "age must be plausible"))]
    pub age: i32,
}

/// Partial update: only fields present in the payload are changed.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct CustomerUpdate {
    #[validate(length(min = 1, max = 120, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(range(min = 0, max = 150, message = "age must be plausible"))]
    pub age: Option<i32>,
}

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Creates a customer. The email pre-check is a fast-path reject; the
    /// unique index on `customers.email` is authoritative under concurrency.
    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        payload: CustomerCreate,
    ) -> Result<customer::Model, ServiceError> {
        payload.validate()?;

        let existing = customer::Entity::find()
            .filter(customer::Column::Email.eq(payload.email.as_str()))
            .one(&*self.db)
            .await
            .map_err(ServiceError::db)?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Customer with email {} already exists",
                payload.email
            )));
        }

        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let created = customer::ActiveModel {
            name: Set(payload.name),
            description: Set(payload.description),
            email: Set(payload.email),
            age: Set(payload.age),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;

        info!(customer_id = created.id, "customer created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i32) -> Result<customer::Model, ServiceError> {
        customer::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))
    }

    /// Lists all customers. Intentionally unpaginated; see DESIGN.md.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db)
    }

    /// Merges only the fields present in the payload into the stored row.
    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: i32,
        payload: CustomerUpdate,
    ) -> Result<customer::Model, ServiceError> {
        payload.validate()?;
        let existing = self.get_customer(id).await?;

        if let Some(email) = payload.email.as_deref() {
            if email != existing.email {
                let taken = customer::Entity::find()
                    .filter(customer::Column::Email.eq(email))
                    .one(&*self.db)
                    .await
                    .map_err(ServiceError::db)?;
                if taken.is_some() {
                    return Err(ServiceError::ValidationError(format!(
                        "Customer with email {} already exists",
                        email
                    )));
                }
            }
        }

        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let mut active: customer::ActiveModel = existing.into();
        if let Some(name) = payload.name {
            active.name = Set(name);
        }
        if let Some(description) = payload.description {
            active.description = Set(Some(description));
        }
        if let Some(email) = payload.email {
            active.email = Set(email);
        }
        if let Some(age) = payload.age {
            active.age = Set(age);
        }
        let updated = active.update(&txn).await.map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;

        info!(customer_id = updated.id, "customer updated");
        Ok(updated)
    }

    /// Deletes a customer. Membership rows are removed with it; customers
    /// that still own transactions are protected by a conflict error.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_customer(id).await?;

        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let owned = transaction::Entity::find()
            .filter(transaction::Column::CustomerId.eq(id))
            .count(&txn)
            .await
            .map_err(ServiceError::db)?;
        if owned > 0 {
            return Err(ServiceError::Conflict(format!(
                "Customer {} has {} transactions and cannot be deleted",
                id, owned
            )));
        }

        customer_plan::Entity::delete_many()
            .filter(customer_plan::Column::CustomerId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::db)?;
        existing.delete(&txn).await.map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;

        info!(customer_id = id, "customer deleted");
        Ok(())
    }
}
