use crate::db::DbPool;
use crate::entities::{customer, transaction};
use crate::errors::ServiceError;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set, TransactionTrait};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

/// Upper bound on a single page of transactions.
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct TransactionCreate {
    pub amount: i64,
    #[validate(length(min = 1, max = 255, message = "description must not be empty"))]
    pub description: String,
    pub customer_id: i32,
}

/// Service for recording and listing customer transactions. Transactions are
/// append-only; there is no update or delete operation.
#[derive(Clone)]
pub struct TransactionService {
    db: Arc<DbPool>,
}

impl TransactionService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Records a transaction. The customer existence check runs inside the
    /// same database transaction as the insert, so a rejected create leaves
    /// no row behind.
    #[instrument(skip(self))]
    pub async fn create_transaction(
        &self,
        payload: TransactionCreate,
    ) -> Result<transaction::Model, ServiceError> {
        payload.validate()?;

        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        if customer::Entity::find_by_id(payload.customer_id)
            .one(&txn)
            .await
            .map_err(ServiceError::db)?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!(
                "Customer {} not found",
                payload.customer_id
            )));
        }

        let created = transaction::ActiveModel {
            amount: Set(payload.amount),
            description: Set(payload.description),
            customer_id: Set(payload.customer_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(ServiceError::db)?;
        txn.commit().await.map_err(ServiceError::db)?;

        info!(
            transaction_id = created.id,
            customer_id = created.customer_id,
            "transaction recorded"
        );
        Ok(created)
    }

    /// Offset-paginated listing in creation (id) order.
    #[instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<transaction::Model>, ServiceError> {
        transaction::Entity::find()
            .order_by_asc(transaction::Column::Id)
            .offset(skip)
            .limit(limit.min(MAX_PAGE_SIZE))
            .all(&*self.db)
            .await
            .map_err(ServiceError::db)
    }
}
