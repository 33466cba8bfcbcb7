use crate::db::DbPool;
use crate::entities::{customer, transaction};
use crate::errors::ServiceError;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Derived invoice view. Never persisted; rebuilt on demand from the
/// customer's transactions, with the total computed rather than supplied.
#[derive(Clone, Debug, Serialize)]
pub struct Invoice {
    pub customer: customer::Model,
    pub transactions: Vec<transaction::Model>,
    pub total_amount: i64,
}

#[derive(Clone)]
pub struct InvoiceService {
    db: Arc<DbPool>,
}

impl InvoiceService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Aggregates a customer's transactions into an invoice view. An empty
    /// transaction set yields a zero total.
    #[instrument(skip(self))]
    pub async fn build_invoice(&self, customer_id: i32) -> Result<Invoice, ServiceError> {
        let customer = customer::Entity::find_by_id(customer_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", customer_id)))?;

        let transactions = transaction::Entity::find()
            .filter(transaction::Column::CustomerId.eq(customer_id))
            .order_by_asc(transaction::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db)?;

        let total_amount = total_of(&transactions);
        Ok(Invoice {
            customer,
            transactions,
            total_amount,
        })
    }
}

fn total_of(transactions: &[transaction::Model]) -> i64 {
    transactions.iter().map(|t| t.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i32, amount: i64) -> transaction::Model {
        transaction::Model {
            id,
            amount,
            description: "test".to_string(),
            customer_id: 1,
        }
    }

    #[test]
    fn total_sums_amounts() {
        assert_eq!(total_of(&[tx(1, 100), tx(2, 250)]), 350);
    }

    #[test]
    fn empty_set_sums_to_zero() {
        assert_eq!(total_of(&[]), 0);
    }

    #[test]
    fn negative_adjustments_are_summed() {
        assert_eq!(total_of(&[tx(1, 500), tx(2, -200)]), 300);
    }
}
