pub mod common;
pub mod customers;
pub mod health;
pub mod invoices;
pub mod plans;
pub mod transactions;

use crate::db::DbPool;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<crate::services::CustomerService>,
    pub plans: Arc<crate::services::PlanService>,
    pub memberships: Arc<crate::services::MembershipService>,
    pub transactions: Arc<crate::services::TransactionService>,
    pub invoices: Arc<crate::services::InvoiceService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            customers: Arc::new(crate::services::CustomerService::new(db.clone())),
            plans: Arc::new(crate::services::PlanService::new(db.clone())),
            memberships: Arc::new(crate::services::MembershipService::new(db.clone())),
            transactions: Arc::new(crate::services::TransactionService::new(db.clone())),
            invoices: Arc::new(crate::services::InvoiceService::new(db)),
        }
    }
}
