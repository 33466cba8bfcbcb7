pub mod customers;
pub mod invoices;
pub mod memberships;
pub mod plans;
pub mod transactions;

pub use customers::CustomerService;
pub use invoices::InvoiceService;
pub use memberships::MembershipService;
pub use plans::PlanService;
pub use transactions::TransactionService;
