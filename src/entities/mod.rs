pub mod customer;
pub mod customer_plan;
pub mod plan;
pub mod transaction;

pub use customer_plan::MembershipStatus;
