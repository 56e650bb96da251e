//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use the Unit of Work pattern for centralized repository
//! access and atomic flushes.

mod transaction_service;
mod user_service;

pub use transaction_service::{TransactionManager, TransactionService};
pub use user_service::{UserManager, UserService};
