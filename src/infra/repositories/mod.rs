//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
pub(crate) mod entities;
mod transaction_repository;
mod user_repository;

pub use base::{ChangeSet, Repository, Staged};
pub use transaction_repository::{TransactionRepository, TransactionStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use transaction_repository::MockTransactionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
