//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories and the staged-write change set
//! - Unit of Work for atomic flushes
//! - Read-only reporting queries

pub mod db;
pub mod reporting;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use reporting::{ReportingEngine, ReportingService};
pub use repositories::{
    ChangeSet, Repository, Staged, TransactionRepository, TransactionStore, UserRepository,
    UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockTransactionRepository, MockUserRepository};
