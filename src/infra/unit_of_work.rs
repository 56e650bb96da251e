//! Unit of Work pattern implementation.
//!
//! One unit of work owns one connection-scoped handle to the store plus one
//! change set shared by both repositories, so writes staged across
//! repositories flush together. `complete` applies the whole change set in
//! a single database transaction: either every staged write lands or none
//! does.
//!
//! A single instance serves one logical request; it is not meant to be
//! shared across concurrent operations.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};

use super::repositories::{
    ChangeSet, Repository, TransactionRepository, TransactionStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and the atomic flush.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get transaction repository
    fn transactions(&self) -> Arc<dyn TransactionRepository>;

    /// Flush all staged changes atomically.
    ///
    /// Returns the total number of rows affected. On any failure the whole
    /// store transaction is rolled back and nothing is applied; the staged
    /// changes are discarded either way.
    async fn complete(&self) -> AppResult<u64>;
}

/// Concrete implementation of UnitOfWork.
///
/// Both repositories are constructed up front, bound to the same connection
/// and change set. Dropping a `Persistence` without calling `complete`
/// discards whatever was staged.
pub struct Persistence {
    db: Arc<DatabaseConnection>,
    changes: ChangeSet,
    users: Arc<UserStore>,
    transactions: Arc<TransactionStore>,
}

impl Persistence {
    /// Create a new unit of work over one shared connection handle
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let changes = ChangeSet::new();
        Self {
            users: Arc::new(Repository::new(db.clone(), changes.clone())),
            transactions: Arc::new(Repository::new(db.clone(), changes.clone())),
            db,
            changes,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn transactions(&self) -> Arc<dyn TransactionRepository> {
        self.transactions.clone()
    }

    async fn complete(&self) -> AppResult<u64> {
        let ops = self.changes.drain();
        if ops.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await.map_err(AppError::from)?;

        let mut affected = 0u64;
        for op in ops {
            match op(&txn).await {
                Ok(rows) => affected += rows,
                Err(e) => {
                    if let Err(rollback_err) = txn.rollback().await {
                        tracing::error!("Transaction rollback failed: {}", rollback_err);
                    }
                    return Err(AppError::from(e));
                }
            }
        }

        txn.commit().await.map_err(AppError::from)?;
        tracing::debug!(rows = affected, "Unit of work flushed");
        Ok(affected)
    }
}
