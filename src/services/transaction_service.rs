//! Transaction service - Handles transaction-related use cases.
//!
//! Referential integrity is enforced here at write time: a transaction may
//! only be created for an existing user, checked before anything is staged.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{NewTransaction, Transaction};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Transaction service trait for dependency injection
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Get transaction by id; a miss is `None`
    async fn get_transaction(&self, id: i32) -> AppResult<Option<Transaction>>;

    /// List all transactions
    async fn list_transactions(&self) -> AppResult<Vec<Transaction>>;

    /// List all transactions owned by one user
    async fn list_user_transactions(&self, user_id: Uuid) -> AppResult<Vec<Transaction>>;

    /// Create a transaction for an existing user.
    ///
    /// Fails with a validation error before staging anything when the
    /// referenced user does not exist. The creation timestamp is always
    /// server-assigned.
    async fn create_transaction(&self, input: NewTransaction) -> AppResult<Transaction>;
}

/// Concrete implementation of TransactionService using the Unit of Work
pub struct TransactionManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TransactionManager<U> {
    /// Create new transaction service instance with a unit of work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TransactionService for TransactionManager<U> {
    async fn get_transaction(&self, id: i32) -> AppResult<Option<Transaction>> {
        self.uow.transactions().get_by_id(id).await
    }

    async fn list_transactions(&self) -> AppResult<Vec<Transaction>> {
        self.uow.transactions().get_all().await
    }

    async fn list_user_transactions(&self, user_id: Uuid) -> AppResult<Vec<Transaction>> {
        self.uow.transactions().find_by_user(user_id).await
    }

    async fn create_transaction(&self, input: NewTransaction) -> AppResult<Transaction> {
        if !self.uow.users().exists(input.user_id).await? {
            return Err(AppError::validation("Referenced user does not exist"));
        }

        let staged = self.uow.transactions().add(&input);
        self.uow.complete().await?;

        let transaction = staged
            .get()
            .cloned()
            .ok_or_else(|| AppError::internal("Staged insert did not resolve after flush"))?;
        tracing::info!(
            transaction_id = transaction.id,
            user_id = %transaction.user_id,
            "Transaction created"
        );
        Ok(transaction)
    }
}
