//! Transaction repository.
//!
//! Transactions are write-once in this core's contract: the trait exposes no
//! update or remove.

use async_trait::async_trait;
use sea_orm::{ActiveValue::NotSet, ColumnTrait, Condition, Set};
use uuid::Uuid;

use super::base::{Repository, Staged};
use super::entities::transaction::{self, ActiveModel};
use crate::domain::{NewTransaction, Transaction};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Transaction repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Find transaction by id. A miss is `Ok(None)`, never an error.
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Transaction>>;

    /// Fetch all transactions, order unspecified
    async fn get_all(&self) -> AppResult<Vec<Transaction>>;

    /// Fetch all transactions owned by one user
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Transaction>>;

    /// Stage an insert; the creation timestamp is assigned here and the id
    /// by the store at flush time. The handle resolves to the created row
    /// once the unit of work completes.
    fn add(&self, input: &NewTransaction) -> Staged<Transaction>;
}

/// Concrete transaction repository bound to a unit of work's change set
pub type TransactionStore = Repository<transaction::Entity, transaction::ActiveModel>;

#[async_trait]
impl TransactionRepository for Repository<transaction::Entity, transaction::ActiveModel> {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Transaction>> {
        Ok(self.find_by_id(id).await?.map(Transaction::from))
    }

    async fn get_all(&self) -> AppResult<Vec<Transaction>> {
        let models = self.find_all().await?;
        Ok(models.into_iter().map(Transaction::from).collect())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Transaction>> {
        let models = self
            .find_where(Condition::all().add(transaction::Column::UserId.eq(user_id)))
            .await?;
        Ok(models.into_iter().map(Transaction::from).collect())
    }

    fn add(&self, input: &NewTransaction) -> Staged<Transaction> {
        let model = ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id),
            amount: Set(input.amount),
            transaction_type: Set(input.transaction_type.to_string()),
            created_at: Set(chrono::Utc::now()),
        };
        self.stage_insert_returning(model, Transaction::from)
    }
}
