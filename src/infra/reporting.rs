//! Reporting engine: read-only aggregation over the transaction table.
//!
//! These queries bypass the staged-write machinery entirely and group/sum
//! in the store. The sign convention (debit negates, credit is positive) is
//! applied inside the aggregate expression, never to stored rows.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use super::repositories::entities::transaction;
use crate::config::TYPE_DEBIT;
use crate::domain::{Transaction, TransactionType, TypeNetTotal, UserNetTotal};
use crate::errors::{AppError, AppResult};

/// Reporting operations exposed to callers
#[async_trait]
pub trait ReportingService: Send + Sync {
    /// Net signed total per user key with at least one transaction.
    /// Users without transactions are omitted.
    async fn totals_by_user(&self) -> AppResult<Vec<UserNetTotal>>;

    /// Net signed total per transaction type present in the data.
    /// The debit group's total comes out negative by design.
    async fn totals_by_type(&self) -> AppResult<Vec<TypeNetTotal>>;

    /// Transactions created within `[from, to]` inclusive whose amount is
    /// strictly greater than `threshold`. Both types are eligible; order is
    /// unspecified.
    async fn high_volume(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        threshold: Decimal,
    ) -> AppResult<Vec<Transaction>>;
}

/// Concrete reporting engine reading directly from the store
pub struct ReportingEngine {
    db: Arc<DatabaseConnection>,
}

impl ReportingEngine {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// `SUM(CASE WHEN transaction_type = 'debit' THEN -amount ELSE amount END)`
fn signed_sum() -> SimpleExpr {
    Expr::expr(
        Expr::case(
            transaction::Column::TransactionType.eq(TYPE_DEBIT),
            Expr::col(transaction::Column::Amount).mul(-1),
        )
        .finally(Expr::col(transaction::Column::Amount)),
    )
    .sum()
}

#[derive(Debug, FromQueryResult)]
struct UserTotalRow {
    user_id: Uuid,
    total_amount: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct TypeTotalRow {
    transaction_type: String,
    total_amount: Decimal,
}

#[async_trait]
impl ReportingService for ReportingEngine {
    async fn totals_by_user(&self) -> AppResult<Vec<UserNetTotal>> {
        let rows = transaction::Entity::find()
            .select_only()
            .column(transaction::Column::UserId)
            .column_as(signed_sum(), "total_amount")
            .group_by(transaction::Column::UserId)
            .into_model::<UserTotalRow>()
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| UserNetTotal {
                user_id: row.user_id,
                total_amount: row.total_amount,
            })
            .collect())
    }

    async fn totals_by_type(&self) -> AppResult<Vec<TypeNetTotal>> {
        let rows = transaction::Entity::find()
            .select_only()
            .column(transaction::Column::TransactionType)
            .column_as(signed_sum(), "total_amount")
            .group_by(transaction::Column::TransactionType)
            .into_model::<TypeTotalRow>()
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| TypeNetTotal {
                transaction_type: TransactionType::from(row.transaction_type.as_str()),
                total_amount: row.total_amount,
            })
            .collect())
    }

    async fn high_volume(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        threshold: Decimal,
    ) -> AppResult<Vec<Transaction>> {
        let models = transaction::Entity::find()
            .filter(transaction::Column::CreatedAt.gte(from))
            .filter(transaction::Column::CreatedAt.lte(to))
            .filter(transaction::Column::Amount.gt(threshold))
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Transaction::from).collect())
    }
}
