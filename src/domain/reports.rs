//! Report row types produced by the reporting engine.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::TransactionType;

/// Net signed total for one user with at least one transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserNetTotal {
    pub user_id: Uuid,
    pub total_amount: Decimal,
}

/// Net signed total for one transaction type present in the data.
///
/// Under the sign convention the debit group's total is the negative of the
/// raw debit sum. That asymmetry is part of the reporting contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeNetTotal {
    pub transaction_type: TransactionType,
    pub total_amount: Decimal,
}
