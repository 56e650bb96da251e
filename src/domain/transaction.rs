//! Transaction domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{TYPE_CREDIT, TYPE_DEBIT};

/// Transaction types enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    /// Sign applied to the stored amount during aggregation.
    ///
    /// Debits contribute negatively, credits positively. The stored amount
    /// itself is always an unsigned magnitude.
    pub fn sign(&self) -> Decimal {
        match self {
            TransactionType::Debit => Decimal::NEGATIVE_ONE,
            TransactionType::Credit => Decimal::ONE,
        }
    }
}

impl From<&str> for TransactionType {
    fn from(s: &str) -> Self {
        match s {
            TYPE_DEBIT => TransactionType::Debit,
            _ => TransactionType::Credit,
        }
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Debit => TYPE_DEBIT.to_string(),
            TransactionType::Credit => TYPE_CREDIT.to_string(),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Debit => write!(f, "{}", TYPE_DEBIT),
            TransactionType::Credit => write!(f, "{}", TYPE_CREDIT),
        }
    }
}

/// Transaction domain entity.
///
/// Transactions are write-once: never updated, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub user_id: Uuid,
    /// Unsigned magnitude; sign is derived from the type during aggregation
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Signed contribution of this transaction to a net total
    pub fn signed_amount(&self) -> Decimal {
        self.transaction_type.sign() * self.amount
    }
}

/// Transaction creation data transfer object.
///
/// Ids and creation timestamps are assigned by the store and the repository
/// respectively, so neither appears here.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx(amount: Decimal, kind: TransactionType) -> Transaction {
        Transaction {
            id: 0,
            user_id: Uuid::new_v4(),
            amount,
            transaction_type: kind,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn debit_contributes_negatively() {
        assert_eq!(tx(dec!(100), TransactionType::Debit).signed_amount(), dec!(-100));
    }

    #[test]
    fn credit_contributes_positively() {
        assert_eq!(tx(dec!(400), TransactionType::Credit).signed_amount(), dec!(400));
    }

    #[test]
    fn signed_sum_matches_reference_scenario() {
        // {(100, Debit), (200, Debit), (400, Credit)} nets to +100
        let total: Decimal = [
            tx(dec!(100), TransactionType::Debit),
            tx(dec!(200), TransactionType::Debit),
            tx(dec!(400), TransactionType::Credit),
        ]
        .iter()
        .map(Transaction::signed_amount)
        .sum();

        assert_eq!(total, dec!(100));
    }

    #[test]
    fn type_round_trips_through_persisted_string() {
        for kind in [TransactionType::Debit, TransactionType::Credit] {
            assert_eq!(TransactionType::from(String::from(kind).as_str()), kind);
        }
    }
}
