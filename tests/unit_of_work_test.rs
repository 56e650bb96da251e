//! Unit of work flush tests against a mock database.
//!
//! Covers the staged-change contract: nothing reaches the store before
//! `complete`, the flush runs ops in order inside one transaction, and a
//! failure discards everything.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use user_transactions::domain::{NewTransaction, TransactionType, User};
use user_transactions::errors::AppError;
use user_transactions::infra::{Persistence, UnitOfWork};

#[tokio::test]
async fn test_complete_with_nothing_staged_is_a_noop() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let uow = Persistence::new(Arc::new(db));

    assert_eq!(uow.complete().await.unwrap(), 0);
}

#[tokio::test]
async fn test_complete_flushes_staged_writes_in_one_transaction() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();
    let uow = Persistence::new(Arc::new(db));

    let user = User::new("Alice".to_string());
    uow.users().add(&user);
    uow.users().remove(user.id);

    assert_eq!(uow.complete().await.unwrap(), 2);

    // The change set drained: a second complete has nothing to do
    assert_eq!(uow.complete().await.unwrap(), 0);
}

#[tokio::test]
async fn test_staged_insert_resolves_to_created_row_after_flush() {
    let user_id = Uuid::new_v4();
    let created_at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([
            ("id", Value::from(1i32)),
            ("user_id", Value::from(user_id)),
            ("amount", Value::from(dec!(400))),
            ("transaction_type", Value::from("credit")),
            ("created_at", Value::from(created_at)),
        ])]])
        .into_connection();
    let uow = Persistence::new(Arc::new(db));

    let staged = uow.transactions().add(&NewTransaction {
        user_id,
        amount: dec!(400),
        transaction_type: TransactionType::Credit,
    });

    // Unresolved until the flush commits
    assert!(staged.get().is_none());

    assert_eq!(uow.complete().await.unwrap(), 1);

    let transaction = staged.get().unwrap();
    assert_eq!(transaction.id, 1);
    assert_eq!(transaction.user_id, user_id);
    assert_eq!(transaction.signed_amount(), dec!(400));
}

#[tokio::test]
async fn test_failed_flush_rolls_back_and_discards_staged_changes() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_exec_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let uow = Persistence::new(Arc::new(db));

    let alice = User::new("Alice".to_string());
    let bob = User::new("Bob".to_string());
    uow.users().add(&alice);
    uow.users().add(&bob);

    let result = uow.complete().await;
    assert!(matches!(result, Err(AppError::Storage(_))));

    // Nothing survives the rollback, including the op that succeeded
    assert_eq!(uow.complete().await.unwrap(), 0);
}

#[tokio::test]
async fn test_dropping_the_unit_of_work_discards_staged_changes() {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    {
        let uow = Persistence::new(db.clone());
        uow.users().add(&User::new("Ephemeral".to_string()));
        // Dropped without complete
    }

    // Staging never touched the store
    let db = Arc::into_inner(db).unwrap();
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn test_resolved_handle_is_only_meaningful_after_a_successful_flush() {
    let user_id = Uuid::new_v4();
    let created_at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();

    // The staged insert resolves its handle, then the delete aborts the flush
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([
            ("id", Value::from(1i32)),
            ("user_id", Value::from(user_id)),
            ("amount", Value::from(dec!(100))),
            ("transaction_type", Value::from("debit")),
            ("created_at", Value::from(created_at)),
        ])]])
        .append_exec_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let uow = Persistence::new(Arc::new(db));

    let staged = uow.transactions().add(&NewTransaction {
        user_id,
        amount: dec!(100),
        transaction_type: TransactionType::Debit,
    });
    uow.users().remove(user_id);

    let result = uow.complete().await;
    assert!(matches!(result, Err(AppError::Storage(_))));

    // The insert op ran before the abort, so the handle carries a value;
    // the failed flush means callers must discard it
    assert!(staged.get().is_some());
}
