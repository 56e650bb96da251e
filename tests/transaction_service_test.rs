//! Transaction service unit tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::predicate::eq;
use rust_decimal_macros::dec;
use uuid::Uuid;

use user_transactions::domain::{NewTransaction, Transaction, TransactionType};
use user_transactions::errors::{AppError, AppResult};
use user_transactions::infra::{
    MockTransactionRepository, MockUserRepository, Staged, TransactionRepository, UnitOfWork,
    UserRepository,
};
use user_transactions::services::{TransactionManager, TransactionService};

fn create_test_transaction(id: i32, user_id: Uuid) -> Transaction {
    Transaction {
        id,
        user_id,
        amount: dec!(400),
        transaction_type: TransactionType::Credit,
        created_at: Utc::now(),
    }
}

/// Test double for UnitOfWork wrapping mock repositories
struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    transactions: Arc<MockTransactionRepository>,
    completions: AtomicU64,
}

impl TestUnitOfWork {
    fn new(users: MockUserRepository, transactions: MockTransactionRepository) -> Arc<Self> {
        Arc::new(Self {
            users: Arc::new(users),
            transactions: Arc::new(transactions),
            completions: AtomicU64::new(0),
        })
    }

    fn completions(&self) -> u64 {
        self.completions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn transactions(&self) -> Arc<dyn TransactionRepository> {
        self.transactions.clone()
    }

    async fn complete(&self) -> AppResult<u64> {
        self.completions.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }
}

#[tokio::test]
async fn test_create_transaction_for_existing_user() {
    let user_id = Uuid::new_v4();
    let expected = create_test_transaction(1, user_id);

    let mut users = MockUserRepository::new();
    users
        .expect_exists()
        .with(eq(user_id))
        .returning(|_| Ok(true));

    let mut transactions = MockTransactionRepository::new();
    let created = expected.clone();
    transactions
        .expect_add()
        .withf(move |input: &NewTransaction| {
            input.user_id == user_id && input.amount == dec!(400)
        })
        .times(1)
        .returning(move |_| Staged::resolved(created.clone()));

    let uow = TestUnitOfWork::new(users, transactions);
    let service = TransactionManager::new(uow.clone());
    let result = service
        .create_transaction(NewTransaction {
            user_id,
            amount: dec!(400),
            transaction_type: TransactionType::Credit,
        })
        .await
        .unwrap();

    assert_eq!(result, expected);
    assert_eq!(uow.completions(), 1);
}

#[tokio::test]
async fn test_create_transaction_for_missing_user_writes_nothing() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_exists()
        .with(eq(user_id))
        .returning(|_| Ok(false));

    // No add expectation: staging anything would fail the test
    let transactions = MockTransactionRepository::new();

    let uow = TestUnitOfWork::new(users, transactions);
    let service = TransactionManager::new(uow.clone());
    let result = service
        .create_transaction(NewTransaction {
            user_id,
            amount: dec!(100),
            transaction_type: TransactionType::Debit,
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(uow.completions(), 0);
}

#[tokio::test]
async fn test_get_transaction_success() {
    let user_id = Uuid::new_v4();

    let mut transactions = MockTransactionRepository::new();
    transactions
        .expect_get_by_id()
        .with(eq(7))
        .returning(move |id| Ok(Some(create_test_transaction(id, user_id))));

    let uow = TestUnitOfWork::new(MockUserRepository::new(), transactions);
    let service = TransactionManager::new(uow);
    let result = service.get_transaction(7).await.unwrap();

    assert_eq!(result.unwrap().id, 7);
}

#[tokio::test]
async fn test_get_transaction_miss_is_none_not_error() {
    let mut transactions = MockTransactionRepository::new();
    transactions.expect_get_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::new(MockUserRepository::new(), transactions);
    let service = TransactionManager::new(uow);
    let result = service.get_transaction(404).await;

    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_list_user_transactions() {
    let user_id = Uuid::new_v4();

    let mut transactions = MockTransactionRepository::new();
    transactions
        .expect_find_by_user()
        .with(eq(user_id))
        .returning(move |uid| {
            Ok(vec![
                create_test_transaction(1, uid),
                create_test_transaction(2, uid),
            ])
        });

    let uow = TestUnitOfWork::new(MockUserRepository::new(), transactions);
    let service = TransactionManager::new(uow);
    let result = service.list_user_transactions(user_id).await.unwrap();

    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|tx| tx.user_id == user_id));
}
