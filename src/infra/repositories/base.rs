//! Generic staged-write repository.
//!
//! Reads execute immediately against the shared connection. Writes only
//! stage operations into the unit of work's [`ChangeSet`]; nothing reaches
//! the store until the unit of work flushes the whole set in one database
//! transaction. That split is what lets several repositories participate in
//! a single atomic commit.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use futures::future::BoxFuture;
use sea_orm::{
    Condition, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, QueryFilter,
};

use crate::errors::{AppError, AppResult};

/// One staged write, replayed against the flush transaction.
///
/// Returns the number of rows it affected.
pub(crate) type StagedOp =
    Box<dyn for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<u64, DbErr>> + Send>;

/// Ordered set of staged writes shared by all repositories of one unit of work.
#[derive(Clone, Default)]
pub struct ChangeSet {
    ops: Arc<Mutex<Vec<StagedOp>>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, op: StagedOp) {
        self.lock().push(op);
    }

    /// Take all staged operations, leaving the set empty
    pub(crate) fn drain(&self) -> Vec<StagedOp> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StagedOp>> {
        // A poisoned lock only means another staging call panicked; the
        // vec itself is still coherent.
        self.ops.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a value produced by a staged insert.
///
/// [`Staged::get`] returns `None` until the staged op has run inside a
/// flush. A handle may already be fulfilled when a later op aborts the
/// flush, so the value is only meaningful once `complete` returned `Ok`.
pub struct Staged<T> {
    cell: Arc<OnceLock<T>>,
}

impl<T> Clone for Staged<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T> Staged<T> {
    pub(crate) fn new() -> Self {
        Self {
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// A handle that is already resolved. Useful for repository mocks.
    pub fn resolved(value: T) -> Self {
        let staged = Self::new();
        staged.fulfil(value);
        staged
    }

    pub(crate) fn fulfil(&self, value: T) {
        // A second fulfil is impossible: each handle belongs to exactly one
        // staged op and ops run once.
        let _ = self.cell.set(value);
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }
}

/// Generic repository over one entity kind.
///
/// One instance per entity is created by the unit of work, all bound to the
/// same connection and change set.
pub struct Repository<E, A> {
    db: Arc<DatabaseConnection>,
    changes: ChangeSet,
    marker: PhantomData<(E, A)>,
}

impl<E, A> Repository<E, A>
where
    E: EntityTrait + 'static,
    A: sea_orm::ActiveModelTrait<Entity = E> + Send + 'static,
{
    pub fn new(db: Arc<DatabaseConnection>, changes: ChangeSet) -> Self {
        Self {
            db,
            changes,
            marker: PhantomData,
        }
    }

    /// Look up one row by primary key. A miss is `Ok(None)`, never an error.
    pub async fn find_by_id(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> AppResult<Option<E::Model>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send,
    {
        E::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)
    }

    /// Fetch every row. Order is unspecified.
    pub async fn find_all(&self) -> AppResult<Vec<E::Model>> {
        E::find()
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)
    }

    /// Fetch rows matching an arbitrary filter condition
    pub async fn find_where(&self, filter: Condition) -> AppResult<Vec<E::Model>> {
        E::find()
            .filter(filter)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)
    }

    /// Stage an insert
    pub fn stage_insert(&self, model: A)
    where
        E::Model: IntoActiveModel<A>,
    {
        self.changes.push(Box::new(move |txn| {
            Box::pin(async move { E::insert(model).exec_without_returning(txn).await })
        }));
    }

    /// Stage an insert whose store-assigned row is needed back.
    ///
    /// The returned handle resolves to `map` applied to the inserted row
    /// after a successful flush.
    pub fn stage_insert_returning<T, F>(&self, model: A, map: F) -> Staged<T>
    where
        E::Model: IntoActiveModel<A>,
        T: Send + Sync + 'static,
        F: FnOnce(E::Model) -> T + Send + 'static,
    {
        let staged = Staged::new();
        let slot = staged.clone();
        self.changes.push(Box::new(move |txn| {
            Box::pin(async move {
                let inserted = E::insert(model).exec_with_returning(txn).await?;
                slot.fulfil(map(inserted));
                Ok(1)
            })
        }));
        staged
    }

    /// Stage a full-row replace keyed by the model's primary key
    pub fn stage_update(&self, model: A)
    where
        E::Model: IntoActiveModel<A>,
    {
        self.changes.push(Box::new(move |txn| {
            Box::pin(async move {
                E::update(model).exec(txn).await?;
                Ok(1)
            })
        }));
    }

    /// Stage a delete keyed by primary key
    pub fn stage_delete(&self, id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType)
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + 'static,
    {
        self.changes.push(Box::new(move |txn| {
            Box::pin(async move {
                let result = E::delete_by_id(id).exec(txn).await?;
                Ok(result.rows_affected)
            })
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_op() -> StagedOp {
        Box::new(|_txn| Box::pin(async { Ok::<u64, DbErr>(1) }))
    }

    #[test]
    fn change_set_accumulates_in_order() {
        let changes = ChangeSet::new();
        assert!(changes.is_empty());

        changes.push(noop_op());
        changes.push(noop_op());
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn drain_empties_the_set() {
        let changes = ChangeSet::new();
        changes.push(noop_op());

        let ops = changes.drain();
        assert_eq!(ops.len(), 1);
        assert!(changes.is_empty());
        assert!(changes.drain().is_empty());
    }

    #[test]
    fn clones_share_one_set() {
        let changes = ChangeSet::new();
        let other = changes.clone();
        changes.push(noop_op());
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn staged_handle_is_unresolved_until_fulfilled() {
        let staged: Staged<i32> = Staged::new();
        assert!(staged.get().is_none());

        staged.fulfil(7);
        assert_eq!(staged.get(), Some(&7));
    }

    #[test]
    fn resolved_handle_carries_its_value() {
        let staged = Staged::resolved("row".to_string());
        assert_eq!(staged.get().map(String::as_str), Some("row"));
    }
}
