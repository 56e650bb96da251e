//! User repository: domain-typed view over the generic repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, Set};
use uuid::Uuid;

use super::base::Repository;
use super::entities::user::{self, ActiveModel};
use crate::domain::User;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Reads execute immediately; `add`/`update`/`remove` only stage writes for
/// the owning unit of work's flush.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by id. A miss is `Ok(None)`, never an error.
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Fetch all users, order unspecified
    async fn get_all(&self) -> AppResult<Vec<User>>;

    /// Whether a user with this id exists
    async fn exists(&self, id: Uuid) -> AppResult<bool>;

    /// Stage an insert of a fully-formed user row
    fn add(&self, user: &User);

    /// Stage a full-row replace keyed by the user's id
    fn update(&self, user: &User);

    /// Stage a delete keyed by id
    fn remove(&self, id: Uuid);
}

/// Concrete user repository bound to a unit of work's change set
pub type UserStore = Repository<user::Entity, user::ActiveModel>;

fn to_active_model(user: &User) -> ActiveModel {
    ActiveModel {
        id: Set(user.id),
        name: Set(user.name.clone()),
        created_at: Set(user.created_at),
    }
}

#[async_trait]
impl UserRepository for Repository<user::Entity, user::ActiveModel> {
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.find_by_id(id).await?.map(User::from))
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        let models = self.find_all().await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let matches = self
            .find_where(Condition::all().add(user::Column::Id.eq(id)))
            .await?;
        Ok(!matches.is_empty())
    }

    fn add(&self, user: &User) {
        self.stage_insert(to_active_model(user));
    }

    fn update(&self, user: &User) {
        self.stage_update(to_active_model(user));
    }

    fn remove(&self, id: Uuid) {
        self.stage_delete(id);
    }
}
