//! User service - Handles user-related use cases.
//!
//! Id-lookup misses are recovered locally into absent-value results
//! (`None`/`false`); they are not errors at this layer.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// User service trait for dependency injection
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by id; a miss is `None`
    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a user. Identity and creation timestamp are assigned
    /// server-side regardless of caller input.
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Update a user's mutable fields (name). A missing id yields `None`
    /// and stages nothing.
    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user. A missing id yields `false` and stages nothing.
    async fn delete_user(&self, id: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of UserService using the Unit of Work
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with a unit of work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        self.uow.users().get_by_id(id).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().get_all().await
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let user = User::new(input.name);
        self.uow.users().add(&user);
        self.uow.complete().await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<Option<User>> {
        let Some(mut user) = self.uow.users().get_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(name) = input.name {
            user.rename(name);
        }

        self.uow.users().update(&user);
        self.uow.complete().await?;
        Ok(Some(user))
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<bool> {
        if self.uow.users().get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.uow.users().remove(id);
        self.uow.complete().await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(true)
    }
}
