//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated id and server-side timestamp.
    ///
    /// Caller-supplied ids and timestamps are deliberately ignored by the
    /// service layer; these two fields are always assigned here.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }

    /// Update the user's display name (the only mutable field)
    pub fn rename(&mut self, name: String) {
        self.name = name;
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    /// User display name
    pub name: String,
}

/// User update data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    /// New display name
    pub name: Option<String>,
}
