//! Centralized error handling.
//!
//! Provides a unified error type for the entire crate. Id-lookup misses are
//! normally recovered into `Option`/`bool` values at the service layer;
//! `NotFound` only surfaces when the store itself reports a missing record.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Record not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Storage failures: connectivity or constraint violations at flush time
    #[error("Storage failure")]
    Storage(#[source] sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(_) => AppError::NotFound,
            other => AppError::Storage(other),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
