//! Domain layer - Core business entities and report rows
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod reports;
pub mod transaction;
pub mod user;

pub use reports::{TypeNetTotal, UserNetTotal};
pub use transaction::{NewTransaction, Transaction, TransactionType};
pub use user::{CreateUser, UpdateUser, User};
