//! User Transactions - a small relational store of users and their
//! monetary transactions.
//!
//! The crate is the data-access and aggregation layer: a generic
//! repository/unit-of-work abstraction over persistent entities plus three
//! reporting queries with a fixed sign convention (debits negate, credits
//! are positive).
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and report rows
//! - **services**: Application use cases orchestrating the unit of work
//! - **infra**: Infrastructure concerns (database, repositories, reporting)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Print the per-user net totals report
//! cargo run -- report by-user
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{NewTransaction, Transaction, TransactionType, User};
pub use errors::{AppError, AppResult};
pub use infra::{Persistence, UnitOfWork};
