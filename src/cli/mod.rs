//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `report` - Aggregate transaction reports

pub mod args;

pub use args::{Cli, Commands};
