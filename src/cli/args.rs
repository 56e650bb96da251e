//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// User Transactions - relational store of users and monetary transactions
#[derive(Parser, Debug)]
#[command(name = "user-transactions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Run aggregate transaction reports
    Report(ReportArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub kind: ReportKind,
}

/// Available reports
#[derive(Subcommand, Debug)]
pub enum ReportKind {
    /// Net signed total per user
    ByUser,

    /// Net signed total per transaction type
    ByType,

    /// Transactions within a date range and strictly above a threshold
    HighVolume {
        /// Range start, inclusive (RFC 3339, e.g. 2024-01-01T00:00:00Z)
        #[arg(long)]
        from: DateTime<Utc>,

        /// Range end, inclusive; pass end-of-day granularity
        #[arg(long)]
        to: DateTime<Utc>,

        /// Amount threshold; matches are strictly greater
        #[arg(long)]
        threshold: Decimal,
    },
}
