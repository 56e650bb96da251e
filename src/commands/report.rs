//! Report command - Prints aggregate transaction reports as JSON.

use serde::Serialize;

use crate::cli::args::{ReportArgs, ReportKind};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, ReportingEngine, ReportingService};

/// Execute the report command
pub async fn execute(args: ReportArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await;
    let engine = ReportingEngine::new(db.get_connection());

    match args.kind {
        ReportKind::ByUser => {
            let rows = engine.totals_by_user().await?;
            print_json(&rows)
        }
        ReportKind::ByType => {
            let rows = engine.totals_by_type().await?;
            print_json(&rows)
        }
        ReportKind::HighVolume {
            from,
            to,
            threshold,
        } => {
            let rows = engine.high_volume(from, to, threshold).await?;
            print_json(&rows)
        }
    }
}

fn print_json<T: Serialize>(rows: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(rows).map_err(|e| AppError::internal(e.to_string()))?;
    println!("{}", out);
    Ok(())
}
