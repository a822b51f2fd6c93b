//! Status command implementation.

use super::open_database;
use crate::cli::StatusCommands;
use crate::error::Result;
use crate::model::Status;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct StatusListOutput {
    statuses: Vec<Status>,
    count: usize,
}

/// Execute a status command.
///
/// # Errors
///
/// Returns an error if the database is missing or the query fails.
pub fn execute(command: &StatusCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let db = open_database(db_path)?;

    match command {
        StatusCommands::List => {
            let statuses = db.get_statuses()?;

            if json {
                let output = StatusListOutput {
                    count: statuses.len(),
                    statuses,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            println!("Statuses ({}):", statuses.len());
            for status in &statuses {
                println!("  {:>2}  {}", status.status_id, status.status_name);
            }
            Ok(())
        }
    }
}
