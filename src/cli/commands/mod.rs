//! Command implementations.

pub mod chat;
pub mod completions;
pub mod init;
pub mod project;
pub mod skill;
pub mod status;
pub mod version;

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::storage::Database;
use std::path::PathBuf;

/// Open the database for a data command.
///
/// # Errors
///
/// Returns `NotInitialized` if no path resolves or the file does not exist.
pub fn open_database(db_path: Option<&PathBuf>) -> Result<Database> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or(Error::NotInitialized)?;

    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }

    Ok(Database::new(db_path))
}
