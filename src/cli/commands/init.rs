//! Initialize the projtrack database.
//!
//! Creates the parent directory and the database file, then creates the
//! tables and seeds the default skills and statuses. Running it again on an
//! existing database changes nothing.

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::storage::Database;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    database: PathBuf,
    created: bool,
    skills: usize,
    statuses: usize,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the directory or database cannot be created.
pub fn execute(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or_else(|| {
        Error::Config("Could not determine a database location".to_string())
    })?;

    let created = !db_path.exists();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDatabase {
            path: db_path.clone(),
            source,
        })?;
    }

    let db = Database::new(&db_path);
    db.init()?;

    let skills = db.get_skills()?.len();
    let statuses = db.get_statuses()?.len();

    if json {
        let output = InitOutput {
            database: db_path,
            created,
            skills,
            statuses,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if created {
        println!("Initialized projtrack database");
        println!("  Database: {}", db_path.display());
        println!("  Seeded {skills} skills and {statuses} statuses");
    } else {
        println!("Database already initialized: {}", db_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_nested_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("projects.db");

        execute(Some(&path), true).unwrap();
        assert!(path.exists());

        let db = Database::new(&path);
        assert_eq!(db.get_skills().unwrap().len(), 4);
        assert_eq!(db.get_statuses().unwrap().len(), 5);
    }

    #[test]
    fn test_init_twice_succeeds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projects.db");

        execute(Some(&path), true).unwrap();
        execute(Some(&path), true).unwrap();

        assert_eq!(Database::new(&path).get_statuses().unwrap().len(), 5);
    }
}
