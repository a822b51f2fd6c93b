//! Configuration management.
//!
//! Resolves the database location and the acting user. Each value comes
//! from an explicit flag first, then the environment, then a default.

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};

/// Environment variable naming the database file.
pub const DB_ENV: &str = "PROJTRACK_DB";

/// Environment variable naming the acting user id.
pub const USER_ENV: &str = "PROJTRACK_USER";

/// Get the global projtrack directory (`~/.projtrack/`).
#[must_use]
pub fn global_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".projtrack"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. `explicit_path` (the `--db` flag)
/// 2. `PROJTRACK_DB` environment variable
/// 3. `~/.projtrack/projects.db`
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Ok(db_path) = std::env::var(DB_ENV) {
        if !db_path.trim().is_empty() {
            return Some(PathBuf::from(db_path));
        }
    }

    global_dir().map(|dir| dir.join("projects.db"))
}

/// Resolve the user whose projects a command works on.
///
/// Priority:
/// 1. `explicit` (the `--user` flag)
/// 2. `PROJTRACK_USER` environment variable
/// 3. **Error**: ownership is never guessed
///
/// # Errors
///
/// Returns `Config` if no user is given or the env value is not an integer.
pub fn resolve_user_id(explicit: Option<i64>) -> Result<i64> {
    if let Some(id) = explicit {
        return Ok(id);
    }

    match std::env::var(USER_ENV) {
        Ok(raw) if !raw.trim().is_empty() => parse_user_id(&raw),
        _ => Err(Error::Config("no user id given".to_string())),
    }
}

fn parse_user_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{USER_ENV} must be an integer user id, got '{raw}'")))
}
