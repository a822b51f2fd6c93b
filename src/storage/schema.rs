//! Database schema definitions and reference-data seeding.
//!
//! Both steps are idempotent: tables use `CREATE TABLE IF NOT EXISTS` and
//! seed rows use `INSERT OR IGNORE` against the unique name columns.

use crate::model::{DefaultSkill, DefaultStatus};
use rusqlite::{Connection, Result};
use tracing::info;

/// The complete SQL schema for the projtrack database.
///
/// Foreign keys are declared but not enforced (SQLite default): deleting a
/// project leaves its `project_skills` rows in place.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS projects (
    project_id INTEGER PRIMARY KEY,
    user_id INTEGER,
    project_name TEXT NOT NULL,
    description TEXT,
    url TEXT,
    status_id INTEGER,
    FOREIGN KEY (status_id) REFERENCES status(status_id)
);

CREATE INDEX IF NOT EXISTS idx_projects_user_name ON projects(user_id, project_name);

CREATE TABLE IF NOT EXISTS skills (
    skill_id INTEGER PRIMARY KEY,
    skill_name TEXT UNIQUE
);

-- No primary key: duplicate pairs are filtered at insert time
CREATE TABLE IF NOT EXISTS project_skills (
    project_id INTEGER,
    skill_id INTEGER,
    FOREIGN KEY (project_id) REFERENCES projects(project_id),
    FOREIGN KEY (skill_id) REFERENCES skills(skill_id)
);

CREATE TABLE IF NOT EXISTS status (
    status_id INTEGER PRIMARY KEY,
    status_name TEXT UNIQUE
);
";

/// Create all tables if they are absent.
///
/// # Errors
///
/// Returns an error if the DDL fails.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Seed the fixed skill and status rows.
///
/// # Errors
///
/// Returns an error if an insert fails for a reason other than a duplicate name.
pub fn default_insert(conn: &Connection) -> Result<()> {
    let mut skill_stmt = conn.prepare("INSERT OR IGNORE INTO skills (skill_name) VALUES (?1)")?;
    let mut seeded = 0;
    for skill in DefaultSkill::ALL {
        seeded += skill_stmt.execute([skill.as_str()])?;
    }

    let mut status_stmt = conn.prepare("INSERT OR IGNORE INTO status (status_name) VALUES (?1)")?;
    for status in DefaultStatus::ALL {
        seeded += status_stmt.execute([status.as_str()])?;
    }

    if seeded > 0 {
        info!(rows = seeded, "Seeded reference data");
    }
    Ok(())
}

/// Set pragmas, create tables, and seed reference data.
///
/// # Errors
///
/// Returns an error if any step fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "OFF")?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    create_tables(conn)?;
    default_insert(conn)?;

    Ok(())
}
