//! SQLite storage implementation.
//!
//! `Database` holds no connection. Every operation opens its own connection,
//! runs inside a scoped transaction, and closes on return. A transaction that
//! is dropped without `commit` (any `?` exit) rolls back.

use crate::error::{Error, Result};
use crate::model::{NewProject, Project, ProjectInfo, ProjectUpdate, Skill, Status};
use crate::storage::schema::apply_schema;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed data access layer.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Database {
    /// Point at a database file. Nothing is opened until an operation runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Override the busy timeout used by each connection.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        // Bundled SQLite defaults this to on; project deletes must not cascade or fail
        conn.pragma_update(None, "foreign_keys", "OFF")?;
        Ok(conn)
    }

    /// Run a read-only closure on a fresh connection.
    fn read<F, R>(&self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R>,
    {
        debug!(op, "read");
        let conn = self.connect()?;
        f(&conn)
    }

    /// Run a write closure inside an IMMEDIATE transaction on a fresh connection.
    ///
    /// Commits when the closure succeeds; the transaction rolls back on drop
    /// otherwise.
    fn mutate<F, R>(&self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        debug!(op, "mutate");
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    // ==================
    // Schema
    // ==================

    /// Create tables and seed reference data. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be applied.
    pub fn init(&self) -> Result<()> {
        let conn = self.connect()?;
        apply_schema(&conn)?;
        info!(path = %self.path.display(), "Database ready");
        Ok(())
    }

    // ==================
    // Reference data
    // ==================

    /// All statuses, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_statuses(&self) -> Result<Vec<Status>> {
        self.read("get_statuses", |conn| {
            let mut stmt =
                conn.prepare("SELECT status_id, status_name FROM status ORDER BY status_id")?;
            let statuses = stmt
                .query_map([], |row| {
                    Ok(Status {
                        status_id: row.get(0)?,
                        status_name: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(statuses)
        })
    }

    /// All skills, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_skills(&self) -> Result<Vec<Skill>> {
        self.read("get_skills", |conn| {
            let mut stmt =
                conn.prepare("SELECT skill_id, skill_name FROM skills ORDER BY skill_id")?;
            let skills = stmt
                .query_map([], |row| {
                    Ok(Skill {
                        skill_id: row.get(0)?,
                        skill_name: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(skills)
        })
    }

    /// Look up a status id by exact name. `None` when no such status exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_status_id(&self, status_name: &str) -> Result<Option<i64>> {
        self.read("get_status_id", |conn| lookup_status_id(conn, status_name))
    }

    /// Look up a skill id by exact name. `None` when no such skill exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_skill_id(&self, skill_name: &str) -> Result<Option<i64>> {
        self.read("get_skill_id", |conn| lookup_skill_id(conn, skill_name))
    }

    // ==================
    // Projects
    // ==================

    /// Insert projects, skipping any whose owner already has a project of the
    /// same name.
    ///
    /// Returns the number of rows actually inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails; no rows from the batch are kept.
    pub fn insert_project(&self, rows: &[NewProject]) -> Result<usize> {
        self.mutate("insert_project", |tx| {
            let mut stmt = tx.prepare(
                "INSERT INTO projects (user_id, project_name, url, status_id, description)
                 SELECT ?1, ?2, ?3, ?4, ?5
                 WHERE NOT EXISTS (
                     SELECT 1 FROM projects WHERE user_id = ?1 AND project_name = ?2
                 )",
            )?;

            let mut inserted = 0;
            for row in rows {
                let n = stmt.execute(rusqlite::params![
                    row.user_id,
                    row.project_name,
                    row.url,
                    row.status_id,
                    row.description,
                ])?;
                if n == 0 {
                    debug!(user_id = row.user_id, project = %row.project_name, "Duplicate project skipped");
                }
                inserted += n;
            }

            if inserted > 0 {
                info!(rows = inserted, "Inserted projects");
            }
            Ok(inserted)
        })
    }

    /// All projects owned by `user_id`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_projects(&self, user_id: i64) -> Result<Vec<Project>> {
        self.read("get_projects", |conn| {
            let mut stmt = conn.prepare(
                "SELECT project_id, user_id, project_name, description, url, status_id
                 FROM projects WHERE user_id = ?1
                 ORDER BY project_id",
            )?;
            let projects = stmt
                .query_map([user_id], map_project_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(projects)
        })
    }

    /// Id of the owner's project with this name, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_project_id(&self, project_name: &str, user_id: i64) -> Result<Option<i64>> {
        self.read("get_project_id", |conn| {
            lookup_project_id(conn, user_id, project_name)
        })
    }

    /// Name, description, link and status name of the owner's project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_project_info(&self, user_id: i64, project_name: &str) -> Result<Option<ProjectInfo>> {
        self.read("get_project_info", |conn| {
            let info = conn
                .query_row(
                    "SELECT p.project_name, p.description, p.url, s.status_name
                     FROM projects p
                     LEFT JOIN status s ON s.status_id = p.status_id
                     WHERE p.project_name = ?1 AND p.user_id = ?2
                     ORDER BY p.project_id
                     LIMIT 1",
                    rusqlite::params![project_name, user_id],
                    |row| {
                        Ok(ProjectInfo {
                            project_name: row.get(0)?,
                            description: row.get(1)?,
                            url: row.get(2)?,
                            status_name: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(info)
        })
    }

    /// Update one field of the owner's project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if no project matched, `StatusNotFound` if a
    /// status update names an id that does not exist, `ProjectExists` if a
    /// rename collides with another of the owner's projects, or a database
    /// error.
    pub fn update_project(&self, user_id: i64, project_name: &str, update: &ProjectUpdate) -> Result<()> {
        let field = update.field();
        self.mutate("update_project", |tx| {
            if let ProjectUpdate::Status(status_id) = update {
                let known = tx
                    .prepare("SELECT 1 FROM status WHERE status_id = ?1")?
                    .exists([status_id])?;
                if !known {
                    return Err(Error::StatusNotFound {
                        name: status_id.to_string(),
                    });
                }
            }

            if let ProjectUpdate::Name(new_name) = update {
                if new_name != project_name && lookup_project_id(tx, user_id, new_name)?.is_some() {
                    return Err(Error::ProjectExists {
                        name: new_name.clone(),
                    });
                }
            }

            // Column comes from the closed ProjectField enum, never from input
            let sql = format!(
                "UPDATE projects SET {} = ?1 WHERE project_name = ?2 AND user_id = ?3",
                field.column()
            );

            let affected = match update {
                ProjectUpdate::Name(v) | ProjectUpdate::Description(v) | ProjectUpdate::Url(v) => {
                    tx.execute(&sql, rusqlite::params![v, project_name, user_id])?
                }
                ProjectUpdate::Status(id) => {
                    tx.execute(&sql, rusqlite::params![id, project_name, user_id])?
                }
            };

            if affected == 0 {
                return Err(Error::ProjectNotFound {
                    name: project_name.to_string(),
                });
            }

            info!(user_id, project = project_name, %field, "Updated project");
            Ok(())
        })
    }

    /// Delete one project row.
    ///
    /// Associated `project_skills` rows are left in place.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the owner has no project with this id.
    pub fn delete_project(&self, user_id: i64, project_id: i64) -> Result<()> {
        self.mutate("delete_project", |tx| {
            let affected = tx.execute(
                "DELETE FROM projects WHERE user_id = ?1 AND project_id = ?2",
                [user_id, project_id],
            )?;

            if affected == 0 {
                return Err(Error::ProjectNotFound {
                    name: project_id.to_string(),
                });
            }

            info!(user_id, project_id, "Deleted project");
            Ok(())
        })
    }

    // ==================
    // Project skills
    // ==================

    /// Associate a skill with the owner's project by name.
    ///
    /// An association that already exists is left as is.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` or `SkillNotFound` when a name does not
    /// resolve, or a database error.
    pub fn insert_skill(&self, user_id: i64, project_name: &str, skill_name: &str) -> Result<()> {
        self.mutate("insert_skill", |tx| {
            let project_id = lookup_project_id(tx, user_id, project_name)?.ok_or_else(|| {
                Error::ProjectNotFound {
                    name: project_name.to_string(),
                }
            })?;
            let skill_id = lookup_skill_id(tx, skill_name)?.ok_or_else(|| Error::SkillNotFound {
                name: skill_name.to_string(),
            })?;

            let inserted = tx.execute(
                "INSERT INTO project_skills (project_id, skill_id)
                 SELECT ?1, ?2
                 WHERE NOT EXISTS (
                     SELECT 1 FROM project_skills WHERE project_id = ?1 AND skill_id = ?2
                 )",
                [project_id, skill_id],
            )?;

            if inserted > 0 {
                info!(project_id, skill = skill_name, "Linked skill");
            }
            Ok(())
        })
    }

    /// Skill names of the owner's project, in association order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_project_skill_names(&self, user_id: i64, project_name: &str) -> Result<Vec<String>> {
        self.read("get_project_skills", |conn| {
            let mut stmt = conn.prepare(
                "SELECT s.skill_name
                 FROM projects p
                 JOIN project_skills ps ON ps.project_id = p.project_id
                 JOIN skills s ON s.skill_id = ps.skill_id
                 WHERE p.project_name = ?1 AND p.user_id = ?2
                 ORDER BY ps.rowid",
            )?;
            let names = stmt
                .query_map(rusqlite::params![project_name, user_id], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;
            Ok(names)
        })
    }

    /// Skill names of the owner's project joined with `", "`.
    ///
    /// Empty when the project has no skills or does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_project_skills(&self, user_id: i64, project_name: &str) -> Result<String> {
        Ok(self.get_project_skill_names(user_id, project_name)?.join(", "))
    }

    /// Remove one project/skill association.
    ///
    /// Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_skill(&self, project_id: i64, skill_id: i64) -> Result<bool> {
        self.mutate("delete_skill", |tx| {
            let affected = tx.execute(
                "DELETE FROM project_skills WHERE skill_id = ?1 AND project_id = ?2",
                [skill_id, project_id],
            )?;
            Ok(affected > 0)
        })
    }
}

fn lookup_project_id(conn: &Connection, user_id: i64, project_name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT project_id FROM projects
             WHERE project_name = ?1 AND user_id = ?2
             ORDER BY project_id LIMIT 1",
            rusqlite::params![project_name, user_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn lookup_skill_id(conn: &Connection, skill_name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT skill_id FROM skills WHERE skill_name = ?1",
            [skill_name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn lookup_status_id(conn: &Connection, status_name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT status_id FROM status WHERE status_name = ?1",
            [status_name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

// Helper to map project rows
fn map_project_row(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        project_id: row.get(0)?,
        user_id: row.get(1)?,
        project_name: row.get(2)?,
        description: row.get(3)?,
        url: row.get(4)?,
        status_id: row.get(5)?,
    })
}
