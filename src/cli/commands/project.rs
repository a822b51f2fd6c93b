//! Project management commands.
//!
//! - `projtrack project add <name>` - Add a project
//! - `projtrack project list` - List your projects
//! - `projtrack project show <name>` - Show project details and skills
//! - `projtrack project update <name> <field> <value>` - Update one field
//! - `projtrack project delete <name>` - Delete a project

use super::open_database;
use crate::cli::{ProjectAddArgs, ProjectCommands, ProjectUpdateArgs};
use crate::config::resolve_user_id;
use crate::error::{Error, Result};
use crate::model::{DefaultStatus, NewProject, Project, ProjectField, ProjectInfo, ProjectUpdate};
use crate::storage::Database;
use crate::validate::resolve_status;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ProjectListOutput {
    projects: Vec<Project>,
    count: usize,
}

#[derive(Serialize)]
struct ProjectDetailOutput {
    #[serde(flatten)]
    info: ProjectInfo,
    skills: Vec<String>,
}

/// Execute a project command.
///
/// # Errors
///
/// Returns an error if the database is missing, the user cannot be
/// resolved, or the operation fails.
pub fn execute(
    command: &ProjectCommands,
    db_path: Option<&PathBuf>,
    user: Option<i64>,
    json: bool,
) -> Result<()> {
    let db = open_database(db_path)?;
    let user_id = resolve_user_id(user)?;

    match command {
        ProjectCommands::Add(args) => execute_add(&db, user_id, args, json),
        ProjectCommands::List => execute_list(&db, user_id, json),
        ProjectCommands::Show { name } => execute_show(&db, user_id, name, json),
        ProjectCommands::Update(args) => execute_update(&db, user_id, args, json),
        ProjectCommands::Delete { name } => execute_delete(&db, user_id, name, json),
    }
}

/// Resolve a user-typed status to its id.
fn status_id_for(db: &Database, input: &str) -> Result<i64> {
    let names: Vec<String> = db
        .get_statuses()?
        .into_iter()
        .map(|s| s.status_name)
        .collect();
    let name = resolve_status(input, &names)?;
    db.get_status_id(&name)?
        .ok_or(Error::StatusNotFound { name })
}

fn execute_add(db: &Database, user_id: i64, args: &ProjectAddArgs, json: bool) -> Result<()> {
    if args.name.trim().is_empty() {
        return Err(Error::InvalidArgument("project name cannot be empty".to_string()));
    }

    let status = args
        .status
        .as_deref()
        .unwrap_or(DefaultStatus::Prototyping.as_str());
    let status_id = status_id_for(db, status)?;

    let project = NewProject::new(user_id, args.name.as_str(), args.url.clone(), status_id)
        .with_description(args.description.clone());
    let inserted = db.insert_project(&[project])?;

    if json {
        let output = serde_json::json!({
            "created": inserted > 0,
            "project_name": args.name,
            "project_id": db.get_project_id(&args.name, user_id)?,
        });
        println!("{output}");
    } else if inserted > 0 {
        println!("Added project: {}", args.name);
    } else {
        println!("Project already exists: {}", args.name);
    }

    Ok(())
}

fn execute_list(db: &Database, user_id: i64, json: bool) -> Result<()> {
    let projects = db.get_projects(user_id)?;

    if json {
        let output = ProjectListOutput {
            count: projects.len(),
            projects,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects found.");
        println!("\nAdd one with: projtrack project add <name>");
        return Ok(());
    }

    let statuses = db.get_statuses()?;
    println!("Projects ({}):\n", projects.len());
    for project in &projects {
        let status = project
            .status_id
            .and_then(|id| statuses.iter().find(|s| s.status_id == id))
            .map_or("-", |s| s.status_name.as_str());
        println!("  {} [{}]", project.project_name, status);
        if let Some(url) = &project.url {
            println!("    Link: {url}");
        }
        if let Some(desc) = &project.description {
            println!("    Desc: {desc}");
        }
    }

    Ok(())
}

fn execute_show(db: &Database, user_id: i64, name: &str, json: bool) -> Result<()> {
    let info = db
        .get_project_info(user_id, name)?
        .ok_or_else(|| Error::ProjectNotFound { name: name.to_string() })?;
    let skills = db.get_project_skill_names(user_id, name)?;

    if json {
        let output = ProjectDetailOutput { info, skills };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Project: {}", info.project_name);
    println!("  Description: {}", info.description.as_deref().unwrap_or("-"));
    println!("  Link:        {}", info.url.as_deref().unwrap_or("-"));
    println!("  Status:      {}", info.status_name.as_deref().unwrap_or("-"));
    if skills.is_empty() {
        println!("  Skills:      -");
    } else {
        println!("  Skills:      {}", skills.join(", "));
    }

    Ok(())
}

fn execute_update(db: &Database, user_id: i64, args: &ProjectUpdateArgs, json: bool) -> Result<()> {
    let field = ProjectField::parse(&args.field)?;
    let update = match field {
        ProjectField::Status => ProjectUpdate::Status(status_id_for(db, &args.value)?),
        _ => ProjectUpdate::text(field, args.value.clone())?,
    };

    db.update_project(user_id, &args.name, &update)?;

    if json {
        let output = serde_json::json!({
            "updated": true,
            "project_name": args.name,
            "field": field,
        });
        println!("{output}");
    } else {
        println!("Updated {} of {}", field.label().to_lowercase(), args.name);
    }

    Ok(())
}

fn execute_delete(db: &Database, user_id: i64, name: &str, json: bool) -> Result<()> {
    let project_id = db
        .get_project_id(name, user_id)?
        .ok_or_else(|| Error::ProjectNotFound { name: name.to_string() })?;

    db.delete_project(user_id, project_id)?;

    if json {
        let output = serde_json::json!({
            "deleted": true,
            "project_id": project_id,
            "project_name": name,
        });
        println!("{output}");
    } else {
        println!("Deleted project: {name}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("projects.db"));
        db.init().unwrap();
        (dir, db)
    }

    fn add_args(name: &str, status: Option<&str>) -> ProjectAddArgs {
        ProjectAddArgs {
            name: name.to_string(),
            url: None,
            status: status.map(String::from),
            description: Some("desc".to_string()),
        }
    }

    #[test]
    fn test_add_defaults_to_prototyping() {
        let (_dir, db) = setup();
        execute_add(&db, 1, &add_args("Bot", None), true).unwrap();

        let info = db.get_project_info(1, "Bot").unwrap().unwrap();
        assert_eq!(info.status_name.as_deref(), Some("Prototyping"));
        assert_eq!(info.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_add_rejects_unknown_status() {
        let (_dir, db) = setup();
        let err = execute_add(&db, 1, &add_args("Bot", Some("Paused")), true).unwrap_err();
        assert!(matches!(err, Error::InvalidChoice { .. }));
        assert!(db.get_projects(1).unwrap().is_empty());
    }

    #[test]
    fn test_update_status_by_synonym() {
        let (_dir, db) = setup();
        execute_add(&db, 1, &add_args("Bot", None), true).unwrap();

        let args = ProjectUpdateArgs {
            name: "Bot".to_string(),
            field: "status".to_string(),
            value: "done".to_string(),
        };
        execute_update(&db, 1, &args, true).unwrap();

        let info = db.get_project_info(1, "Bot").unwrap().unwrap();
        assert_eq!(info.status_name.as_deref(), Some("Completed"));
    }

    #[test]
    fn test_update_rejects_owner_column() {
        let (_dir, db) = setup();
        execute_add(&db, 1, &add_args("Bot", None), true).unwrap();

        let args = ProjectUpdateArgs {
            name: "Bot".to_string(),
            field: "user_id".to_string(),
            value: "2".to_string(),
        };
        let err = execute_update(&db, 1, &args, true).unwrap_err();
        assert!(matches!(err, Error::InvalidField { .. }));
        assert_eq!(db.get_projects(1).unwrap().len(), 1);
    }

    #[test]
    fn test_add_duplicate_keeps_first_description() {
        let (_dir, db) = setup();
        execute_add(&db, 1, &add_args("Bot", None), true).unwrap();

        let mut again = add_args("Bot", Some("done"));
        again.description = Some("other".to_string());
        execute_add(&db, 1, &again, true).unwrap();

        let info = db.get_project_info(1, "Bot").unwrap().unwrap();
        assert_eq!(info.description.as_deref(), Some("desc"));
        assert_eq!(info.status_name.as_deref(), Some("Prototyping"));
    }

    #[test]
    fn test_rename_onto_existing_project() {
        let (_dir, db) = setup();
        execute_add(&db, 1, &add_args("Bot", None), true).unwrap();
        execute_add(&db, 1, &add_args("Site", None), true).unwrap();

        let args = ProjectUpdateArgs {
            name: "Site".to_string(),
            field: "name".to_string(),
            value: "Bot".to_string(),
        };
        let err = execute_update(&db, 1, &args, true).unwrap_err();
        assert!(matches!(err, Error::ProjectExists { .. }));
        assert_eq!(db.get_projects(1).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_missing_project() {
        let (_dir, db) = setup();
        let err = execute_delete(&db, 1, "Nope", true).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound { .. }));
    }
}
