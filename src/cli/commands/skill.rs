//! Skill commands.
//!
//! - `projtrack skill list` - List available skills
//! - `projtrack skill add <project> <skill>` - Link a skill to a project
//! - `projtrack skill remove <project> <skill>` - Unlink a skill

use super::open_database;
use crate::cli::SkillCommands;
use crate::config::resolve_user_id;
use crate::error::{Error, Result};
use crate::model::Skill;
use crate::storage::Database;
use crate::validate::resolve_skill;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct SkillListOutput {
    skills: Vec<Skill>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct SkillLinkOutput {
    project_name: String,
    skill_name: String,
    linked: bool,
    /// Whether `skill remove` deleted a link; absent for `skill add`.
    #[serde(skip_serializing_if = "Option::is_none")]
    removed: Option<bool>,
    skills: Vec<String>,
}

/// Execute a skill command.
///
/// `skill list` does not need a user; linking commands do.
///
/// # Errors
///
/// Returns an error if the database is missing, a name does not resolve,
/// or the operation fails.
pub fn execute(
    command: &SkillCommands,
    db_path: Option<&PathBuf>,
    user: Option<i64>,
    json: bool,
) -> Result<()> {
    let db = open_database(db_path)?;

    match command {
        SkillCommands::List => execute_list(&db, json),
        SkillCommands::Add { project, skill } => {
            execute_add(&db, resolve_user_id(user)?, project, skill, json)
        }
        SkillCommands::Remove { project, skill } => {
            execute_remove(&db, resolve_user_id(user)?, project, skill, json)
        }
    }
}

/// Match user input against the stored skill names.
fn skill_name_for(db: &Database, input: &str) -> Result<String> {
    let names: Vec<String> = db.get_skills()?.into_iter().map(|s| s.skill_name).collect();
    resolve_skill(input, &names)
}

fn execute_list(db: &Database, json: bool) -> Result<()> {
    let skills = db.get_skills()?;

    if json {
        let output = SkillListOutput {
            count: skills.len(),
            skills,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Skills ({}):", skills.len());
    for skill in &skills {
        println!("  {}", skill.skill_name);
    }
    Ok(())
}

fn execute_add(db: &Database, user_id: i64, project: &str, skill: &str, json: bool) -> Result<()> {
    let skill_name = skill_name_for(db, skill)?;
    db.insert_skill(user_id, project, &skill_name)?;
    let skills = db.get_project_skill_names(user_id, project)?;

    if json {
        let output = SkillLinkOutput {
            project_name: project.to_string(),
            skill_name,
            linked: true,
            removed: None,
            skills,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Linked {skill_name} to {project}");
        println!("  Skills: {}", skills.join(", "));
    }
    Ok(())
}

fn unlink(db: &Database, user_id: i64, project: &str, skill: &str) -> Result<SkillLinkOutput> {
    let project_id = db
        .get_project_id(project, user_id)?
        .ok_or_else(|| Error::ProjectNotFound {
            name: project.to_string(),
        })?;
    let skill_name = skill_name_for(db, skill)?;
    let skill_id = db
        .get_skill_id(&skill_name)?
        .ok_or_else(|| Error::SkillNotFound {
            name: skill_name.clone(),
        })?;

    let removed = db.delete_skill(project_id, skill_id)?;
    Ok(SkillLinkOutput {
        project_name: project.to_string(),
        skill_name,
        linked: false,
        removed: Some(removed),
        skills: db.get_project_skill_names(user_id, project)?,
    })
}

fn execute_remove(db: &Database, user_id: i64, project: &str, skill: &str, json: bool) -> Result<()> {
    let output = unlink(db, user_id, project, skill)?;

    if json {
        println!("{}", serde_json::to_string(&output)?);
    } else if output.removed == Some(true) {
        println!("Removed {} from {project}", output.skill_name);
    } else {
        println!("{project} did not have {}", output.skill_name);
    }
    Ok(())
}
