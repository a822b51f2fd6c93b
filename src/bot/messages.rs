//! User-facing bot text.

use super::command::Command;
use crate::model::{Project, ProjectInfo};

pub const GREETING: &str =
    "Hi! I'm a project manager bot.\nI'll help you save your projects and everything about them!";

pub const NO_PROJECTS: &str =
    "You don't have any projects yet!\nYou can add one with the !new_project command";

pub const ASK_NAME: &str = "Enter the project name:";
pub const ASK_LINK: &str = "Enter the project link:";
pub const ASK_STATUS: &str = "Enter the current project status:";
pub const EMPTY_NAME: &str = "The project name cannot be empty, please try again!";
pub const BAD_STATUS: &str = "You picked a status that is not in the list, please try again!";
pub const PROJECT_SAVED: &str = "The project has been saved";

pub const PICK_PROJECT_FOR_SKILL: &str = "Choose the project you want to add a skill to";
pub const PICK_SKILL: &str = "Choose a skill";
pub const BAD_PROJECT: &str = "You don't have that project, please try again!";
pub const BAD_SKILL: &str = "Looks like you picked a skill that is not in the list, please try again!";

pub const PICK_PROJECT_TO_DELETE: &str = "Choose the project you want to delete";

pub const PICK_PROJECT_TO_UPDATE: &str = "Choose the project you want to change";
pub const PICK_FIELD: &str = "Choose what you want to change in the project";
pub const BAD_FIELD: &str = "Looks like you made a mistake, please try again!";
pub const PICK_NEW_STATUS: &str = "Choose the new project status";
pub const UPDATE_DONE: &str = "Done! The update has been made!";

pub const UNKNOWN_COMMAND: &str = "I don't know that command. Type !info to see what I can do.";
pub const UNKNOWN_TEXT: &str =
    "I didn't understand that. Type !info to see the commands, or send one of your project names.";

/// Command list for `!info`.
#[must_use]
pub fn info() -> String {
    let mut text = String::from("Here are the commands that can help you:\n\n");
    for cmd in Command::ALL {
        if let Some(help) = cmd.help() {
            text.push_str(&format!("{cmd} - {help}\n"));
        }
    }
    text.push_str("\nYou can also send a project name to see information about it!");
    text
}

/// One block per project: name and link.
#[must_use]
pub fn project_list(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|p| {
            format!(
                "Project name: {}\nLink: {}\n",
                p.project_name,
                p.url.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full details of one project.
#[must_use]
pub fn project_details(info: &ProjectInfo, skills: &str) -> String {
    format!(
        "Project name: {}\nDescription: {}\nLink: {}\nStatus: {}\nSkills: {}",
        info.project_name,
        info.description.as_deref().unwrap_or("-"),
        info.url.as_deref().unwrap_or("-"),
        info.status_name.as_deref().unwrap_or("-"),
        if skills.is_empty() { "none yet" } else { skills },
    )
}

#[must_use]
pub fn duplicate_project(name: &str) -> String {
    format!("You already have a project named {name}")
}

#[must_use]
pub fn skill_added(skill: &str, project: &str) -> String {
    format!("Skill {skill} has been added to project {project}")
}

#[must_use]
pub fn project_deleted(name: &str) -> String {
    format!("Project {name} has been deleted!")
}

#[must_use]
pub fn ask_new_value(label: &str) -> String {
    format!("Enter the new value for {label}")
}

#[must_use]
pub fn did_you_mean(suggestion: &str) -> String {
    format!("Did you mean: {suggestion}?")
}
