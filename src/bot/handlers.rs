//! Command scripts.
//!
//! Every script returns `Ok(())` when the conversation closes mid-way
//! (`receive` yields `None`); nothing is written in that case.

use super::{messages, Bot, Channel};
use crate::error::{Error, Result};
use crate::model::{NewProject, ProjectField, ProjectUpdate};
use crate::validate::{resolve_project, resolve_skill, resolve_status, suggest};
use tracing::{info, warn};

/// Send `prompt` and wait for one reply.
fn ask(channel: &mut dyn Channel, prompt: &str) -> Result<Option<String>> {
    channel.send(prompt)?;
    Ok(channel.receive()?.map(|reply| reply.trim().to_string()))
}

/// Send `prompt`, then the options one per line, and wait for one reply.
fn choose(channel: &mut dyn Channel, prompt: &str, options: &[String]) -> Result<Option<String>> {
    channel.send(prompt)?;
    ask(channel, &options.join("\n"))
}

/// Answer an invalid choice with `message` plus a suggestion when one is close.
fn reject(channel: &mut dyn Channel, message: &str, input: &str, options: &[String]) -> Result<()> {
    match suggest(input, options) {
        Some(s) => channel.send(&format!("{message}\n{}", messages::did_you_mean(&s))),
        None => channel.send(message),
    }
}

impl Bot {
    pub(crate) fn start(&self, channel: &mut dyn Channel) -> Result<()> {
        channel.send(messages::GREETING)?;
        self.info(channel)
    }

    pub(crate) fn info(&self, channel: &mut dyn Channel) -> Result<()> {
        channel.send(&messages::info())
    }

    fn project_names(&self, user_id: i64) -> Result<Vec<String>> {
        Ok(self
            .db
            .get_projects(user_id)?
            .into_iter()
            .map(|p| p.project_name)
            .collect())
    }

    fn status_names(&self) -> Result<Vec<String>> {
        Ok(self
            .db
            .get_statuses()?
            .into_iter()
            .map(|s| s.status_name)
            .collect())
    }

    /// Resolve a status name to its id, answering on the channel when it
    /// is not one of `statuses`.
    fn pick_status(
        &self,
        channel: &mut dyn Channel,
        reply: &str,
        statuses: &[String],
    ) -> Result<Option<i64>> {
        let Ok(name) = resolve_status(reply, statuses) else {
            warn!(input = reply, "Rejected status");
            reject(channel, messages::BAD_STATUS, reply, statuses)?;
            return Ok(None);
        };
        let id = self
            .db
            .get_status_id(&name)?
            .ok_or(Error::StatusNotFound { name })?;
        Ok(Some(id))
    }

    pub(crate) fn new_project(&self, user_id: i64, channel: &mut dyn Channel) -> Result<()> {
        let Some(name) = ask(channel, messages::ASK_NAME)? else {
            return Ok(());
        };
        if name.is_empty() {
            return channel.send(messages::EMPTY_NAME);
        }

        let Some(link) = ask(channel, messages::ASK_LINK)? else {
            return Ok(());
        };

        let statuses = self.status_names()?;
        let Some(reply) = choose(channel, messages::ASK_STATUS, &statuses)? else {
            return Ok(());
        };
        let Some(status_id) = self.pick_status(channel, &reply, &statuses)? else {
            return Ok(());
        };

        let url = (!link.is_empty()).then_some(link);
        let inserted = self
            .db
            .insert_project(&[NewProject::new(user_id, name.as_str(), url, status_id)])?;

        if inserted == 0 {
            return channel.send(&messages::duplicate_project(&name));
        }
        info!(user_id, project = %name, "Project created from chat");
        channel.send(messages::PROJECT_SAVED)
    }

    pub(crate) fn projects(&self, user_id: i64, channel: &mut dyn Channel) -> Result<()> {
        let projects = self.db.get_projects(user_id)?;
        if projects.is_empty() {
            return channel.send(messages::NO_PROJECTS);
        }
        channel.send(&messages::project_list(&projects))
    }

    pub(crate) fn skills(&self, user_id: i64, channel: &mut dyn Channel) -> Result<()> {
        let projects = self.project_names(user_id)?;
        if projects.is_empty() {
            return channel.send(messages::NO_PROJECTS);
        }

        let Some(reply) = choose(channel, messages::PICK_PROJECT_FOR_SKILL, &projects)? else {
            return Ok(());
        };
        let Ok(project) = resolve_project(&reply, &projects) else {
            return reject(channel, messages::BAD_PROJECT, &reply, &projects);
        };

        let skills: Vec<String> = self
            .db
            .get_skills()?
            .into_iter()
            .map(|s| s.skill_name)
            .collect();
        let Some(reply) = choose(channel, messages::PICK_SKILL, &skills)? else {
            return Ok(());
        };
        let Ok(skill) = resolve_skill(&reply, &skills) else {
            warn!(input = %reply, "Rejected skill");
            return reject(channel, messages::BAD_SKILL, &reply, &skills);
        };

        self.db.insert_skill(user_id, &project, &skill)?;
        channel.send(&messages::skill_added(&skill, &project))
    }

    pub(crate) fn delete(&self, user_id: i64, channel: &mut dyn Channel) -> Result<()> {
        let projects = self.project_names(user_id)?;
        if projects.is_empty() {
            return channel.send(messages::NO_PROJECTS);
        }

        let Some(reply) = choose(channel, messages::PICK_PROJECT_TO_DELETE, &projects)? else {
            return Ok(());
        };
        let Ok(project) = resolve_project(&reply, &projects) else {
            return reject(channel, messages::BAD_PROJECT, &reply, &projects);
        };

        let Some(project_id) = self.db.get_project_id(&project, user_id)? else {
            return channel.send(messages::BAD_PROJECT);
        };
        self.db.delete_project(user_id, project_id)?;
        channel.send(&messages::project_deleted(&project))
    }

    pub(crate) fn update_projects(&self, user_id: i64, channel: &mut dyn Channel) -> Result<()> {
        let projects = self.project_names(user_id)?;
        if projects.is_empty() {
            return channel.send(messages::NO_PROJECTS);
        }

        let Some(reply) = choose(channel, messages::PICK_PROJECT_TO_UPDATE, &projects)? else {
            return Ok(());
        };
        let Ok(project) = resolve_project(&reply, &projects) else {
            return reject(channel, messages::BAD_PROJECT, &reply, &projects);
        };

        let labels: Vec<String> = ProjectField::ALL
            .iter()
            .map(|f| f.label().to_string())
            .collect();
        let Some(reply) = choose(channel, messages::PICK_FIELD, &labels)? else {
            return Ok(());
        };
        let Ok(field) = ProjectField::parse(&reply) else {
            warn!(input = %reply, "Rejected field");
            return reject(channel, messages::BAD_FIELD, &reply, &labels);
        };

        let update = if field == ProjectField::Status {
            let statuses = self.status_names()?;
            let Some(reply) = choose(channel, messages::PICK_NEW_STATUS, &statuses)? else {
                return Ok(());
            };
            let Some(status_id) = self.pick_status(channel, &reply, &statuses)? else {
                return Ok(());
            };
            ProjectUpdate::Status(status_id)
        } else {
            let Some(value) = ask(channel, &messages::ask_new_value(field.label()))? else {
                return Ok(());
            };
            match ProjectUpdate::text(field, value) {
                Ok(update) => update,
                Err(e) => return channel.send(&e.to_string()),
            }
        };

        match self.db.update_project(user_id, &project, &update) {
            Ok(()) => channel.send(messages::UPDATE_DONE),
            Err(Error::ProjectExists { name }) => {
                warn!(user_id, project = %name, "Rejected rename onto existing project");
                channel.send(&messages::duplicate_project(&name))
            }
            Err(e) => Err(e),
        }
    }

    /// Reply to free text that names one of the user's projects.
    pub(crate) fn project_lookup(&self, user_id: i64, text: &str, channel: &mut dyn Channel) -> Result<()> {
        let projects = self.project_names(user_id)?;
        let Ok(project) = resolve_project(text, &projects) else {
            return channel.send(messages::UNKNOWN_TEXT);
        };

        match self.db.get_project_info(user_id, &project)? {
            Some(info) => {
                let skills = self.db.get_project_skills(user_id, &project)?;
                channel.send(&messages::project_details(&info, &skills))
            }
            None => channel.send(messages::UNKNOWN_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{database, ScriptedChannel};
    use super::*;
    use crate::bot::Command;
    use crate::storage::Database;

    const USER: i64 = 1;

    fn bot_with_project(name: &str) -> (tempfile::TempDir, Bot) {
        let (dir, db) = database();
        let status = db.get_status_id("Prototyping").unwrap().unwrap();
        db.insert_project(&[NewProject::new(USER, name, Some("https://x".to_string()), status)])
            .unwrap();
        (dir, Bot::new(db))
    }

    fn run(bot: &Bot, cmd: Command, replies: &[&str]) -> ScriptedChannel {
        let mut ch = ScriptedChannel::new(replies);
        bot.run(cmd, USER, &mut ch).unwrap();
        ch
    }

    fn db(bot: &Bot) -> &Database {
        bot.database()
    }

    #[test]
    fn test_start_sends_greeting_and_info() {
        let (_dir, store) = database();
        let ch = run(&Bot::new(store), Command::Start, &[]);
        assert_eq!(ch.sent.len(), 2);
        assert_eq!(ch.sent[0], messages::GREETING);
        assert!(ch.sent[1].contains("!new_project - use to add a new project"));
        assert!(!ch.sent[1].contains("!start"));
    }

    #[test]
    fn test_new_project_flow() {
        let (_dir, store) = database();
        let bot = Bot::new(store);

        let ch = run(&bot, Command::NewProject, &["Discord Bot", "https://github.com/u/bot", "wip"]);

        assert_eq!(ch.sent[0], messages::ASK_NAME);
        assert_eq!(ch.sent[1], messages::ASK_LINK);
        assert_eq!(ch.sent[2], messages::ASK_STATUS);
        assert!(ch.sent[3].starts_with("Prototyping\nIn Development"));
        assert_eq!(ch.last(), messages::PROJECT_SAVED);

        let info = db(&bot).get_project_info(USER, "Discord Bot").unwrap().unwrap();
        assert_eq!(info.status_name.as_deref(), Some("In Development"));
        assert_eq!(info.url.as_deref(), Some("https://github.com/u/bot"));
    }

    #[test]
    fn test_new_project_rejects_unknown_status() {
        let (_dir, store) = database();
        let bot = Bot::new(store);

        let ch = run(&bot, Command::NewProject, &["Bot", "", "Complted"]);
        assert!(ch.last().starts_with(messages::BAD_STATUS));
        assert!(ch.last().contains("Did you mean: Completed?"));
        assert!(db(&bot).get_projects(USER).unwrap().is_empty());
    }

    #[test]
    fn test_new_project_reports_duplicate() {
        let (_dir, bot) = bot_with_project("Bot");
        let ch = run(&bot, Command::NewProject, &["Bot", "", "Completed"]);
        assert_eq!(ch.last(), messages::duplicate_project("Bot"));
        assert_eq!(db(&bot).get_projects(USER).unwrap().len(), 1);
    }

    #[test]
    fn test_new_project_closed_midway_saves_nothing() {
        let (_dir, store) = database();
        let bot = Bot::new(store);
        let ch = run(&bot, Command::NewProject, &["Bot"]);
        assert_eq!(ch.last(), messages::ASK_LINK);
        assert!(db(&bot).get_projects(USER).unwrap().is_empty());
    }

    #[test]
    fn test_commands_without_projects() {
        let (_dir, store) = database();
        let bot = Bot::new(store);
        for cmd in [Command::Projects, Command::Skills, Command::Delete, Command::UpdateProjects] {
            let ch = run(&bot, cmd, &[]);
            assert_eq!(ch.sent, [messages::NO_PROJECTS], "{cmd}");
        }
    }

    #[test]
    fn test_skills_flow() {
        let (_dir, bot) = bot_with_project("Bot");

        let ch = run(&bot, Command::Skills, &["bot", "python"]);
        assert_eq!(ch.sent[0], messages::PICK_PROJECT_FOR_SKILL);
        assert_eq!(ch.sent[1], "Bot");
        assert_eq!(ch.sent[2], messages::PICK_SKILL);
        assert_eq!(ch.last(), messages::skill_added("Python", "Bot"));
        assert_eq!(db(&bot).get_project_skills(USER, "Bot").unwrap(), "Python");
    }

    #[test]
    fn test_skills_rejects_unknown_choices() {
        let (_dir, bot) = bot_with_project("Bot");

        let ch = run(&bot, Command::Skills, &["Other"]);
        assert!(ch.last().starts_with(messages::BAD_PROJECT));

        let ch = run(&bot, Command::Skills, &["Bot", "Rust"]);
        assert!(ch.last().starts_with(messages::BAD_SKILL));
        assert_eq!(db(&bot).get_project_skills(USER, "Bot").unwrap(), "");
    }

    #[test]
    fn test_delete_flow() {
        let (_dir, bot) = bot_with_project("Bot");
        let ch = run(&bot, Command::Delete, &["Bot"]);
        assert_eq!(ch.last(), messages::project_deleted("Bot"));
        assert!(db(&bot).get_projects(USER).unwrap().is_empty());
    }

    #[test]
    fn test_delete_project_with_skills() {
        let (_dir, bot) = bot_with_project("Bot");
        db(&bot).insert_skill(USER, "Bot", "Python").unwrap();
        db(&bot).insert_skill(USER, "Bot", "SQL").unwrap();

        let ch = run(&bot, Command::Delete, &["Bot"]);
        assert_eq!(ch.last(), messages::project_deleted("Bot"));
        assert!(db(&bot).get_projects(USER).unwrap().is_empty());
    }

    #[test]
    fn test_other_users_projects_are_invisible() {
        let (_dir, bot) = bot_with_project("Bot");
        let mut ch = ScriptedChannel::new(&["Bot"]);
        bot.run(Command::Delete, 2, &mut ch).unwrap();
        assert_eq!(ch.sent, [messages::NO_PROJECTS]);
        assert_eq!(db(&bot).get_projects(USER).unwrap().len(), 1);
    }

    #[test]
    fn test_update_text_field() {
        let (_dir, bot) = bot_with_project("Bot");

        let ch = run(&bot, Command::UpdateProjects, &["Bot", "Description", "Posts reminders"]);
        assert_eq!(ch.sent[3], "Project name\nDescription\nLink\nStatus");
        assert_eq!(ch.sent[4], messages::ask_new_value("Description"));
        assert_eq!(ch.last(), messages::UPDATE_DONE);

        let info = db(&bot).get_project_info(USER, "Bot").unwrap().unwrap();
        assert_eq!(info.description.as_deref(), Some("Posts reminders"));
    }

    #[test]
    fn test_update_status() {
        let (_dir, bot) = bot_with_project("Bot");

        let ch = run(&bot, Command::UpdateProjects, &["Bot", "Status", "Completed"]);
        assert_eq!(ch.last(), messages::UPDATE_DONE);

        let info = db(&bot).get_project_info(USER, "Bot").unwrap().unwrap();
        assert_eq!(info.status_name.as_deref(), Some("Completed"));
    }

    #[test]
    fn test_update_rename_and_bad_field() {
        let (_dir, bot) = bot_with_project("Bot");

        let ch = run(&bot, Command::UpdateProjects, &["Bot", "Owner"]);
        assert!(ch.last().starts_with(messages::BAD_FIELD));

        let ch = run(&bot, Command::UpdateProjects, &["Bot", "Project name", ""]);
        assert!(ch.last().contains("cannot be empty"));

        let ch = run(&bot, Command::UpdateProjects, &["Bot", "Project name", "Reminder Bot"]);
        assert_eq!(ch.last(), messages::UPDATE_DONE);
        assert!(db(&bot).get_project_id("Reminder Bot", USER).unwrap().is_some());
    }

    #[test]
    fn test_rename_onto_existing_name_is_refused() {
        let (_dir, bot) = bot_with_project("Bot");
        let status = db(&bot).get_status_id("Completed").unwrap().unwrap();
        db(&bot)
            .insert_project(&[NewProject::new(USER, "Site", None, status)])
            .unwrap();

        let ch = run(&bot, Command::UpdateProjects, &["Site", "Project name", "Bot"]);
        assert_eq!(ch.last(), messages::duplicate_project("Bot"));

        let names: Vec<String> = db(&bot)
            .get_projects(USER)
            .unwrap()
            .into_iter()
            .map(|p| p.project_name)
            .collect();
        assert_eq!(names, ["Bot", "Site"]);
    }

    #[test]
    fn test_project_lookup_by_name() {
        let (_dir, bot) = bot_with_project("Bot");
        db(&bot).insert_skill(USER, "Bot", "Discord").unwrap();

        let mut ch = ScriptedChannel::default();
        bot.handle(USER, "Bot", &mut ch).unwrap();
        assert_eq!(
            ch.last(),
            "Project name: Bot\nDescription: -\nLink: https://x\nStatus: Prototyping\nSkills: Discord"
        );

        bot.handle(2, "Bot", &mut ch).unwrap();
        assert_eq!(ch.last(), messages::UNKNOWN_TEXT);
    }
}
