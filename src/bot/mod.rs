//! Conversational command layer.
//!
//! Each command is a linear script: prompt, wait for one reply, validate,
//! act. Scripts talk to the chat surface only through [`Channel`], so the
//! same code runs behind a chat platform adapter, the terminal (`projtrack
//! chat`), or a scripted channel in tests.
//!
//! # Submodules
//!
//! - [`command`] - `!command` parsing
//! - [`handlers`] - One script per command
//! - [`messages`] - User-facing text

pub mod command;
pub mod handlers;
pub mod messages;

pub use command::Command;

use crate::error::Result;
use crate::storage::Database;
use tracing::{debug, error};

/// Request/reply connection to one author in one conversation.
pub trait Channel {
    /// Deliver a message to the author.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be delivered.
    fn send(&mut self, text: &str) -> Result<()>;

    /// Wait for the author's next message. `None` means the conversation
    /// closed and the running script should stop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the chat surface fails.
    fn receive(&mut self) -> Result<Option<String>>;
}

/// Words that end a [`Bot::serve`] loop.
const QUIT_WORDS: [&str; 2] = ["!quit", "!exit"];

/// The project-tracking bot.
#[derive(Debug, Clone)]
pub struct Bot {
    db: Database,
}

impl Bot {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Handle one incoming message from `user_id`.
    ///
    /// `!commands` run their script; any other text is looked up as one of
    /// the user's project names.
    ///
    /// # Errors
    ///
    /// Returns storage or channel errors. Invalid user input is answered on
    /// the channel, not returned.
    pub fn handle(&self, user_id: i64, message: &str, channel: &mut dyn Channel) -> Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(());
        }

        match Command::parse(message) {
            Some(cmd) => {
                debug!(user_id, command = %cmd, "Dispatching command");
                self.run(cmd, user_id, channel)
            }
            None if message.starts_with(command::PREFIX) => channel.send(messages::UNKNOWN_COMMAND),
            None => self.project_lookup(user_id, message, channel),
        }
    }

    /// Run a command script.
    ///
    /// # Errors
    ///
    /// Returns storage or channel errors.
    pub fn run(&self, cmd: Command, user_id: i64, channel: &mut dyn Channel) -> Result<()> {
        match cmd {
            Command::Start => self.start(channel),
            Command::Info => self.info(channel),
            Command::NewProject => self.new_project(user_id, channel),
            Command::Projects => self.projects(user_id, channel),
            Command::Skills => self.skills(user_id, channel),
            Command::Delete => self.delete(user_id, channel),
            Command::UpdateProjects => self.update_projects(user_id, channel),
        }
    }

    /// Read messages until the channel closes or the user quits.
    ///
    /// A failing command is reported on the channel and the loop continues;
    /// only channel errors end it early.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel fails.
    pub fn serve(&self, user_id: i64, channel: &mut dyn Channel) -> Result<()> {
        while let Some(message) = channel.receive()? {
            if QUIT_WORDS.iter().any(|q| message.trim().eq_ignore_ascii_case(q)) {
                break;
            }

            if let Err(e) = self.handle(user_id, &message, channel) {
                error!(user_id, error = %e, "Command failed");
                channel.send(&format!("Something went wrong: {e}"))?;
            }
        }
        Ok(())
    }
}
