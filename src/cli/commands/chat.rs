//! Terminal chat with the bot.
//!
//! Reads one message per line from stdin and prints every bot reply to
//! stdout. Ends on EOF, `!quit`, or `!exit`.

use super::open_database;
use crate::bot::{Bot, Channel};
use crate::config::resolve_user_id;
use crate::error::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// [`Channel`] over a line reader and a writer.
pub struct TerminalChannel<R, W> {
    reader: R,
    writer: W,
    prompt: bool,
}

impl<R: BufRead, W: Write> TerminalChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            prompt: false,
        }
    }

    /// Print a `> ` marker before each read.
    #[must_use]
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Channel for TerminalChannel<R, W> {
    fn send(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text.green())?;
        self.writer.flush()?;
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<String>> {
        if self.prompt {
            write!(self.writer, "{} ", ">".bold())?;
            self.writer.flush()?;
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Execute the chat command.
///
/// # Errors
///
/// Returns an error if the database is missing, no user id is set, or the
/// terminal cannot be read or written.
pub fn execute(db_path: Option<&PathBuf>, user: Option<i64>) -> Result<()> {
    let db = open_database(db_path)?;
    let user_id = resolve_user_id(user)?;
    let bot = Bot::new(db);

    info!(user_id, "Starting terminal chat");
    let interactive = io::IsTerminal::is_terminal(&io::stdin());
    let mut channel = TerminalChannel::new(io::stdin().lock(), io::stdout().lock())
        .with_prompt(interactive);

    if interactive {
        channel.send("Type !info for the list of commands, !quit to leave.")?;
    }
    bot.serve(user_id, &mut channel)
}
