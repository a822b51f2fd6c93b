//! Chat command parsing.

use std::fmt;

/// Prefix that marks a message as a command.
pub const PREFIX: char = '!';

/// Commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Info,
    NewProject,
    Projects,
    Skills,
    Delete,
    UpdateProjects,
}

impl Command {
    pub const ALL: [Self; 7] = [
        Self::Start,
        Self::Info,
        Self::NewProject,
        Self::Projects,
        Self::Skills,
        Self::Delete,
        Self::UpdateProjects,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Info => "info",
            Self::NewProject => "new_project",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Delete => "delete",
            Self::UpdateProjects => "update_projects",
        }
    }

    /// One-line usage shown by `!info`. `None` for commands not listed there.
    #[must_use]
    pub const fn help(self) -> Option<&'static str> {
        match self {
            Self::Start | Self::Info => None,
            Self::NewProject => Some("use to add a new project"),
            Self::Projects => Some("use to show all your projects"),
            Self::UpdateProjects => Some("use to change project data"),
            Self::Skills => Some("use to link skills to a project"),
            Self::Delete => Some("use to delete a project"),
        }
    }

    /// Parse `!name` (first word only). `None` for non-commands and
    /// unknown names.
    #[must_use]
    pub fn parse(message: &str) -> Option<Self> {
        let word = message.split_whitespace().next()?;
        let name = word.strip_prefix(PREFIX)?;
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.name())
    }
}
