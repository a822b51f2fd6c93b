//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// projtrack - Track personal software projects
#[derive(Parser, Debug)]
#[command(name = "projtrack", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.projtrack/projects.db)
    #[arg(long, global = true, env = "PROJTRACK_DB")]
    pub db: Option<PathBuf>,

    /// User id that owns the projects
    #[arg(long, global = true, env = "PROJTRACK_USER")]
    pub user: Option<i64>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database, its tables, and the default skills and statuses
    ///
    /// Safe to run again on an existing database.
    Init,

    /// Print version information
    Version,

    /// Project management
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Skills and project skill links
    Skill {
        #[command(subcommand)]
        command: SkillCommands,
    },

    /// Project statuses
    Status {
        #[command(subcommand)]
        command: StatusCommands,
    },

    /// Talk to the bot in the terminal (`!info` lists commands, `!quit` exits)
    Chat,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Project Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Add a project
    Add(ProjectAddArgs),

    /// List your projects
    List,

    /// Show a project with its status and skills
    Show {
        /// Project name
        name: String,
    },

    /// Update one field of a project
    Update(ProjectUpdateArgs),

    /// Delete a project
    Delete {
        /// Project name
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct ProjectAddArgs {
    /// Project name
    pub name: String,

    /// Link to the project
    #[arg(long)]
    pub url: Option<String>,

    /// Current status (default: Prototyping)
    #[arg(long, short)]
    pub status: Option<String>,

    /// Description
    #[arg(long, short)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProjectUpdateArgs {
    /// Project name
    pub name: String,

    /// Field to change: project_name, description, url, status
    pub field: String,

    /// New value (a status name for `status`)
    pub value: String,
}

// ============================================================================
// Skill Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum SkillCommands {
    /// List available skills
    List,

    /// Link a skill to a project
    Add {
        /// Project name
        project: String,
        /// Skill name
        skill: String,
    },

    /// Unlink a skill from a project
    Remove {
        /// Project name
        project: String,
        /// Skill name
        skill: String,
    },
}

// ============================================================================
// Status Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum StatusCommands {
    /// List available statuses
    List,
}
