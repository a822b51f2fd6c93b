//! projtrack CLI entry point.

use clap::Parser;
use projtrack::cli::commands;
use projtrack::cli::{Cli, Commands};
use projtrack::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    // --json, or stdout is not a terminal. Chat always stays plain text.
    let json = !matches!(cli.command, Commands::Chat)
        && (cli.json || !std::io::IsTerminal::is_terminal(&std::io::stdout()));

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // RUST_LOG wins over -v
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    let db = cli.db.as_ref();

    match &cli.command {
        Commands::Init => commands::init::execute(db, json),
        Commands::Version => commands::version::execute(json),
        Commands::Project { command } => commands::project::execute(command, db, cli.user, json),
        Commands::Skill { command } => commands::skill::execute(command, db, cli.user, json),
        Commands::Status { command } => commands::status::execute(command, db, json),
        Commands::Chat => commands::chat::execute(db, cli.user),
        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
