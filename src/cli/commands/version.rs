//! Version command implementation.

use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    sqlite: &'a str,
}

/// Print the crate version and the linked SQLite version.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let sqlite = rusqlite::version();

    if json {
        let output = VersionOutput {
            name,
            version,
            sqlite,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("{name} version {version} (sqlite {sqlite})");
    Ok(())
}
