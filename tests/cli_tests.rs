use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn projtrack(db: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("projtrack");
    cmd.env_remove("RUST_LOG")
        .env("PROJTRACK_DB", db)
        .env("PROJTRACK_USER", "42");
    cmd
}

fn initialized() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("projects.db");
    projtrack(&db).arg("init").assert().success();
    (dir, db)
}

#[test]
fn test_cli_help() {
    let mut cmd = cargo_bin_cmd!("projtrack");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Track personal software projects"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("skill"))
        .stdout(predicate::str::contains("chat"));
}

#[test]
fn test_cli_version() {
    let mut cmd = cargo_bin_cmd!("projtrack");
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"projtrack\""));
}

#[test]
fn test_init_reports_seed_counts() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("data").join("projects.db");

    projtrack(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\":true"))
        .stdout(predicate::str::contains("\"skills\":4"))
        .stdout(predicate::str::contains("\"statuses\":5"));

    projtrack(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\":false"));
}

#[test]
fn test_missing_database_exit_code() {
    let dir = TempDir::new().unwrap();
    projtrack(&dir.path().join("none.db"))
        .args(["project", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NOT_INITIALIZED"));
}

#[test]
fn test_missing_user_exit_code() {
    let (_dir, db) = initialized();
    projtrack(&db)
        .env_remove("PROJTRACK_USER")
        .args(["project", "list"])
        .assert()
        .code(7);
}

#[test]
fn test_project_lifecycle() {
    let (_dir, db) = initialized();

    projtrack(&db)
        .args(["project", "add", "Tracker", "--url", "https://example.com/t", "-s", "wip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\":true"));

    projtrack(&db)
        .args(["project", "add", "Tracker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\":false"));

    projtrack(&db)
        .args(["skill", "add", "Tracker", "rust"])
        .assert()
        .code(4);

    projtrack(&db)
        .args(["skill", "add", "Tracker", "sql"])
        .assert()
        .success();

    projtrack(&db)
        .args(["project", "show", "Tracker"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In Development"))
        .stdout(predicate::str::contains("SQL"));

    projtrack(&db)
        .args(["project", "update", "Tracker", "description", "Tracks things"])
        .assert()
        .success();

    projtrack(&db)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracks things"))
        .stdout(predicate::str::contains("\"count\": 1"));

    projtrack(&db)
        .args(["project", "delete", "Tracker"])
        .assert()
        .success();

    projtrack(&db)
        .args(["project", "show", "Tracker"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("PROJECT_NOT_FOUND"));
}

#[test]
fn test_projects_are_per_user() {
    let (_dir, db) = initialized();

    projtrack(&db).args(["project", "add", "Mine"]).assert().success();

    projtrack(&db)
        .args(["--user", "7", "project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 0"));
}

#[test]
fn test_update_rejects_unknown_field() {
    let (_dir, db) = initialized();
    projtrack(&db).args(["project", "add", "Mine"]).assert().success();

    projtrack(&db)
        .args(["project", "update", "Mine", "user_id", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("INVALID_FIELD"));
}

#[test]
fn test_chat_over_stdin() {
    let (_dir, db) = initialized();

    projtrack(&db)
        .arg("chat")
        .write_stdin("!new_project\nSite\nhttps://example.com\nCompleted\n!projects\n!quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project name: Site"))
        .stdout(predicate::str::contains("Link: https://example.com"));

    projtrack(&db)
        .args(["project", "show", "Site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"));
}

#[test]
fn test_status_list() {
    let (_dir, db) = initialized();
    projtrack(&db)
        .args(["status", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prototyping"))
        .stdout(predicate::str::contains("Abandoned/Not supported"));
}

#[test]
fn test_skill_remove_reports_removed() {
    let (_dir, db) = initialized();
    projtrack(&db).args(["project", "add", "Mine"]).assert().success();
    projtrack(&db).args(["skill", "add", "Mine", "API"]).assert().success();

    projtrack(&db)
        .args(["skill", "remove", "Mine", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"removed\":true"));

    projtrack(&db)
        .args(["skill", "remove", "Mine", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"removed\":false"));
}

#[test]
fn test_rename_onto_existing_project_fails() {
    let (_dir, db) = initialized();
    projtrack(&db).args(["project", "add", "One"]).assert().success();
    projtrack(&db).args(["project", "add", "Two"]).assert().success();

    projtrack(&db)
        .args(["project", "update", "Two", "name", "One"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("PROJECT_EXISTS"));
}
