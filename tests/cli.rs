use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const AUTHORS: &str = "TS, Tony Stark, tstark\nCK, Clark Kent, ckent\n";

/// Runs git-coco outside of any repository, with `home` as the home directory.
fn cmd(home: &Path) -> Command {
    let mut command = Command::cargo_bin("git-coco").unwrap();
    command
        .current_dir(home)
        .env("HOME", home)
        .env("GIT_CEILING_DIRECTORIES", home)
        .env("GIT_COCO_DOMAIN", "example.com")
        .env("GIT_COCO_USE_ISSUE_IN_MSG", "false")
        .env("GIT_COCO_NOTICE_DELAY_MS", "0")
        .env_remove("RUST_LOG");
    command
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();

    cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("prepare-msg"))
        .stdout(contains("install"));
}

#[test]
fn authors_lists_directory() {
    let home = TempDir::new().unwrap();
    let authors_file = home.path().join("authors.txt");
    fs::write(&authors_file, AUTHORS).unwrap();

    cmd(home.path())
        .env("GIT_COCO_AUTHORS_FILE", &authors_file)
        .arg("authors")
        .assert()
        .success()
        .stdout(contains("CK: Clark Kent <ckent@example.com>"))
        .stdout(contains("TS: Tony Stark <tstark@example.com>"));
}

#[test]
fn authors_fails_on_missing_file() {
    let home = TempDir::new().unwrap();

    cmd(home.path())
        .env("GIT_COCO_AUTHORS_FILE", home.path().join("missing.txt"))
        .arg("authors")
        .assert()
        .failure()
        .stderr(contains("Could not read authors file"));
}

#[test]
fn prepare_msg_uses_autosuggest_file() {
    let home = TempDir::new().unwrap();
    let suggestion = home.path().join("coauthors_msg.txt");
    fs::write(&suggestion, "\n\nCo-authored-by: Tony Stark <tstark@example.com>\n\n").unwrap();

    let msg_file = home.path().join("COMMIT_EDITMSG");
    fs::write(&msg_file, "Add login page\n\n# Please enter the commit message\n").unwrap();

    cmd(home.path())
        .env("GIT_COCO_COAUTHORS_GIT_MSG_FILE", &suggestion)
        .arg("prepare-msg")
        .arg(&msg_file)
        .assert()
        .success();

    let message = fs::read_to_string(&msg_file).unwrap();
    assert_eq!(
        message,
        "Add login page\n\n\nCo-authored-by: Tony Stark <tstark@example.com>\n\n\
         # Please enter the commit message\n"
    );
    // Two blank lines between the body and the trailers
    assert!(message.contains("page\n\n\nCo-authored-by"));
}

#[test]
fn prepare_msg_leaves_merge_messages_alone() {
    let home = TempDir::new().unwrap();
    let msg_file = home.path().join("COMMIT_EDITMSG");
    fs::write(&msg_file, "Merge branch 'feature'\n").unwrap();

    cmd(home.path())
        .arg("prepare-msg")
        .arg(&msg_file)
        .arg("merge")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&msg_file).unwrap(),
        "Merge branch 'feature'\n"
    );
}

#[test]
fn init_creates_config_once() {
    let home = TempDir::new().unwrap();
    let args = [
        "init",
        "--domain",
        "example.com",
        "--use-issue",
        "true",
        "--issue-url-base",
        "https://tracker/",
    ];

    cmd(home.path()).args(args).assert().success();

    let config_file = home.path().join(".config/git-coco/config.toml");
    let content = fs::read_to_string(&config_file).unwrap();
    assert!(content.contains("domain = \"example.com\""));
    assert!(content.contains("use_issue_in_msg = true"));
    assert!(content.contains("issue_url_base = \"https://tracker/\""));

    cmd(home.path())
        .args(args)
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();

    cmd(home.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(contains("git-coco"));
}
