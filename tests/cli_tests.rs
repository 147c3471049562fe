//! CLI integration tests for the projectini binary
//!
//! These tests verify argument parsing and the fail-fast configuration
//! checks by running the actual compiled binary. None of them reach the
//! network: every GitHub-facing command is exercised without a token.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command instance for the projectini binary
fn projectini_cmd() -> Command {
    let mut cmd = Command::cargo_bin("projectini").expect("failed to find projectini binary");
    // Make sure a developer's real token never leaks into these tests.
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    projectini_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("cleanup"))
        .stdout(predicate::str::contains("delete-issue"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_flag() {
    projectini_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand_fails() {
    projectini_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// Fail-fast configuration checks
// ============================================================================

#[test]
fn test_sync_without_token_fails_fast() {
    projectini_cmd()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_cleanup_without_token_fails_fast() {
    projectini_cmd()
        .arg("cleanup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_delete_issue_without_token_fails_fast() {
    projectini_cmd()
        .args(["delete-issue", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_invalid_project_number_rejected() {
    projectini_cmd()
        .env("GITHUB_TOKEN", "ghp_dummy")
        .env("GITHUB_PROJECT_NUMBER", "not_a_number")
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_PROJECT_NUMBER"));
}

// ============================================================================
// Argument validation
// ============================================================================

#[test]
fn test_delete_issue_requires_number() {
    projectini_cmd()
        .arg("delete-issue")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NUMBER"));
}

#[test]
fn test_delete_issue_rejects_non_numeric() {
    projectini_cmd()
        .args(["delete-issue", "abc"])
        .assert()
        .failure();
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    projectini_cmd()
        .args(["--quiet", "--verbose", "sync"])
        .assert()
        .failure();
}

#[test]
fn test_serve_help_shows_bind_options() {
    projectini_cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--bind"));
}
