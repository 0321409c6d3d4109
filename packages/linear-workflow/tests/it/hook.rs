//! Dispatch and fail-open behavior of `claude hook`.

use pretty_assertions::assert_eq as pretty_assert_eq;
use serde_json::json;
use simple_test_case::test_case;

use crate::{Project, prompt_hook, write_hook};

#[test_case(r#"{"garbage""#; "truncated json")]
#[test_case(""; "empty input")]
#[test_case("not json at all"; "plain text")]
#[test_case(r#"{"hook_event_name": 42}"#; "wrong field type")]
#[test]
fn malformed_input_is_silent(input: &str) {
    let project = Project::new().branch("LIN-1-x").activate();
    project.run(&["claude", "hook"], input).assert_silent();
}

#[test]
fn unknown_event_is_silent() {
    let project = Project::new().branch("LIN-1-x").activate();
    let payload = json!({
        "hook_event_name": "Stop",
        "session_id": "test",
        "cwd": project.path(),
        "stop_hook_active": false
    });
    project.hook(&payload).assert_silent();
}

#[test]
fn unknown_tool_is_silent() {
    let project = Project::new().branch("LIN-1-x").activate();
    let payload = json!({
        "hook_event_name": "PreToolUse",
        "cwd": project.path(),
        "tool_name": "WebFetch",
        "tool_input": { "url": "https://example.com", "prompt": "x" }
    });
    project.hook(&payload).assert_silent();
}

#[test]
fn inactive_project_write_is_silent() {
    let project = Project::new();
    project.hook(&write_hook(&project, "src/main.rs")).assert_silent();
}

#[test]
fn protected_branch_write_warns() {
    let project = Project::new().activate();
    let outcome = project.hook(&write_hook(&project, "src/main.rs"));
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    assert!(
        outcome.stdout.starts_with("[Branch Warning]"),
        "expected branch warning, got: {outcome:?}"
    );
    assert!(outcome.stdout.contains("'main'"));
}

#[test]
fn tracked_branch_write_without_state_suggests_sync() {
    let project = Project::new().branch("feat/LIN-12-login");
    let outcome = project.hook(&write_hook(&project, "src/main.rs"));
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    assert!(
        outcome
            .stdout
            .contains("No local state file found at: .claude/linear-tasks/LIN-12.json"),
        "got: {outcome:?}"
    );
}

#[test]
fn tracked_branch_write_with_state_confirms() {
    let project = Project::new()
        .branch("feat/LIN-12-login")
        .file(".claude/linear-tasks/LIN-12.json", r#"{"status": "in-progress"}"#);
    let outcome = project.hook(&write_hook(&project, "src/main.rs"));
    pretty_assert_eq!(
        outcome.stdout.trim(),
        "[Linear Branch] Working on: feat/LIN-12-login (LIN-12)"
    );
}

#[test]
fn cwd_flag_overrides_payload() {
    let active = Project::new().branch("LIN-3-x").activate();
    let inactive = Project::new();
    let path = active.path().to_str().expect("utf-8 temp path");
    let outcome = inactive.run(
        &["--cwd", path, "claude", "hook"],
        &prompt_hook(&inactive, "hello").to_string(),
    );
    assert!(outcome.stdout.contains("LIN-3"), "got: {outcome:?}");
}

#[test]
fn not_a_git_repository_is_silent() {
    let dir = tempfile::TempDir::new().expect("create temp dir");
    let payload = json!({
        "hook_event_name": "UserPromptSubmit",
        "cwd": dir.path(),
        "prompt": "hi"
    });
    crate::run_in(dir.path(), &["claude", "hook"], &payload.to_string()).assert_silent();
}
