//! CLI subcommand smoke tests.

use std::fs;

use pretty_assertions::assert_eq as pretty_assert_eq;
use serde_json::Value;

use crate::{Project, run_in};

#[test]
fn check_commit_accepts_emoji_subject() {
    let project = Project::new();
    let outcome = project.run(&["check-commit", "✨ feat: add x"], "");
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    assert!(outcome.stdout.starts_with("✓ feat"), "{outcome:?}");
}

#[test]
fn check_commit_rejects_with_exit_2() {
    let project = Project::new();
    let outcome = project.run(&["check-commit", "added stuff"], "");
    pretty_assert_eq!(outcome.code, 2, "{outcome:?}");
    assert!(outcome.stderr.contains("Invalid commit format: 'added stuff'"));
}

#[test]
fn check_commit_strict_emoji_names_pairing() {
    let project = Project::new();
    let lenient = project.run(&["check-commit", "🐛 feat: x"], "");
    pretty_assert_eq!(lenient.code, 0, "{lenient:?}");

    let strict = project.run(&["check-commit", "--strict-emoji", "🐛 feat: x"], "");
    pretty_assert_eq!(strict.code, 2, "{strict:?}");
    assert!(
        strict.stderr.contains("Emoji 🐛 marks 'fix' commits, but the type is 'feat'"),
        "{strict:?}"
    );
}

#[test]
fn check_commit_strict_emoji_from_settings() {
    let project = Project::new();
    let settings = project.path().join("strict.yaml");
    fs::write(&settings, "version: 1\nstrict_emoji: true\n").expect("write settings");
    let settings = settings.to_str().expect("utf-8 temp path");
    let outcome = project.run(&["--settings", settings, "check-commit", "🐛 feat: x"], "");
    pretty_assert_eq!(outcome.code, 2, "{outcome:?}");
}

#[test]
fn status_reports_tracked_branch() {
    let project = Project::new().branch("LIN-4-status").file(
        ".claude/linear-tasks/LIN-4.json",
        r#"{"issue_title": "Status command", "status": "in-review"}"#,
    );
    let outcome = project.run(&["status"], "");
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    assert!(outcome.stdout.contains("Active:  yes (state directory"), "{outcome:?}");
    assert!(outcome.stdout.contains("Branch:  LIN-4-status"), "{outcome:?}");
    assert!(outcome.stdout.contains("Issue:   LIN-4"), "{outcome:?}");
    assert!(outcome.stdout.contains("Status:  in-review"), "{outcome:?}");
}

#[test]
fn status_reports_inactive_project() {
    let project = Project::new();
    let outcome = project.run(&["status"], "");
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    assert!(outcome.stdout.contains("Active:  no"), "{outcome:?}");
    assert!(outcome.stdout.contains("Issue:   (none)"), "{outcome:?}");
}

#[test]
fn tasks_sorted_and_skip_corrupt() {
    let project = Project::new()
        .file(".claude/linear-tasks/LIN-10.json", r#"{"issue_title": "Ten", "status": "done"}"#)
        .file(".claude/linear-tasks/LIN-2.json", r#"{"issue_title": "Two", "status": "open"}"#)
        .file(".claude/linear-tasks/LIN-3.json", "{broken")
        .file(".claude/linear-tasks/notes.txt", "ignored");
    let outcome = project.run(&["tasks"], "");
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    let lines: Vec<&str> = outcome.stdout.lines().collect();
    pretty_assert_eq!(lines, vec!["LIN-2\topen  Two", "LIN-10\tdone  Ten"]);
}

#[test]
fn tasks_empty() {
    let project = Project::new();
    let outcome = project.run(&["tasks"], "");
    pretty_assert_eq!(outcome.stdout.trim(), "No cached tasks in .claude/linear-tasks");
}

#[test]
fn settings_prints_defaults() {
    let project = Project::new();
    let outcome = project.run(&["settings"], "");
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    assert!(outcome.stdout.contains("not found; using defaults"), "{outcome:?}");
    assert!(outcome.stdout.contains("version: 1"), "{outcome:?}");
    assert!(outcome.stdout.contains("base_branch: main"), "{outcome:?}");
    assert!(outcome.stdout.contains("strict_emoji: false"), "{outcome:?}");
}

#[test]
fn settings_reports_malformed_file() {
    let project = Project::new();
    let settings = project.path().join("bad.yaml");
    fs::write(&settings, "version: 2\n").expect("write settings");
    let settings = settings.to_str().expect("utf-8 temp path");
    let outcome = project.run(&["--settings", settings, "settings"], "");
    pretty_assert_eq!(outcome.code, 1, "{outcome:?}");
}

#[test]
fn remind_only_when_active() {
    let inactive = Project::new();
    inactive
        .run(&["claude", "remind", "--topic", "workflow"], "{}")
        .assert_silent();

    let active = Project::new().branch("LIN-6-x");
    let outcome = active.run(&["claude", "remind", "--topic", "workflow"], "{}");
    assert!(outcome.stdout.contains("/linear-start"), "{outcome:?}");
    let outcome = active.run(&["claude", "remind", "--topic", "sync"], "{}");
    assert!(outcome.stdout.contains("mcp__linear__create_comment"), "{outcome:?}");
}

#[test]
fn setup_merges_hooks_idempotently() {
    let project = Project::new().file(
        ".claude/settings.local.json",
        r#"{"permissions": {"allow": ["Bash(ls:*)"]}}"#,
    );
    let claude_dir = project.path().join(".claude");
    let claude_dir = claude_dir.to_str().expect("utf-8 temp path");
    let args = ["claude", "setup", "--claude-dir", claude_dir, "--skip-claude-md"];

    let first = run_in(project.path(), &args, "");
    pretty_assert_eq!(first.code, 0, "{first:?}");
    let second = run_in(project.path(), &args, "");
    pretty_assert_eq!(second.code, 0, "{second:?}");

    let content = fs::read_to_string(project.path().join(".claude/settings.local.json"))
        .expect("read settings");
    let settings: Value = serde_json::from_str(&content).expect("parse settings");
    pretty_assert_eq!(settings["permissions"]["allow"][0], "Bash(ls:*)");

    let pre_tool_use = settings["hooks"]["PreToolUse"].as_array().expect("array");
    pretty_assert_eq!(pre_tool_use.len(), 1);
    pretty_assert_eq!(pre_tool_use[0]["matcher"], "Write|Edit|Bash");
    let command = pre_tool_use[0]["hooks"][0]["command"].as_str().expect("command");
    assert!(command.ends_with(" claude hook"), "{command}");

    let compact = &settings["hooks"]["PreCompact"][0]["hooks"];
    assert!(
        compact[1]["command"]
            .as_str()
            .is_some_and(|c| c.ends_with("claude remind --topic sync"))
    );
}
