//! Task context through the `UserPromptSubmit` hook.

use pretty_assertions::assert_eq as pretty_assert_eq;

use crate::{Project, prompt_hook};

#[test]
fn cached_state_is_surfaced() {
    let project = Project::new().branch("LIN-9-refactor").file(
        ".claude/linear-tasks/LIN-9.json",
        r#"{"issue_title": "Refactor hooks", "status": "in-progress", "issue_uuid": "3f1c"}"#,
    );
    let outcome = project.hook(&prompt_hook(&project, "keep going"));
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    assert!(outcome.stdout.contains("LIN-9 - Refactor hooks"), "{outcome:?}");
    assert!(outcome.stdout.contains("Status: in-progress"), "{outcome:?}");
    assert!(outcome.stdout.contains(r#"mcp__linear__get_issue(id: "3f1c")"#));
}

#[test]
fn missing_state_recommends_sync() {
    let project = Project::new().branch("LIN-9-refactor");
    let outcome = project.hook(&prompt_hook(&project, "keep going"));
    assert!(outcome.stdout.contains("[Linear Branch Detected]"), "{outcome:?}");
    assert!(outcome.stdout.contains("/linear-status"), "{outcome:?}");
    assert!(!outcome.stdout.contains("Status:"), "{outcome:?}");
}

#[test]
fn corrupt_state_is_treated_as_missing() {
    let project = Project::new()
        .branch("LIN-9-refactor")
        .file(".claude/linear-tasks/LIN-9.json", "{not json");
    let outcome = project.hook(&prompt_hook(&project, "keep going"));
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");
    assert!(outcome.stdout.contains("[Linear Branch Detected]"), "{outcome:?}");
}

#[test]
fn repeated_prompts_are_identical() {
    let project = Project::new()
        .branch("LIN-9-refactor")
        .file(".claude/linear-tasks/LIN-9.json", r#"{"status": "done"}"#);
    let first = project.hook(&prompt_hook(&project, "a"));
    let second = project.hook(&prompt_hook(&project, "b"));
    pretty_assert_eq!(first.stdout, second.stdout);
}

#[test]
fn untracked_branch_is_silent() {
    let project = Project::new().branch("chore/cleanup").activate();
    project.hook(&prompt_hook(&project, "hi")).assert_silent();
}
