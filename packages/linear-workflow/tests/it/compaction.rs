//! Sync advisory through the `PreCompact` hook.

use pretty_assertions::assert_eq as pretty_assert_eq;
use serde_json::json;

use crate::{Project, compact_hook};

#[test]
fn tracked_branch_reports_progress() {
    let project = Project::new()
        .branch("LIN-5-sync")
        .commits(&["feat: one", "fix: two", "test: three"]);
    let outcome = project.hook(&compact_hook(&project));
    pretty_assert_eq!(outcome.code, 0, "{outcome:?}");

    let value = outcome.json();
    pretty_assert_eq!(value["action"], json!("sync_to_linear"));
    pretty_assert_eq!(value["issue_id"], json!("LIN-5"));
    pretty_assert_eq!(value["branch"], json!("LIN-5-sync"));
    pretty_assert_eq!(value["commit_count"], json!(3));
    pretty_assert_eq!(
        value["recent_commits"],
        json!(["test: three", "fix: two", "feat: one", "chore: init"])
    );
    assert!(
        value["instruction"]
            .as_str()
            .is_some_and(|i| i.contains("mcp__linear__create_comment"))
    );
}

#[test]
fn recent_commits_are_bounded() {
    let project = Project::new()
        .branch("LIN-5-sync")
        .commits(&["a", "b", "c", "d", "e", "f"]);
    let value = project.hook(&compact_hook(&project)).json();
    pretty_assert_eq!(value["commit_count"], json!(6));
    pretty_assert_eq!(value["recent_commits"], json!(["f", "e", "d", "c", "b"]));
}

#[test]
fn missing_base_counts_zero() {
    let project = Project::new().branch("LIN-5-sync").commits(&["feat: one"]);
    let settings = project.path().join("settings.yaml");
    std::fs::write(&settings, "version: 1\nbase_branch: trunk\n").expect("write settings");
    let outcome = crate::run_in(
        project.path(),
        &[
            "--settings",
            settings.to_str().expect("utf-8 temp path"),
            "claude",
            "hook",
        ],
        &compact_hook(&project).to_string(),
    );
    pretty_assert_eq!(outcome.json()["commit_count"], json!(0));
}

#[test]
fn untracked_branch_is_silent() {
    let project = Project::new().branch("chore/cleanup").activate();
    project.hook(&compact_hook(&project)).assert_silent();
}
