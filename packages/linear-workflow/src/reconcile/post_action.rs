//! Classifies finished shell commands and recommends the next tracker transition.
//!
//! Patterns are tried in order and the first match wins:
//!
//! 1. PR created: the command runs `gh pr create` and the output holds a
//!    GitHub pull request URL.
//! 2. PR merged: the command runs `gh pr merge` and the output reports a merge.
//! 3. Pushed: the command runs `git push`.

use std::sync::LazyLock;

use indoc::formatdoc;
use regex::Regex;
use serde::Serialize;

use crate::issue::IssueId;

use super::STATUS_COMMAND;

static PR_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/\S+/pull/(?P<number>\d+)").expect("compile PR URL regex")
});

/// Output phrases (lowercased) that indicate a successful merge.
const MERGE_PHRASES: [&str; 3] = ["merged", "successfully merged", "pull request #"];

/// A recognised action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A pull request was opened.
    PrCreated { url: String, number: String },

    /// A pull request was merged.
    PrMerged,

    /// Commits were pushed.
    Pushed,
}

impl Action {
    /// The `action` field of the advisory.
    pub fn name(&self) -> &'static str {
        match self {
            Action::PrCreated { .. } => "pr_created",
            Action::PrMerged => "pr_merged",
            Action::Pushed => "pushed",
        }
    }
}

/// Classify a command and its output.
pub fn classify(command: &str, output: &str) -> Option<Action> {
    detect_pr_created(command, output)
        .or_else(|| detect_pr_merged(command, output))
        .or_else(|| detect_push(command))
}

fn detect_pr_created(command: &str, output: &str) -> Option<Action> {
    if !command.contains("gh pr create") {
        return None;
    }
    let caps = PR_URL.captures(output)?;
    Some(Action::PrCreated {
        url: caps.get(0)?.as_str().to_string(),
        number: caps.name("number")?.as_str().to_string(),
    })
}

fn detect_pr_merged(command: &str, output: &str) -> Option<Action> {
    if !command.contains("gh pr merge") {
        return None;
    }
    let output = output.to_lowercase();
    MERGE_PHRASES
        .iter()
        .any(|phrase| output.contains(phrase))
        .then_some(Action::PrMerged)
}

fn detect_push(command: &str) -> Option<Action> {
    command.contains("git push").then_some(Action::Pushed)
}

/// Structured advisory emitted after a recognised action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// `pr_created`, `pr_merged`, or `pushed`.
    pub action: &'static str,

    /// The issue behind the current branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<IssueId>,

    /// The created pull request's URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,

    /// The created pull request's number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<String>,

    /// What to do next on the tracker side.
    pub recommendation: String,
}

/// Build the advisory for `action` on `branch`.
pub fn advise(action: &Action, branch: Option<&str>, issue: Option<&IssueId>) -> Advisory {
    let branch = branch.unwrap_or("the current branch");
    let recommendation = match (action, issue) {
        (Action::PrCreated { url, number }, None) => {
            format!("PR #{number} created!\nURL: {url}\n")
        }
        (Action::PrCreated { url, number }, Some(issue)) => formatdoc! {"
            PR #{number} created!
            URL: {url}

            📋 Update Linear issue {issue}:
              - Status → In Review
              - Add PR link as comment
            Use {STATUS_COMMAND} to monitor CI."
        },
        (Action::PrMerged, None) => String::from("PR merged successfully!\n"),
        (Action::PrMerged, Some(issue)) => formatdoc! {"
            PR merged successfully!

            ✅ Complete Linear workflow for {issue}:
              - Status → Done
              - Add completion comment
              - Delete local branch: git branch -d {branch}"
        },
        (Action::Pushed, None) => String::from("Code pushed.\nIf a PR exists, CI will run automatically."),
        (Action::Pushed, Some(_)) => {
            format!("Code pushed to {branch}.\nIf a PR exists, CI will run automatically.")
        }
    };

    let (pr_url, pr_number) = match action {
        Action::PrCreated { url, number } => (Some(url.clone()), Some(number.clone())),
        _ => (None, None),
    };

    Advisory {
        action: action.name(),
        issue_id: issue.cloned(),
        pr_url,
        pr_number,
        recommendation,
    }
}
