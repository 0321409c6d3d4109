//! Surfaces the current task on every user prompt.

use std::fmt::Write as _;
use std::path::PathBuf;

use indoc::formatdoc;

use crate::issue::IssueId;
use crate::state::{self, StateRecord};

use super::{BranchSnapshot, STATUS_COMMAND};

/// What is known about the task behind the current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskContext {
    /// The branch is tracked and has a cached record.
    Cached {
        branch: String,
        issue: IssueId,
        record: StateRecord,
    },

    /// The branch is tracked but nothing is cached for it.
    Uncached {
        branch: String,
        issue: IssueId,
        state_path: PathBuf,
    },

    /// The branch carries no identifier.
    Untracked,
}

/// Classify the snapshot.
pub fn evaluate(snapshot: &BranchSnapshot) -> TaskContext {
    let branch = snapshot.branch.clone();
    match (&snapshot.issue, &snapshot.record) {
        (Some(issue), Some(record)) => TaskContext::Cached {
            branch,
            issue: issue.clone(),
            record: record.clone(),
        },
        (Some(issue), None) => TaskContext::Uncached {
            branch,
            state_path: state::state_path(issue),
            issue: issue.clone(),
        },
        (None, _) => TaskContext::Untracked,
    }
}

impl TaskContext {
    /// The context block for the agent, if any.
    pub fn advice(&self) -> Option<String> {
        match self {
            TaskContext::Cached {
                branch,
                issue,
                record,
            } => {
                let mut text = formatdoc! {"
                    [Linear Task Context]
                    Issue:  {issue} - {title}
                    Branch: {branch}
                    Status: {status}
                    ",
                    title = record.title(),
                    status = record.status(),
                };
                if let Some(url) = &record.linear_url {
                    let _ = writeln!(text, "URL:    {url}");
                }
                let id = record.issue_uuid.as_deref().unwrap_or(issue.as_str());
                let _ = write!(
                    text,
                    "\nTo verify Linear status: mcp__linear__get_issue(id: \"{id}\")"
                );
                Some(text)
            }
            TaskContext::Uncached {
                branch,
                issue,
                state_path,
            } => Some(formatdoc! {"
                [Linear Branch Detected]
                Branch: {branch}
                Issue:  {issue}

                No local state file found at: {state_path}
                Run {STATUS_COMMAND} to sync state from Linear.",
                state_path = state_path.display(),
            }),
            TaskContext::Untracked => None,
        }
    }
}
