//! Guard run before a file is written or edited.
//!
//! Never blocks: it only tells the agent which kind of branch it is on.

use std::path::PathBuf;

use indoc::formatdoc;

use crate::issue::IssueId;
use crate::settings::Settings;
use crate::state;

use super::{BranchSnapshot, START_COMMAND, STATUS_COMMAND};

/// Classification of the branch a file is about to be modified on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// A protected branch such as `main`.
    ProtectedBranch { branch: String },

    /// A tracked branch with a cached state record.
    TrackedSynced { branch: String, issue: IssueId },

    /// A tracked branch with no usable cached state.
    TrackedUnsynced {
        branch: String,
        issue: IssueId,
        state_path: PathBuf,
    },

    /// Any other branch.
    Untracked,
}

/// Classify the snapshot.
///
/// Protected branches win over identifiers, so `main` is always a warning.
pub fn evaluate(snapshot: &BranchSnapshot, settings: &Settings) -> Guard {
    let branch = snapshot.branch.clone();
    if settings.is_protected(&branch) {
        return Guard::ProtectedBranch { branch };
    }

    match (&snapshot.issue, &snapshot.record) {
        (Some(issue), Some(_)) => Guard::TrackedSynced {
            branch,
            issue: issue.clone(),
        },
        (Some(issue), None) => Guard::TrackedUnsynced {
            branch,
            state_path: state::state_path(issue),
            issue: issue.clone(),
        },
        (None, _) => Guard::Untracked,
    }
}

impl Guard {
    /// The advisory text for the agent, if any.
    pub fn advice(&self) -> Option<String> {
        match self {
            Guard::ProtectedBranch { branch } => Some(formatdoc! {"
                [Branch Warning]
                You are on the '{branch}' branch.
                Consider using {START_COMMAND} to create a feature branch before editing.
                Direct commits to {branch} may bypass code review."
            }),
            Guard::TrackedSynced { branch, issue } => {
                Some(format!("[Linear Branch] Working on: {branch} ({issue})"))
            }
            Guard::TrackedUnsynced {
                branch,
                issue,
                state_path,
            } => Some(formatdoc! {"
                [Linear Branch - No Local State]
                Branch: {branch}
                Issue: {issue}
                No local state file found at: {state_path}
                Run {STATUS_COMMAND} to sync state from Linear.",
                state_path = state_path.display(),
            }),
            Guard::Untracked => None,
        }
    }
}
