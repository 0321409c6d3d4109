//! Turns hook events into advisories.
//!
//! Each hook event has its own small state machine in a submodule; they share
//! no transitions. [`respond`] only routes an event to the right one after
//! checking activation. The commit validator is the exception: it runs for
//! every project and is the only path that can block.

use serde::Serialize;
use serde_json::Value;

use crate::activation;
use crate::claude::hook::{Hook, PostToolUsePayload, PreToolUsePayload, Response};
use crate::commit::Verdict;
use crate::issue::{IssueId, IssuePattern};
use crate::settings::Settings;
use crate::state::{self, StateRecord};
use crate::workspace::Workspace;

pub mod compaction;
pub mod post_action;
pub mod pre_write;
pub mod prompt;
pub mod reminder;

/// Slash command that refreshes the local state cache from the tracker.
pub const STATUS_COMMAND: &str = "/linear-status";

/// Slash command that starts work on an issue in a fresh branch.
pub const START_COMMAND: &str = "/linear-start";

/// Slash command that opens a pull request for the current issue.
pub const PR_COMMAND: &str = "/linear-pr";

/// Slash command that merges the pull request and closes out the issue.
pub const MERGE_COMMAND: &str = "/linear-merge";

/// What the hooks know about the current branch, captured once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSnapshot {
    /// The current branch name.
    pub branch: String,

    /// The identifier carried by the branch name.
    pub issue: Option<IssueId>,

    /// The cached record for `issue`, if one exists and parses.
    pub record: Option<StateRecord>,
}

impl BranchSnapshot {
    /// Capture the current branch; `None` if it cannot be determined.
    pub fn capture<W: Workspace>(workspace: &W, pattern: &IssuePattern) -> Option<Self> {
        let branch = workspace.current_branch()?;
        let issue = pattern.extract(&branch);
        let record = issue.as_ref().and_then(|issue| state::load(workspace, issue));
        Some(Self {
            branch,
            issue,
            record,
        })
    }
}

/// Respond to a hook event.
#[tracing::instrument(skip(workspace, settings))]
pub fn respond<W: Workspace>(hook: &Hook, workspace: &W, settings: &Settings) -> Response {
    match hook {
        Hook::PreToolUse(PreToolUsePayload::Bash(payload)) => {
            check_commit(&payload.tool_input.command, settings)
        }
        Hook::PreToolUse(PreToolUsePayload::Write(_) | PreToolUsePayload::Edit(_)) => {
            with_snapshot(workspace, settings, |snapshot| {
                pre_write::evaluate(snapshot, settings).advice()
            })
            .map_or(Response::Passthrough, Response::Advise)
        }
        Hook::UserPromptSubmit(_) => {
            with_snapshot(workspace, settings, |snapshot| prompt::evaluate(snapshot).advice())
                .map_or(Response::Passthrough, Response::Advise)
        }
        Hook::PostToolUse(PostToolUsePayload::Bash(payload)) => {
            with_snapshot(workspace, settings, |snapshot| {
                let action = post_action::classify(&payload.tool_input.command, &payload.output())?;
                Some(post_action::advise(
                    &action,
                    Some(&snapshot.branch),
                    snapshot.issue.as_ref(),
                ))
            })
            .map_or(Response::Passthrough, report)
        }
        Hook::PreCompact(_) => with_snapshot(workspace, settings, |snapshot| {
            let issue = snapshot.issue.clone()?;
            let progress =
                compaction::Progress::gather(workspace, settings, snapshot.branch.clone(), issue);
            Some(compaction::advise(&progress))
        })
        .map_or(Response::Passthrough, report),
        Hook::PreToolUse(PreToolUsePayload::Other)
        | Hook::PostToolUse(PostToolUsePayload::Other)
        | Hook::Other => Response::Passthrough,
    }
}

/// Validate the commit made by `command`, if it is one with an inline message.
pub fn check_commit(command: &str, settings: &Settings) -> Response {
    match settings.validator().check_command(command) {
        Some(Verdict::Invalid(rejection)) => Response::Block(format!("❌ {rejection}")),
        Some(verdict) => {
            tracing::debug!(?verdict, "commit subject accepted");
            Response::Passthrough
        }
        None => Response::Passthrough,
    }
}

/// Run `f` on the branch snapshot if the workflow is active and a branch is known.
fn with_snapshot<W: Workspace, T>(
    workspace: &W,
    settings: &Settings,
    f: impl FnOnce(&BranchSnapshot) -> Option<T>,
) -> Option<T> {
    let pattern = settings.issue_pattern();
    if !activation::is_active(workspace, &pattern) {
        tracing::debug!("workflow inactive, passing through");
        return None;
    }
    let snapshot = BranchSnapshot::capture(workspace, &pattern)?;
    tracing::debug!(?snapshot, "captured branch snapshot");
    f(&snapshot)
}

fn report(advisory: impl Serialize) -> Response {
    match serde_json::to_value(advisory) {
        Ok(value) => Response::Report(value),
        Err(error) => {
            tracing::warn!(?error, "serialize advisory");
            Response::Report(Value::Null)
        }
    }
}
