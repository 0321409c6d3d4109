//! Asks the agent to sync progress to the tracker before context is compacted.

use itertools::Itertools;
use serde::Serialize;

use crate::issue::IssueId;
use crate::settings::Settings;
use crate::workspace::Workspace;

/// Progress on a tracked branch, gathered from git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub branch: String,
    pub issue: IssueId,

    /// Commits since the base branch; 0 when unknown.
    pub commit_count: u64,

    /// Most recent commit subjects, most recent first.
    pub recent_commits: Vec<String>,
}

impl Progress {
    /// Gather progress for `issue` on `branch`.
    pub fn gather<W: Workspace>(
        workspace: &W,
        settings: &Settings,
        branch: String,
        issue: IssueId,
    ) -> Self {
        Self {
            commit_count: workspace
                .commit_count(&settings.base_branch)
                .unwrap_or_default(),
            recent_commits: workspace.recent_subjects(settings.recent_commits),
            branch,
            issue,
        }
    }
}

/// Structured payload handed to the downstream agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncAdvisory {
    /// Always `sync_to_linear`.
    pub action: &'static str,
    pub issue_id: IssueId,
    pub branch: String,
    pub commit_count: u64,
    pub recent_commits: Vec<String>,

    /// Human-readable instruction summarising the above.
    pub instruction: String,
}

/// Build the advisory for `progress`.
pub fn advise(progress: &Progress) -> SyncAdvisory {
    let Progress {
        branch,
        issue,
        commit_count,
        recent_commits,
    } = progress;

    let recent = recent_commits
        .iter()
        .filter(|subject| !subject.is_empty())
        .map(|subject| format!("  - {subject}"))
        .join("\n");
    let instruction = format!(
        "Before context compaction, consider syncing progress to Linear issue {issue}.\n\
         Branch: {branch}\n\
         Commits: {commit_count}\n\
         Recent work:\n\
         {recent}\n\n\
         Use mcp__linear__create_comment to post a progress summary if significant work was done."
    );

    SyncAdvisory {
        action: "sync_to_linear",
        issue_id: issue.clone(),
        branch: branch.clone(),
        commit_count: *commit_count,
        recent_commits: recent_commits.clone(),
        instruction,
    }
}
