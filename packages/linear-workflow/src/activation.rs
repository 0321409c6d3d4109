//! Decides whether tracker-aware hook logic applies to a project at all.

use std::path::Path;

use derive_more::Display;

use crate::issue::{IssueId, IssuePattern};
use crate::state::STATE_DIR;
use crate::workspace::Workspace;

/// Marker file whose existence (not content) activates the workflow.
pub const CONFIG_FILE: &str = ".claude/linear-config.json";

/// The first signal that activated the workflow, or [`Activation::Inactive`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Activation {
    /// The per-issue state directory exists.
    #[display("state directory {} exists", STATE_DIR)]
    StateDir,

    /// The marker config file exists.
    #[display("config file {} exists", CONFIG_FILE)]
    ConfigFile,

    /// The current branch carries an issue identifier.
    #[display("branch references {_0}")]
    TrackedBranch(IssueId),

    /// No signal found.
    #[display("no activation signal found")]
    Inactive,
}

impl Activation {
    /// Whether any signal was found.
    pub fn is_active(&self) -> bool {
        !matches!(self, Activation::Inactive)
    }
}

/// Check the activation signals in order, stopping at the first success.
///
/// Filesystem checks run before the branch query so that most calls in an
/// active project never spawn git. A branch query that fails or times out
/// counts as no signal.
#[tracing::instrument(skip(workspace))]
pub fn detect<W: Workspace>(workspace: &W, pattern: &IssuePattern) -> Activation {
    if workspace.is_dir(Path::new(STATE_DIR)) {
        return Activation::StateDir;
    }
    if workspace.is_file(Path::new(CONFIG_FILE)) {
        return Activation::ConfigFile;
    }
    workspace
        .current_branch()
        .and_then(|branch| pattern.extract(&branch))
        .map_or(Activation::Inactive, Activation::TrackedBranch)
}

/// Whether tracker-aware hook logic should run for this workspace.
pub fn is_active<W: Workspace>(workspace: &W, pattern: &IssuePattern) -> bool {
    detect(workspace, pattern).is_active()
}
