//! Cached per-issue state written by the workflow commands.
//!
//! One JSON file per tracked issue lives in [`STATE_DIR`], named by the
//! canonical identifier (`LIN-42.json`). This module only reads those files: a
//! missing or corrupt file is reported as absent and never as an error.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::issue::{IssueId, IssuePattern};
use crate::workspace::Workspace;

/// Directory holding one state file per tracked issue, relative to the project root.
pub const STATE_DIR: &str = ".claude/linear-tasks";

/// Title shown when a record has none.
const UNKNOWN_TITLE: &str = "Unknown";

/// Status shown when a record has none.
const UNKNOWN_STATUS: &str = "unknown";

/// Cached snapshot of an issue's tracker-side metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StateRecord {
    /// The issue title.
    #[serde(default)]
    pub issue_title: Option<String>,

    /// Workflow stage, e.g. `in-progress`; free-form in practice.
    #[serde(default)]
    pub status: Option<String>,

    /// Link to the issue in the tracker.
    #[serde(default)]
    pub linear_url: Option<String>,

    /// Opaque remote identifier of the issue.
    #[serde(default)]
    pub issue_uuid: Option<String>,
}

impl StateRecord {
    /// The title, or a placeholder if the record has none.
    pub fn title(&self) -> &str {
        self.issue_title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    /// The status, or a placeholder if the record has none.
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(UNKNOWN_STATUS)
    }
}

/// Path of the state file for `issue`, relative to the project root.
pub fn state_path(issue: &IssueId) -> PathBuf {
    Path::new(STATE_DIR).join(format!("{issue}.json"))
}

/// Load the cached record for `issue`.
///
/// Returns `None` if the file does not exist or does not hold a JSON object
/// of the expected shape.
pub fn load<W: Workspace>(workspace: &W, issue: &IssueId) -> Option<StateRecord> {
    let content = workspace.read_file(&state_path(issue))?;
    serde_json::from_str(&content).ok()
}

/// Load every readable record in the state directory, ordered by identifier.
///
/// Files whose name is not a canonical identifier, and files that fail to
/// parse, are skipped.
pub fn load_all<W: Workspace>(
    workspace: &W,
    pattern: &IssuePattern,
) -> Vec<(IssueId, StateRecord)> {
    workspace
        .list_files(Path::new(STATE_DIR))
        .iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| pattern.parse_file_stem(path))
        .filter_map(|issue| load(workspace, &issue).map(|record| (issue, record)))
        .sorted_by(|(a, _), (b, _)| {
            (a.prefix(), a.number()).cmp(&(b.prefix(), b.number()))
        })
        .collect()
}
