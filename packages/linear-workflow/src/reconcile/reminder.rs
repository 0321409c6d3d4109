//! Standing reminders printed alongside the structured hooks.

use clap::ValueEnum;
use derive_more::Display;
use indoc::formatdoc;

use crate::activation;
use crate::settings::Settings;
use crate::workspace::Workspace;

use super::{MERGE_COMMAND, PR_COMMAND, START_COMMAND};

/// Which reminder to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
pub enum Topic {
    /// Workflow commands, printed on each user prompt.
    #[display("workflow")]
    Workflow,

    /// Progress sync, printed before compaction.
    #[display("sync")]
    Sync,
}

impl Topic {
    /// The reminder text.
    pub fn text(self) -> String {
        match self {
            Topic::Workflow => formatdoc! {"
                Check if Linear workflow is relevant:
                1. If user mentions task/issue/feature work, remind about {START_COMMAND}
                2. If on a Linear branch (LIN-xxx), acknowledge the context
                3. If discussing PR/merge, remind about {PR_COMMAND} or {MERGE_COMMAND}
                Only add reminders if truly relevant."
            },
            Topic::Sync => String::from(
                "If the sync advisory named an issue_id, consider posting a progress summary \
                 to Linear using mcp__linear__create_comment before context compaction.",
            ),
        }
    }
}

/// The reminder for `topic`, or `None` when the workflow is inactive.
pub fn remind<W: Workspace>(workspace: &W, settings: &Settings, topic: Topic) -> Option<String> {
    activation::is_active(workspace, &settings.issue_pattern()).then(|| topic.text())
}
