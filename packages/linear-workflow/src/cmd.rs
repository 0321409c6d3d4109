//! CLI subcommands.

use std::path::{Path, PathBuf};

use linear_workflow::settings::{Settings, load_or_default};
use linear_workflow::workspace::LocalWorkspace;

use crate::Global;

pub mod check_commit;
pub mod claude;
pub mod settings;
pub mod status;
pub mod tasks;

impl Global {
    /// Settings for a hook path: unreadable settings degrade to the defaults.
    pub fn settings_or_default(&self) -> Settings {
        load_or_default(self.settings.as_deref())
    }

    /// The project root: `--cwd`, then `fallback`, then the current directory.
    pub fn project_root(&self, fallback: Option<&Path>) -> PathBuf {
        self.cwd
            .as_deref()
            .or(fallback)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// A workspace rooted at [`Global::project_root`].
    pub fn workspace(&self, settings: &Settings, fallback: Option<&Path>) -> LocalWorkspace {
        LocalWorkspace::new(self.project_root(fallback), settings.git_timeout())
    }
}
