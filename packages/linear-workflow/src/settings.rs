//! User-level settings.
//!
//! Settings are optional: with no settings file every hook uses the defaults
//! below. The file lives at `ProjectDirs::config_dir()/settings.yaml`:
//!
//! ```yaml
//! version: 1
//! prefixes: [LIN, ENG]
//! protected_branches: [main, master, develop, release]
//! base_branch: main
//! recent_commits: 5
//! git_timeout_secs: 5
//! strict_emoji: false
//! ```

use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::{
    SectionExt,
    eyre::{Context, Result},
};
use directories::ProjectDirs;
use monostate::MustBe;
use serde::{Deserialize, Serialize};
use tap::Tap;

use crate::commit::CommitValidator;
use crate::issue::{self, DEFAULT_PREFIX, IssuePattern};

/// Get the project directories for the application.
#[tracing::instrument]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "linear-workflow", "linear-workflow")
}

/// Path of the user-level settings file, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("settings.yaml"))
}

/// A settings file on disk.
#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    /// The version of the settings file format.
    #[allow(dead_code)]
    version: MustBe!(1),

    #[serde(flatten)]
    settings: Settings,
}

/// Effective settings for every hook.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Issue identifier prefixes, e.g. `LIN`.
    pub prefixes: Vec<String>,

    /// Branches on which edits trigger a warning (compared case-insensitively).
    pub protected_branches: Vec<String>,

    /// Branch that commit counts are measured against.
    pub base_branch: String,

    /// How many recent commit subjects to include in a sync advisory.
    pub recent_commits: usize,

    /// Upper bound, in seconds, on each git query.
    pub git_timeout_secs: u64,

    /// Reject commit subjects whose emoji conventionally marks another type.
    pub strict_emoji: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefixes: vec![DEFAULT_PREFIX.to_string()],
            protected_branches: ["main", "master", "develop", "release"]
                .map(String::from)
                .to_vec(),
            base_branch: String::from("main"),
            recent_commits: 5,
            git_timeout_secs: 5,
            strict_emoji: false,
        }
    }
}

impl Settings {
    /// Compile the configured prefixes into an identifier matcher.
    pub fn issue_pattern(&self) -> IssuePattern {
        IssuePattern::new(&self.prefixes)
    }

    /// Whether `branch` is one of the protected branches.
    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected_branches
            .iter()
            .any(|protected| protected.eq_ignore_ascii_case(branch))
    }

    /// The bound on each git query.
    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    /// A commit validator honoring the emoji strictness setting.
    pub fn validator(&self) -> CommitValidator {
        CommitValidator::new(self.strict_emoji)
    }

    /// Drop unusable values, warning about each one.
    fn sanitize(mut self) -> Self {
        self.prefixes.retain(|prefix| {
            let valid = issue::is_valid_prefix(prefix.trim());
            if !valid {
                tracing::warn!(?prefix, "ignoring issue prefix: must be ASCII letters");
            }
            valid
        });
        if self.prefixes.is_empty() {
            self.prefixes.push(DEFAULT_PREFIX.to_string());
        }
        if self.git_timeout_secs == 0 {
            tracing::warn!("git_timeout_secs must be positive; using default");
            self.git_timeout_secs = Settings::default().git_timeout_secs;
        }
        self
    }
}

/// Load settings from `path`.
///
/// Returns `None` if the file does not exist.
#[tracing::instrument]
pub fn load_from(path: &Path) -> Result<Option<Settings>> {
    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context(format!("read settings file: {path:?}")),
    };

    serde_yaml::from_str::<SettingsFile>(&content)
        .with_context(|| format!("parse settings file: {path:?}"))
        .with_context(|| content.header("File content:"))
        .tap(|file| tracing::debug!(?file, "parsed settings file"))
        .map(|file| Some(file.settings.sanitize()))
}

/// Load settings from `path`, or from the user-level file when `path` is `None`.
///
/// A missing file yields the defaults.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) => path,
            None => return Ok(Settings::default()),
        },
    };
    load_from(&path).map(Option::unwrap_or_default)
}

/// Like [`load`], but never fails: unreadable settings fall back to the defaults.
pub fn load_or_default(path: Option<&Path>) -> Settings {
    load(path).unwrap_or_else(|error| {
        tracing::warn!(?error, "using default settings");
        Settings::default()
    })
}
