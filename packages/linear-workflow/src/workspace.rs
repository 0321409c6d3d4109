//! Read-only view of the project a hook runs in.
//!
//! Hook logic never touches the filesystem or git directly; it asks a
//! [`Workspace`]. The real implementation is [`LocalWorkspace`]; tests use an
//! in-memory fake.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use walkdir::WalkDir;

use crate::git::Git;

/// Queries a hook needs to answer about the current project.
///
/// All paths are relative to the project root. Every method is infallible:
/// anything that cannot be determined is reported as absent.
pub trait Workspace {
    /// The current branch name, if any.
    fn current_branch(&self) -> Option<String>;

    /// Commits on `HEAD` since it diverged from `base`.
    fn commit_count(&self, base: &str) -> Option<u64>;

    /// The most recent commit subjects, most recent first.
    fn recent_subjects(&self, limit: usize) -> Vec<String>;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// The contents of `path`, if it exists and is valid UTF-8.
    fn read_file(&self, path: &Path) -> Option<String>;

    /// Regular files directly inside `dir`, sorted by name.
    fn list_files(&self, dir: &Path) -> Vec<PathBuf>;
}

/// A workspace backed by the local filesystem and the `git` binary.
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
    git: Git,
}

impl LocalWorkspace {
    /// Inspect the project rooted at `root`, bounding git queries by `timeout`.
    pub fn new(root: impl Into<PathBuf>, timeout: Duration) -> Self {
        let root = root.into();
        let git = Git::new(root.clone(), timeout);
        Self { root, git }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Workspace for LocalWorkspace {
    fn current_branch(&self) -> Option<String> {
        self.git.current_branch()
    }

    fn commit_count(&self, base: &str) -> Option<u64> {
        self.git.commit_count(base)
    }

    fn recent_subjects(&self, limit: usize) -> Vec<String> {
        self.git.recent_subjects(limit).unwrap_or_default()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.root.join(path).is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.root.join(path).is_file()
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        fs::read_to_string(self.root.join(path)).ok()
    }

    fn list_files(&self, dir: &Path) -> Vec<PathBuf> {
        let root = self.root.join(dir);
        if !root.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    tracing::warn!(?error, ?root, "walking directory");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| dir.join(entry.file_name()))
            .collect()
    }
}
