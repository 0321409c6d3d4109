//! Git state queries via shell commands.
//!
//! Every query is read-only and bounded by a timeout. Any failure (git not
//! installed, not a repository, non-zero exit, timeout, non-UTF-8 output) is
//! reported as `None`: callers treat it as "no information".

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Default bound on a single git query.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs git queries against one working directory.
#[derive(Debug, Clone)]
pub struct Git {
    cwd: PathBuf,
    timeout: Duration,
}

impl Git {
    /// Query the repository containing `cwd`, giving up after `timeout`.
    pub fn new(cwd: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            cwd: cwd.into(),
            timeout,
        }
    }

    /// Get the current git branch name.
    ///
    /// Returns `None` if:
    /// - Not in a git repository
    /// - Git command fails or times out
    /// - In detached HEAD state (no branch name)
    #[tracing::instrument]
    pub fn current_branch(&self) -> Option<String> {
        self.run(&["branch", "--show-current"])
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Count the commits reachable from `HEAD` but not from `base`.
    #[tracing::instrument]
    pub fn commit_count(&self, base: &str) -> Option<u64> {
        let range = format!("{base}..HEAD");
        self.run(&["rev-list", "--count", &range])
            .and_then(|s| s.trim().parse().ok())
    }

    /// Subjects of the most recent commits, most recent first.
    #[tracing::instrument]
    pub fn recent_subjects(&self, limit: usize) -> Option<Vec<String>> {
        let limit = format!("-{limit}");
        self.run(&["log", &limit, "--pretty=format:%s"]).map(|s| {
            s.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()
        })
    }

    /// Run git with the given arguments and return its stdout on success.
    fn run(&self, args: &[&str]) -> Option<String> {
        let mut child = Command::new("git")
            .arg("-C")
            .arg(&self.cwd)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .inspect_err(|error| tracing::debug!(?error, ?args, "spawn git"))
            .ok()?;

        // Drain stdout while polling; output larger than the pipe buffer
        // would otherwise stall git until the timeout.
        let mut stdout = child.stdout.take()?;
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        });

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if started.elapsed() >= self.timeout => {
                    tracing::debug!(?args, timeout = ?self.timeout, "git query timed out");
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(error) => {
                    tracing::debug!(?error, ?args, "wait for git");
                    return None;
                }
            }
        };

        let stdout = match reader.join() {
            Ok(Ok(stdout)) => stdout,
            Ok(Err(error)) => {
                tracing::debug!(?error, ?args, "read git output");
                return None;
            }
            Err(_) => return None,
        };
        if !status.success() {
            tracing::debug!(?args, ?status, "git query failed");
            return None;
        }
        String::from_utf8(stdout).ok()
    }
}
