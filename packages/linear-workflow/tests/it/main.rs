//! Integration tests for the `linear-workflow` binary.
//!
//! Each test runs the built binary inside a throwaway git repository, feeding
//! hook payloads on stdin and checking exit code and output:
//! - reconciler hooks stay silent unless the project is active
//! - commit subjects are validated for every project, blocking with exit 2
//! - malformed input never fails the hook

mod cli;
mod commit;
mod compaction;
mod hook;
mod prompt;

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::{Value, json};
use tempfile::TempDir;
use xshell::{Shell, cmd};

/// Outcome of running the binary.
#[derive(Debug)]
pub struct Outcome {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    /// Exit 0 with nothing on stdout or stderr.
    pub fn assert_silent(&self) {
        assert!(
            self.code == 0 && self.stdout.trim().is_empty() && self.stderr.trim().is_empty(),
            "expected silent exit 0, got: {self:?}"
        );
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("expected JSON on stdout ({e}), got: {self:?}"))
    }
}

/// A throwaway git repository to run hooks in.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// An empty git repository on `main` with one commit.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let sh = Shell::new().expect("create shell");
        sh.change_dir(dir.path());
        cmd!(sh, "git init --quiet").run().expect("git init");
        cmd!(sh, "git config user.email test@test.com").run().expect("git config email");
        cmd!(sh, "git config user.name Test").run().expect("git config name");
        cmd!(sh, "git config commit.gpgsign false").run().expect("git config gpgsign");
        cmd!(sh, "git checkout --quiet -b main").run().expect("git checkout main");
        cmd!(sh, "git commit --quiet --allow-empty -m 'chore: init'")
            .run()
            .expect("git commit");
        Self { dir }
    }

    /// Switch to a new branch off the current one.
    pub fn branch(self, name: &str) -> Self {
        let sh = self.shell();
        cmd!(sh, "git checkout --quiet -b {name}").run().expect("git checkout");
        self
    }

    /// Add empty commits with the given subjects.
    pub fn commits(self, subjects: &[&str]) -> Self {
        let sh = self.shell();
        for subject in subjects {
            cmd!(sh, "git commit --quiet --allow-empty -m {subject}")
                .run()
                .expect("git commit");
        }
        self
    }

    /// Write a file relative to the project root, creating parent directories.
    pub fn file(self, path: &str, content: &str) -> Self {
        let path = self.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write file");
        self
    }

    /// Create the state directory, activating the workflow.
    pub fn activate(self) -> Self {
        fs::create_dir_all(self.path().join(".claude/linear-tasks")).expect("create state dir");
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn shell(&self) -> Shell {
        let sh = Shell::new().expect("create shell");
        sh.change_dir(self.path());
        sh
    }

    /// Run the binary in this project with the given arguments and stdin.
    pub fn run(&self, args: &[&str], stdin: &str) -> Outcome {
        run_in(self.path(), args, stdin)
    }

    /// Run `claude hook` with the given payload.
    pub fn hook(&self, payload: &Value) -> Outcome {
        self.run(&["claude", "hook"], &payload.to_string())
    }
}

/// Path of a settings file that never exists, so user settings never leak into tests.
fn missing_settings(dir: &Path) -> PathBuf {
    dir.join("no-settings.yaml")
}

/// Run the binary in `dir` with the given arguments and stdin.
pub fn run_in(dir: &Path, args: &[&str], stdin: &str) -> Outcome {
    let mut child = Command::new(env!("CARGO_BIN_EXE_linear-workflow"))
        .args(args)
        .current_dir(dir)
        .env("LINEAR_WORKFLOW_SETTINGS", missing_settings(dir))
        .env_remove("LINEAR_WORKFLOW_CWD")
        .env_remove("LINEAR_WORKFLOW_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn linear-workflow");

    child
        .stdin
        .take()
        .expect("get stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");

    let output = child.wait_with_output().expect("wait for linear-workflow");
    Outcome {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// A `PreToolUse` payload for the Bash tool.
pub fn bash_hook(project: &Project, command: &str) -> Value {
    json!({
        "hook_event_name": "PreToolUse",
        "session_id": "test",
        "transcript_path": "/tmp/test",
        "permission_mode": "default",
        "cwd": project.path(),
        "tool_name": "Bash",
        "tool_use_id": "123",
        "tool_input": {
            "command": command,
            "description": "Test command"
        }
    })
}

/// A `PreToolUse` payload for the Write tool.
pub fn write_hook(project: &Project, file_path: &str) -> Value {
    json!({
        "hook_event_name": "PreToolUse",
        "session_id": "test",
        "cwd": project.path(),
        "tool_name": "Write",
        "tool_use_id": "123",
        "tool_input": {
            "file_path": file_path,
            "content": "fn main() {}\n"
        }
    })
}

/// A `PostToolUse` payload for the Bash tool.
pub fn post_bash_hook(project: &Project, command: &str, stdout: &str) -> Value {
    json!({
        "hook_event_name": "PostToolUse",
        "session_id": "test",
        "cwd": project.path(),
        "tool_name": "Bash",
        "tool_use_id": "123",
        "tool_input": { "command": command },
        "tool_response": { "stdout": stdout, "stderr": "", "interrupted": false }
    })
}

/// A `UserPromptSubmit` payload.
pub fn prompt_hook(project: &Project, prompt: &str) -> Value {
    json!({
        "hook_event_name": "UserPromptSubmit",
        "session_id": "test",
        "cwd": project.path(),
        "prompt": prompt
    })
}

/// A `PreCompact` payload.
pub fn compact_hook(project: &Project) -> Value {
    json!({
        "hook_event_name": "PreCompact",
        "session_id": "test",
        "cwd": project.path(),
        "trigger": "auto",
        "custom_instructions": ""
    })
}
