//! Types and parsers for interacting with Claude Code hooks.

use std::path::PathBuf;

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Claude Code hooks handled by linear-workflow.
#[derive(Debug, Deserialize)]
#[serde(tag = "hook_event_name")]
pub enum Hook {
    /// Sent before a tool is used.
    PreToolUse(PreToolUsePayload),

    /// Sent after a tool is used.
    PostToolUse(PostToolUsePayload),

    /// Sent when the user submits a prompt.
    UserPromptSubmit(UserPromptSubmitPayload),

    /// Sent before the conversation is compacted.
    PreCompact(PreCompactPayload),

    /// Any other hook event; always passed through.
    #[serde(other)]
    Other,
}

impl Hook {
    /// The working directory reported by the hook, if any.
    pub fn cwd(&self) -> Option<&PathBuf> {
        let context = match self {
            Hook::PreToolUse(PreToolUsePayload::Write(p) | PreToolUsePayload::Edit(p)) => {
                &p.context
            }
            Hook::PreToolUse(PreToolUsePayload::Bash(p)) => &p.context,
            Hook::PostToolUse(PostToolUsePayload::Bash(p)) => &p.context,
            Hook::UserPromptSubmit(p) => &p.context,
            Hook::PreCompact(p) => &p.context,
            Hook::PreToolUse(PreToolUsePayload::Other)
            | Hook::PostToolUse(PostToolUsePayload::Other)
            | Hook::Other => return None,
        };
        context.cwd.as_ref()
    }
}

/// Shared fields in all Claude Code hook payloads.
///
/// Everything is optional: the hooks only need `cwd`, and a payload missing
/// the rest should still be handled.
#[derive(Debug, Default, Deserialize)]
pub struct Context {
    /// The session ID.
    #[serde(default)]
    pub session_id: Option<String>,

    /// The path to the chat transcript.
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,

    /// The permission mode for the chat.
    #[serde(default)]
    pub permission_mode: Option<String>,

    /// The current working directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

/// Payload for the `PreToolUse` hook.
#[derive(Debug, Deserialize)]
#[serde(tag = "tool_name")]
pub enum PreToolUsePayload {
    /// The Write tool.
    Write(FileToolPayload),

    /// The Edit tool.
    Edit(FileToolPayload),

    /// The Bash tool.
    Bash(BashPayload),

    /// Any other tool.
    #[serde(other)]
    Other,
}

/// Payload for tools that modify a single file.
#[derive(Debug, Deserialize)]
pub struct FileToolPayload {
    /// The context of the hook.
    #[serde(flatten)]
    pub context: Context,

    /// The input to the tool.
    pub tool_input: FileToolInput,
}

/// The part of a file tool's input the hooks look at.
#[derive(Debug, Deserialize)]
pub struct FileToolInput {
    /// The path to the file being modified.
    pub file_path: PathBuf,
}

/// Payload for the `Bash` tool before it runs.
#[derive(Debug, Deserialize)]
pub struct BashPayload {
    /// The context of the hook.
    #[serde(flatten)]
    pub context: Context,

    /// The input to the tool.
    pub tool_input: BashInput,
}

/// Input for the `Bash` tool.
#[derive(Debug, Deserialize)]
pub struct BashInput {
    /// The shell command to run.
    pub command: String,

    /// The agent's description of the command.
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for the `PostToolUse` hook.
#[derive(Debug, Deserialize)]
#[serde(tag = "tool_name")]
pub enum PostToolUsePayload {
    /// The Bash tool.
    Bash(PostToolUseBashPayload),

    /// Any other tool.
    #[serde(other)]
    Other,
}

/// Payload for the `Bash` tool after it ran.
#[derive(Debug, Deserialize)]
pub struct PostToolUseBashPayload {
    /// The context of the hook.
    #[serde(flatten)]
    pub context: Context,

    /// The input to the tool.
    pub tool_input: BashInput,

    /// The response from the tool.
    ///
    /// Usually an object with `stdout` and `stderr`; older hosts sent this
    /// as `tool_output`.
    #[serde(default, alias = "tool_output")]
    pub tool_response: Value,
}

impl PostToolUseBashPayload {
    /// The command's captured output: stdout followed by stderr.
    ///
    /// A response that is a bare string is used as-is.
    pub fn output(&self) -> String {
        match &self.tool_response {
            Value::String(output) => output.clone(),
            Value::Object(response) => ["stdout", "stderr"]
                .iter()
                .filter_map(|key| response.get(*key).and_then(Value::as_str))
                .filter(|stream| !stream.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        }
    }
}

/// Payload for the `UserPromptSubmit` hook.
#[derive(Debug, Deserialize)]
pub struct UserPromptSubmitPayload {
    /// The context of the hook.
    #[serde(flatten)]
    pub context: Context,

    /// The user's prompt.
    #[serde(default)]
    pub prompt: String,
}

/// Payload for the `PreCompact` hook.
#[derive(Debug, Deserialize)]
pub struct PreCompactPayload {
    /// The context of the hook.
    #[serde(flatten)]
    pub context: Context,

    /// What triggered compaction: `manual` or `auto`.
    #[serde(default)]
    pub trigger: Option<String>,

    /// Instructions supplied with a manual compaction.
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

/// The response to a hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Nothing to say. Exit code 0, no output.
    Passthrough,

    /// Informational text for the agent on stdout. Exit code 0.
    Advise(String),

    /// A structured advisory on stdout, pretty-printed JSON. Exit code 0.
    Report(Value),

    /// Block the operation. The message goes to stderr; exit code 2.
    Block(String),
}

/// Exit code that tells Claude Code to block the operation.
pub const BLOCK_EXIT_CODE: i32 = 2;

/// Configures a hook in Claude Code's settings.
#[derive(Debug, Serialize, Clone, Builder)]
#[non_exhaustive]
pub struct Config {
    /// The type of hook to run; always `command`.
    #[builder(skip = String::from("command"))]
    pub r#type: String,

    /// The command to run.
    #[builder(into)]
    pub command: String,

    /// Terminate the command after this many seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

impl From<&Config> for Config {
    fn from(value: &Config) -> Self {
        value.clone()
    }
}

/// Configures hook matching strategy in Claude Code's settings.json.
#[derive(Debug, Serialize, Clone, Builder)]
#[non_exhaustive]
pub struct Matcher {
    /// The tool-name matcher; only used by `PreToolUse` and `PostToolUse`.
    #[builder(default = "", into)]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub matcher: String,

    /// The hooks to run when the matcher matches.
    #[builder(with = |i: impl IntoIterator<Item = impl Into<Config>>| i.into_iter().map(Into::into).collect())]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<Config>,
}
