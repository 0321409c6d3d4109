//! Commit subject grammar and extraction of inline messages from shell commands.
//!
//! The accepted grammar, in order of precedence:
//!
//! ```text
//! subject     := exempt | structured
//! exempt      := "Merge " ANY | "fixup! " ANY | "squash! " ANY
//! structured  := [emoji WS*] type ["(" scope ")"] ["!"] ": " description
//! type        := feat | fix | docs | style | refactor | test | chore
//!              | perf | ci | build | revert
//! scope       := [A-Za-z0-9_-]+
//! description := 1 to 100 characters
//! ```
//!
//! Exempt subjects come from git tooling rather than a human author and are
//! accepted without looking at the rest of the line.

use std::fmt;
use std::sync::LazyLock;

use indoc::formatdoc;
use itertools::Itertools;
use regex::Regex;

use crate::shell::{self, SimpleCommand};

/// The closed set of commit types.
pub const COMMIT_TYPES: [&str; 11] = [
    "feat", "fix", "docs", "style", "refactor", "test", "chore", "perf", "ci", "build", "revert",
];

/// Emoji accepted in front of the type, paired with the type they conventionally mark.
///
/// The variation selector (U+FE0F) is optional after every entry.
pub const EMOJI_TYPES: &[(&str, &str)] = &[
    ("✨", "feat"),
    ("🎉", "feat"),
    ("🐛", "fix"),
    ("🚑", "fix"),
    ("🩹", "fix"),
    ("📝", "docs"),
    ("💄", "style"),
    ("🎨", "style"),
    ("♻", "refactor"),
    ("🔥", "refactor"),
    ("✅", "test"),
    ("🧪", "test"),
    ("🔧", "chore"),
    ("🔨", "chore"),
    ("⬆", "chore"),
    ("⚡", "perf"),
    ("👷", "ci"),
    ("💚", "ci"),
    ("📦", "build"),
    ("🏗", "build"),
    ("⏪", "revert"),
];

/// Maximum length of the description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 100;

const VARIATION_SELECTOR: char = '\u{FE0F}';

static STRUCTURED: LazyLock<Regex> = LazyLock::new(|| {
    let emoji = EMOJI_TYPES
        .iter()
        .map(|(emoji, _)| regex::escape(emoji))
        .join("|");
    let types = COMMIT_TYPES.join("|");
    Regex::new(&format!(
        r"^(?:(?P<emoji>(?:{emoji})\x{{FE0F}}?)\s*)?(?P<type>{types})(?:\((?P<scope>[a-zA-Z0-9_-]+)\))?(?P<breaking>!)?: (?P<description>.{{1,{MAX_DESCRIPTION_LEN}}})$"
    ))
    .expect("compile commit subject grammar")
});

/// Why a subject was accepted without checking the structured grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exemption {
    /// A merge commit created by git.
    Merge,

    /// A `fixup!` commit destined for autosquash.
    Fixup,

    /// A `squash!` commit destined for autosquash.
    Squash,
}

impl Exemption {
    /// Ordered exemption markers; the first prefix that matches wins.
    const MARKERS: [(&str, Exemption); 3] = [
        ("Merge ", Exemption::Merge),
        ("fixup!", Exemption::Fixup),
        ("squash!", Exemption::Squash),
    ];

    fn detect(subject: &str) -> Option<Self> {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| subject.starts_with(marker))
            .map(|(_, exemption)| *exemption)
    }
}

/// A subject that conforms to the structured grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// The emoji prefix, without variation selector.
    pub emoji: Option<String>,

    /// The commit type, e.g. `feat`.
    pub kind: String,

    /// The optional scope inside parentheses.
    pub scope: Option<String>,

    /// Whether the subject marks a breaking change with `!`.
    pub breaking: bool,

    /// Everything after `: `.
    pub description: String,
}

impl Subject {
    fn parse(subject: &str) -> Option<Self> {
        let caps = STRUCTURED.captures(subject)?;
        Some(Self {
            emoji: caps
                .name("emoji")
                .map(|m| m.as_str().trim_end_matches(VARIATION_SELECTOR).to_string()),
            kind: caps.name("type")?.as_str().to_string(),
            scope: caps.name("scope").map(|m| m.as_str().to_string()),
            breaking: caps.name("breaking").is_some(),
            description: caps.name("description")?.as_str().to_string(),
        })
    }

    /// The type conventionally marked by this subject's emoji, if any.
    pub fn emoji_type(&self) -> Option<&'static str> {
        let emoji = self.emoji.as_deref()?;
        EMOJI_TYPES
            .iter()
            .find(|(candidate, _)| *candidate == emoji)
            .map(|(_, kind)| *kind)
    }
}

/// Why a subject was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The subject does not match the grammar at all.
    Malformed { subject: String },

    /// Strict mode only: the emoji marks a different type than the one stated.
    EmojiMismatch {
        subject: String,
        emoji: String,
        expected: &'static str,
        actual: String,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Malformed { subject } => {
                let types = COMMIT_TYPES.join(", ");
                let message = formatdoc! {"
                    Invalid commit format: '{subject}'
                    Expected: [emoji] <type>(<scope>): <description>
                    Types: {types}
                    Description: 1-{MAX_DESCRIPTION_LEN} characters after ': '
                    Example: feat(auth): add login validation
                    Example: ✨ feat(auth): add login validation"
                };
                f.write_str(&message)
            }
            Rejection::EmojiMismatch {
                subject,
                emoji,
                expected,
                actual,
            } => {
                let message = formatdoc! {"
                    Invalid commit format: '{subject}'
                    Emoji {emoji} marks '{expected}' commits, but the type is '{actual}'.
                    Example: {emoji} {expected}: describe the change"
                };
                f.write_str(&message)
            }
        }
    }
}

/// The outcome of validating a commit subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The subject conforms to the structured grammar.
    Valid(Subject),

    /// The subject was accepted without grammar checking.
    Exempt(Exemption),

    /// The subject was rejected.
    Invalid(Rejection),
}

impl Verdict {
    /// Whether the commit should be allowed.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Verdict::Invalid(_))
    }

    /// Human-readable explanation; empty when the subject is valid.
    pub fn message(&self) -> String {
        match self {
            Verdict::Invalid(rejection) => rejection.to_string(),
            _ => String::new(),
        }
    }
}

/// Validates commit subjects.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitValidator {
    /// Reject subjects whose emoji conventionally marks a different type.
    pub strict_emoji: bool,
}

impl CommitValidator {
    /// Create a validator with the given emoji strictness.
    pub fn new(strict_emoji: bool) -> Self {
        Self { strict_emoji }
    }

    /// Validate a single subject line.
    #[tracing::instrument(name = "CommitValidator::validate")]
    pub fn validate(&self, subject: &str) -> Verdict {
        if let Some(exemption) = Exemption::detect(subject) {
            return Verdict::Exempt(exemption);
        }

        let Some(parsed) = Subject::parse(subject) else {
            return Verdict::Invalid(Rejection::Malformed {
                subject: subject.to_string(),
            });
        };

        if self.strict_emoji
            && let (Some(emoji), Some(expected)) = (parsed.emoji.as_ref(), parsed.emoji_type())
            && expected != parsed.kind
        {
            return Verdict::Invalid(Rejection::EmojiMismatch {
                subject: subject.to_string(),
                emoji: emoji.clone(),
                expected,
                actual: parsed.kind,
            });
        }

        Verdict::Valid(parsed)
    }

    /// Validate the commits created by a shell command.
    ///
    /// Every `git commit` in the command line is checked; the first rejection
    /// wins. Returns `None` when the line makes no commit or when no commit's
    /// message can be extracted (passed by file or editor); the caller should
    /// allow the command in that case.
    pub fn check_command(&self, command: &str) -> Option<Verdict> {
        let mut verdicts = commit_commands(command)
            .filter_map(|commit| subject_of(&commit))
            .map(|(_, subject)| self.validate(&subject));
        let first = verdicts.next()?;
        if !first.is_valid() {
            return Some(first);
        }
        Some(verdicts.find(|verdict| !verdict.is_valid()).unwrap_or(first))
    }
}

/// Validate a subject with the default (permissive) validator.
pub fn validate(subject: &str) -> Verdict {
    CommitValidator::default().validate(subject)
}

/// Whether a shell command line invokes `git commit` in any of its commands.
pub fn is_git_commit(command: &str) -> bool {
    commit_commands(command).next().is_some()
}

/// The simple commands of a command line that invoke `git commit`.
fn commit_commands(command: &str) -> impl Iterator<Item = SimpleCommand> {
    shell::split_commands(command)
        .into_iter()
        .filter(|simple| invokes_commit(&simple.words()))
}

/// Whether the words of one simple command invoke `git commit`.
///
/// Global options between `git` and `commit` (such as `-C <dir>`) are skipped.
fn invokes_commit(words: &[String]) -> bool {
    words.iter().positions(|word| word == "git").any(|git| {
        let mut rest = words[git + 1..].iter().map(String::as_str);
        loop {
            match rest.next() {
                Some("commit") => return true,
                Some("-C" | "-c" | "--git-dir" | "--work-tree" | "--namespace") => {
                    rest.next();
                }
                Some(option) if option.starts_with('-') => {}
                _ => return false,
            }
        }
    })
}

/// Whether `git commit` is told to read its message from stdin.
fn reads_message_from_stdin(words: &[String]) -> bool {
    words.iter().tuple_windows().any(|(flag, value)| {
        matches!(flag.as_str(), "-F" | "--file") && value == "-"
    }) || words.iter().any(|word| word == "-F-" || word == "--file=-")
}

/// Form in which a commit message was supplied on the command line.
///
/// Forms are tried in declaration order and the first one that matches wins;
/// results from different forms are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageForm {
    /// `-m "$(cat <<'EOF' ... EOF)"`, or a here-doc fed to `-F -`.
    HereDoc,

    /// `-m "message"`.
    DoubleQuoted,

    /// `-m 'message'`.
    SingleQuoted,

    /// `-m message` (a single token).
    Bare,
}

/// `-m`, combined short flags ending in `m` (`-am`), or `--message`.
const MESSAGE_FLAG: &str = r"(?:^|\s)(?:-[A-Za-z]*m|--message)(?:=|\s+)";

static HEREDOC_SUBSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"{MESSAGE_FLAG}"\$\(\s*cat\s*<<[-~]?\s*['"]?(?P<delimiter>\w+)['"]?[^\n]*\n"#
    ))
    .expect("compile heredoc substitution regex")
});

static DOUBLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"{MESSAGE_FLAG}"(?P<message>(?:[^"\\]|\\.)+)""#))
        .expect("compile double-quoted message regex")
});

static SINGLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{MESSAGE_FLAG}'(?P<message>[^']+)'"))
        .expect("compile single-quoted message regex")
});

static BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"{MESSAGE_FLAG}(?P<message>[^\s"']\S*)"#))
        .expect("compile bare message regex")
});

impl MessageForm {
    /// All forms, in precedence order.
    pub const ALL: [MessageForm; 4] = [
        MessageForm::HereDoc,
        MessageForm::DoubleQuoted,
        MessageForm::SingleQuoted,
        MessageForm::Bare,
    ];

    /// Try to extract the message supplied in this form to one `git commit`.
    ///
    /// `Some(None)` means the form matched but carried no usable subject:
    /// an empty here-doc, or a message built at run time (`"$(...)"` or `$VAR`).
    fn extract(self, commit: &SimpleCommand) -> Option<Option<String>> {
        let text = commit.text.as_str();
        match self {
            MessageForm::HereDoc => {
                if let Some(caps) = HEREDOC_SUBSTITUTION.captures(text) {
                    let delimiter = caps.name("delimiter")?.as_str();
                    let body = text[caps.get(0)?.end()..]
                        .lines()
                        .take_while(|line| line.trim() != delimiter)
                        .join("\n");
                    Some(first_line(&body))
                } else if reads_message_from_stdin(&commit.words()) {
                    commit.heredocs.first().map(|body| first_line(body))
                } else {
                    None
                }
            }
            MessageForm::DoubleQuoted => {
                let message = DOUBLE_QUOTED.captures(text)?.name("message")?.as_str();
                if message.starts_with('$') || message.starts_with('`') {
                    return Some(None);
                }
                Some(first_line(&message.replace("\\\"", "\"")))
            }
            MessageForm::SingleQuoted => SINGLE_QUOTED
                .captures(text)
                .and_then(|caps| caps.name("message"))
                .map(|m| first_line(m.as_str())),
            MessageForm::Bare => {
                let message = BARE.captures(text)?.name("message")?.as_str();
                if message.starts_with('$') || message.starts_with('`') {
                    return Some(None);
                }
                Some(first_line(message))
            }
        }
    }
}

/// The first non-blank line of a message, which git uses as the subject.
fn first_line(message: &str) -> Option<String> {
    message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

/// The subject given inline to one `git commit`, and the form that supplied it.
fn subject_of(commit: &SimpleCommand) -> Option<(MessageForm, String)> {
    MessageForm::ALL.into_iter().find_map(|form| {
        form.extract(commit)
            .map(|subject| subject.map(|subject| (form, subject)))
    })?
}

/// Extract the commit subject from a command line containing `git commit`.
///
/// Returns `None` when no commit in the line has an inline message.
pub fn extract_subject(command: &str) -> Option<String> {
    extract_subject_with_form(command).map(|(_, subject)| subject)
}

/// Like [`extract_subject`], also reporting which form supplied the subject.
pub fn extract_subject_with_form(command: &str) -> Option<(MessageForm, String)> {
    commit_commands(command).find_map(|commit| subject_of(&commit))
}
