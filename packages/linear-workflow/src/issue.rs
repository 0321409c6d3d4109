//! Issue identifiers and their extraction from branch names and free text.
//!
//! An identifier is a `PREFIX-NUMBER` token such as `LIN-42`. Matching is
//! case-insensitive and anchored on word boundaries; the result is always
//! canonicalized to uppercase.

use std::path::Path;

use derive_more::Display;
use itertools::Itertools;
use regex::Regex;
use serde::Serialize;

/// The identifier prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "LIN";

/// A canonical issue identifier, e.g. `LIN-42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The prefix portion (`LIN` in `LIN-42`).
    pub fn prefix(&self) -> &str {
        self.0.split_once('-').map_or(&self.0, |(prefix, _)| prefix)
    }

    /// The numeric portion (`42` in `LIN-42`).
    pub fn number(&self) -> u64 {
        self.0
            .split_once('-')
            .and_then(|(_, number)| number.parse().ok())
            .unwrap_or_default()
    }
}

impl AsRef<str> for IssueId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compiled matcher for issue identifiers with a fixed set of prefixes.
#[derive(Debug, Clone)]
pub struct IssuePattern {
    /// Unanchored search, used against branch names and free text.
    search: Regex,

    /// Whole-string match, used to recognise canonical names (e.g. file stems).
    exact: Regex,
}

impl IssuePattern {
    /// Build a pattern recognising any of the given prefixes.
    ///
    /// Prefixes that are not purely ASCII letters are ignored; if none remain,
    /// [`DEFAULT_PREFIX`] is used.
    pub fn new<S: AsRef<str>>(prefixes: impl IntoIterator<Item = S>) -> Self {
        let mut alternation = prefixes
            .into_iter()
            .map(|p| p.as_ref().trim().to_ascii_uppercase())
            .filter(|p| is_valid_prefix(p))
            .unique()
            .join("|");
        if alternation.is_empty() {
            alternation = DEFAULT_PREFIX.to_string();
        }

        // ASCII-only case folding: `ſ` (long s) must not match `S`.
        let search = Regex::new(&format!(r"\b((?i-u:{alternation})-[0-9]+)\b"))
            .expect("compile issue search pattern from letter-only prefixes");
        let exact = Regex::new(&format!(r"^(?i-u:{alternation})-[0-9]+$"))
            .expect("compile issue exact pattern from letter-only prefixes");
        Self { search, exact }
    }

    /// Extract the first identifier in `text`, uppercased.
    ///
    /// Returns `None` when the text carries no word-bounded identifier; this
    /// is a normal outcome, not an error.
    pub fn extract(&self, text: &str) -> Option<IssueId> {
        self.search
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| IssueId(m.as_str().to_ascii_uppercase()))
    }

    /// Parse `text` as exactly one identifier and nothing else.
    pub fn parse(&self, text: &str) -> Option<IssueId> {
        self.exact
            .is_match(text)
            .then(|| IssueId(text.to_ascii_uppercase()))
    }

    /// Parse the stem of a state file name (`LIN-42.json`) as an identifier.
    pub fn parse_file_stem(&self, path: &Path) -> Option<IssueId> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| self.parse(stem))
    }
}

impl Default for IssuePattern {
    fn default() -> Self {
        Self::new([DEFAULT_PREFIX])
    }
}

/// Whether a prefix is usable: non-empty ASCII letters only.
pub fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphabetic())
}
