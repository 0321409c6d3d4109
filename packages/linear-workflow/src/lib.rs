//! Main library for linear-workflow, used by its CLI.
//!
//! Keeps an AI coding agent's work aligned with the Linear issue behind the
//! current branch: commit subjects are checked against a structured grammar,
//! and the agent is told about the tracked issue at the points where the
//! workflow can drift.

pub mod activation;
pub mod claude;
pub mod commit;
pub mod git;
pub mod issue;
pub mod reconcile;
pub mod settings;
pub mod shell;
pub mod state;
pub mod workspace;
