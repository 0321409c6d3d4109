//! Validate a commit subject from the command line.

use clap::Args;
use color_eyre::{Result, eyre::Context};
use linear_workflow::claude::hook::BLOCK_EXIT_CODE;
use linear_workflow::commit::Verdict;
use linear_workflow::settings;
use tracing::instrument;

use crate::Global;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// The commit subject to validate.
    subject: String,

    /// Reject emoji that conventionally mark a different type, regardless of settings.
    #[arg(long)]
    strict_emoji: bool,
}

#[instrument]
pub fn main(global: Global, config: Config) -> Result<()> {
    let settings = settings::load(global.settings.as_deref()).context("load settings")?;
    let mut validator = settings.validator();
    validator.strict_emoji |= config.strict_emoji;

    match validator.validate(&config.subject) {
        Verdict::Valid(subject) => {
            let scope = subject
                .scope
                .map(|scope| format!(" (scope: {scope})"))
                .unwrap_or_default();
            let breaking = if subject.breaking { ", breaking" } else { "" };
            println!("✓ {}{scope}{breaking}", subject.kind);
            Ok(())
        }
        Verdict::Exempt(exemption) => {
            println!("✓ exempt: {exemption:?}");
            Ok(())
        }
        Verdict::Invalid(rejection) => {
            eprintln!("❌ {rejection}");
            std::process::exit(BLOCK_EXIT_CODE);
        }
    }
}
