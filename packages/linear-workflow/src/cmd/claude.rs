//! Integration with Claude Code.

use clap::{Args, Subcommand};
use color_eyre::Result;
use tracing::instrument;

use crate::Global;

pub mod hook;
pub mod remind;
pub mod setup;

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    /// Responds to Claude Code hooks.
    Hook(hook::Config),

    /// Print a standing reminder if the workflow is active.
    Remind(remind::Config),

    /// Register linear-workflow hooks in .claude/settings.local.json.
    Setup(setup::Config),
}

#[instrument]
pub fn main(global: Global, config: Config) -> Result<()> {
    match config.command {
        Commands::Hook(config) => hook::main(global, config),
        Commands::Remind(config) => remind::main(global, config),
        Commands::Setup(config) => setup::main(config),
    }
}
