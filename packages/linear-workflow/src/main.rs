//! linear-workflow keeps an agent's work aligned with the Linear issue behind its branch.

use std::path::PathBuf;

use color_eyre::Result;
use tracing::{instrument, level_filters::LevelFilter};

mod cmd;

use clap::{Args, Parser, Subcommand};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Linear workflow hooks for Claude Code.
#[derive(Parser)]
#[command(author, version = env!("LINEAR_WORKFLOW_VERSION"), about)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct Global {
    /// Project root to inspect; defaults to the hook's `cwd`, then the current directory.
    #[arg(long, global = true, env = "LINEAR_WORKFLOW_CWD")]
    pub cwd: Option<PathBuf>,

    /// Settings file to use instead of the user-level one.
    #[arg(long, global = true, env = "LINEAR_WORKFLOW_SETTINGS")]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Integration with Claude Code.
    Claude(cmd::claude::Config),

    /// Validate a commit subject against the commit grammar.
    CheckCommit(cmd::check_commit::Config),

    /// Show whether the workflow is active and what the current branch tracks.
    Status(cmd::status::Config),

    /// List the cached state of every tracked issue.
    Tasks(cmd::tasks::Config),

    /// Print the effective settings.
    Settings(cmd::settings::Config),
}

#[instrument]
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Claude Code runs `linear-workflow claude hook` as a subprocess and reads
    // both stdout and stderr, so by default we only log errors. Set
    // `LINEAR_WORKFLOW_LOG` when debugging by hand.
    //
    // Examples:
    // - `LINEAR_WORKFLOW_LOG=debug` to log decisions made by each hook
    // - `LINEAR_WORKFLOW_LOG=linear_workflow::git=trace` to trace git queries
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            fmt::layer()
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_writer(std::io::stderr)
                .pretty(),
        )
        .with(
            EnvFilter::builder()
                .with_env_var("LINEAR_WORKFLOW_LOG")
                .with_default_directive(LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .init();

    match cli.command {
        Commands::Claude(config) => cmd::claude::main(cli.global, config),
        Commands::CheckCommit(config) => cmd::check_commit::main(cli.global, config),
        Commands::Status(config) => cmd::status::main(cli.global, config),
        Commands::Tasks(config) => cmd::tasks::main(cli.global, config),
        Commands::Settings(config) => cmd::settings::main(cli.global, config),
    }
}
