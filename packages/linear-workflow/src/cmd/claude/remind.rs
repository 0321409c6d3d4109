//! Prints a standing reminder for the agent.

use clap::Args;
use color_eyre::Result;
use linear_workflow::reconcile::reminder::{self, Topic};
use tracing::instrument;

use crate::Global;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Which reminder to print.
    #[arg(long, value_enum)]
    topic: Topic,
}

#[instrument]
pub fn main(global: Global, config: Config) -> Result<()> {
    let settings = global.settings_or_default();
    let workspace = global.workspace(&settings, None);
    if let Some(text) = reminder::remind(&workspace, &settings, config.topic) {
        println!("{text}");
    }
    Ok(())
}
