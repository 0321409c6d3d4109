//! List every cached task.

use clap::Args;
use color_eyre::{Result, eyre::Context};
use linear_workflow::settings;
use linear_workflow::state::{self, STATE_DIR};
use tracing::instrument;

use crate::Global;

#[derive(Args, Clone, Debug)]
pub struct Config {}

#[instrument]
pub fn main(global: Global, _config: Config) -> Result<()> {
    let settings = settings::load(global.settings.as_deref()).context("load settings")?;
    let workspace = global.workspace(&settings, None);

    let tasks = state::load_all(&workspace, &settings.issue_pattern());
    if tasks.is_empty() {
        println!("No cached tasks in {STATE_DIR}");
        return Ok(());
    }

    let width = tasks
        .iter()
        .map(|(_, record)| record.status().chars().count())
        .max()
        .unwrap_or_default();
    for (issue, record) in tasks {
        println!("{issue}\t{:<width$}  {}", record.status(), record.title());
    }
    Ok(())
}
