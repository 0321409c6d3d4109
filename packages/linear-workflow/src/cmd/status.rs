//! Show what the hooks see in the current project.

use clap::Args;
use color_eyre::{Result, eyre::Context};
use linear_workflow::activation;
use linear_workflow::reconcile::{BranchSnapshot, STATUS_COMMAND};
use linear_workflow::settings;
use linear_workflow::state;
use tracing::instrument;

use crate::Global;

#[derive(Args, Clone, Debug)]
pub struct Config {}

#[instrument]
pub fn main(global: Global, _config: Config) -> Result<()> {
    let settings = settings::load(global.settings.as_deref()).context("load settings")?;
    let workspace = global.workspace(&settings, None);
    let pattern = settings.issue_pattern();

    let activation = activation::detect(&workspace, &pattern);
    println!("Project: {}", workspace.root().display());
    if activation.is_active() {
        println!("Active:  yes ({activation})");
    } else {
        println!("Active:  no ({activation})");
    }

    let Some(snapshot) = BranchSnapshot::capture(&workspace, &pattern) else {
        println!("Branch:  (unknown)");
        return Ok(());
    };
    println!("Branch:  {}", snapshot.branch);
    if settings.is_protected(&snapshot.branch) {
        println!("         protected");
    }

    let Some(issue) = &snapshot.issue else {
        println!("Issue:   (none)");
        return Ok(());
    };
    println!("Issue:   {issue}");
    match &snapshot.record {
        Some(record) => {
            println!("Title:   {}", record.title());
            println!("Status:  {}", record.status());
            if let Some(url) = &record.linear_url {
                println!("URL:     {url}");
            }
        }
        None => {
            println!(
                "State:   not cached at {}; run {STATUS_COMMAND} in Claude Code",
                state::state_path(issue).display()
            );
        }
    }
    Ok(())
}
