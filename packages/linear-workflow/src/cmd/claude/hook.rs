//! Responds to Claude Code hooks.
//!
//! This command fails open: any error is logged and the hook exits 0 with no
//! output. The only non-zero exit is [`BLOCK_EXIT_CODE`] for a rejected commit.

use std::io::{self, Read};

use clap::Args;
use color_eyre::{Result, eyre::Context};
use linear_workflow::claude::hook::{BLOCK_EXIT_CODE, Hook, Response};
use linear_workflow::reconcile;
use tracing::instrument;

use crate::Global;

#[derive(Args, Clone, Debug)]
pub struct Config {}

#[instrument]
pub fn main(global: Global, _config: Config) -> Result<()> {
    let response = match read_hook() {
        Ok(hook) => {
            tracing::debug!(?hook, "claude_code.hook.read");
            let settings = global.settings_or_default();
            let workspace = global.workspace(&settings, hook.cwd().map(|cwd| cwd.as_path()));
            reconcile::respond(&hook, &workspace, &settings)
        }
        Err(error) => {
            tracing::warn!(?error, "ignoring unreadable hook event");
            Response::Passthrough
        }
    };
    tracing::debug!(?response, "claude_code.hook.response");

    if let Err(error) = emit_response(response) {
        tracing::warn!(?error, "emit hook response");
    }
    Ok(())
}

fn read_hook() -> Result<Hook> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("read stdin")?;
    serde_json::from_str::<Hook>(&input).context("parse hook event")
}

fn emit_response(response: Response) -> Result<()> {
    match response {
        Response::Passthrough => Ok(()),
        Response::Advise(text) => {
            println!("{text}");
            Ok(())
        }
        Response::Report(value) => {
            let json = serde_json::to_string_pretty(&value).context("serialize advisory")?;
            println!("{json}");
            Ok(())
        }
        Response::Block(message) => {
            eprintln!("{message}");
            std::process::exit(BLOCK_EXIT_CODE);
        }
    }
}
