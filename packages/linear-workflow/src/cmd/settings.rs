//! Print the effective settings.

use clap::Args;
use color_eyre::{Result, eyre::Context};
use linear_workflow::settings;
use tracing::instrument;

use crate::Global;

#[derive(Args, Clone, Debug)]
pub struct Config {}

#[instrument]
pub fn main(global: Global, _config: Config) -> Result<()> {
    let path = global.settings.clone().or_else(settings::default_path);
    let loaded = match &path {
        Some(path) => settings::load_from(path).context("load settings")?,
        None => None,
    };

    match (&path, &loaded) {
        (Some(path), Some(_)) => println!("# loaded from {}", path.display()),
        (Some(path), None) => println!("# {} not found; using defaults", path.display()),
        (None, _) => println!("# no config directory; using defaults"),
    }

    let settings = loaded.unwrap_or_default();
    let yaml = serde_yaml::to_string(&settings).context("serialize settings")?;
    println!("version: 1");
    print!("{yaml}");
    Ok(())
}
