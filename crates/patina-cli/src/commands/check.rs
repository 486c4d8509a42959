use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use patina_core::layers::locate_images;
use patina_core::scheduler::TimerQueue;
use patina_core::Controller;

use crate::summary;

#[derive(Args)]
pub struct CheckArgs {
    /// Folder holding one `<layer-id>.png` per image layer
    pub assets: PathBuf,

    /// Viewer config TOML (defaults are used otherwise)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    if !args.assets.is_dir() {
        bail!("{} is not a directory", args.assets.display());
    }
    let config = super::load_config(args.config.as_deref())?;

    let layers = locate_images(&config.layers, &args.assets)
        .with_context(|| format!("Incomplete assets in {}", args.assets.display()))?;

    Controller::new(&config, layers.decay_count(), TimerQueue::new())?;

    summary::print_config_summary(&config);
    summary::print_layer_paths(&layers);
    Ok(())
}
