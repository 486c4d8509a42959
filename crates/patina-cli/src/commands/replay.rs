use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use patina_core::scheduler::TimerQueue;
use patina_core::script::Script;
use patina_core::Controller;
use tracing::info;

use crate::summary;

#[derive(Args)]
pub struct ReplayArgs {
    /// Gesture script TOML
    pub script: PathBuf,

    /// Viewer config TOML (defaults are used otherwise)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let script = Script::load(&args.script)
        .with_context(|| format!("Failed to load script from {}", args.script.display()))?;

    let mut controller = Controller::new(&config, config.layers.decay.len(), TimerQueue::new())?;
    let snapshots = script.run(&mut controller)?;
    info!(steps = snapshots.len(), "Replay finished");

    summary::print_config_summary(&config);
    summary::print_snapshots(&snapshots);
    Ok(())
}
