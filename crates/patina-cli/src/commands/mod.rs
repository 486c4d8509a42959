pub mod check;
pub mod config;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use patina_core::config::ViewerConfig;

/// Load `path` if given, otherwise fall back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    match path {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ViewerConfig::default()),
    }
}
