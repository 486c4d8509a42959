use std::path::Path;

use anyhow::{Context, Result};
use patina_core::config::ViewerConfig;
use patina_core::layers::{locate_images, LayerManifest, LayerSet};
use tracing::debug;

/// Optional per-folder viewer config.
pub const CONFIG_FILE: &str = "patina.toml";

pub fn load_config(dir: &Path) -> Result<ViewerConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(ViewerConfig::default());
    }
    ViewerConfig::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))
}

/// A resolved layer. The container is the viewport itself; every other
/// layer is an image.
pub enum Surface {
    Viewport,
    Image(egui::TextureHandle),
}

impl Surface {
    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        match self {
            Self::Viewport => None,
            Self::Image(texture) => Some(texture),
        }
    }
}

/// Every image layer of `manifest` as a texture, read from `<dir>/<id>.png`.
pub fn load_layers(
    ctx: &egui::Context,
    dir: &Path,
    manifest: &LayerManifest,
) -> Result<LayerSet<Surface>> {
    let paths = locate_images(manifest, dir)
        .with_context(|| format!("Incomplete assets in {}", dir.display()))?;

    Ok(LayerSet {
        container: load_surface(ctx, paths.container.as_deref())?,
        rest: load_surface(ctx, paths.rest.as_deref())?,
        decay: paths
            .decay
            .iter()
            .map(|path| load_surface(ctx, path.as_deref()))
            .collect::<Result<Vec<_>>>()?,
        effect: load_surface(ctx, paths.effect.as_deref())?,
    })
}

fn load_surface(ctx: &egui::Context, path: Option<&Path>) -> Result<Surface> {
    match path {
        Some(path) => Ok(Surface::Image(load_texture(ctx, path)?)),
        None => Ok(Surface::Viewport),
    }
}

fn load_texture(ctx: &egui::Context, path: &Path) -> Result<egui::TextureHandle> {
    let rgba = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    debug!(path = %path.display(), width = size[0], height = size[1], "Decoded layer");

    let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ctx.load_texture(name, color, egui::TextureOptions::LINEAR))
}
