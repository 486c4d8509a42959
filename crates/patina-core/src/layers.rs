use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PatinaError, Result};
use crate::frame::LayerVisibility;

/// Identifiers of the visual layers the viewer needs, as named by the host
/// (element ids on a page, file stems in an asset directory).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerManifest {
    pub container: String,
    pub rest: String,
    /// Ordered from least to most worn.
    pub decay: Vec<String>,
    pub effect: String,
}

impl Default for LayerManifest {
    fn default() -> Self {
        Self {
            container: "image-container".into(),
            rest: "tree-clean".into(),
            decay: vec![
                "tree-rust1".into(),
                "tree-rust2".into(),
                "tree-rust-full".into(),
            ],
            effect: "glitch-overlay".into(),
        }
    }
}

impl LayerManifest {
    pub fn validate(&self) -> Result<()> {
        if self.decay.is_empty() {
            return Err(PatinaError::NoDecayLayers);
        }
        let ids = self.ids().collect::<Vec<_>>();
        if let Some(empty) = ids.iter().find(|id| id.trim().is_empty()) {
            return Err(PatinaError::InvalidConfig(format!(
                "layer identifier {empty:?} is blank"
            )));
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(PatinaError::InvalidConfig(format!(
                    "layer identifier {id:?} is used twice"
                )));
            }
        }
        Ok(())
    }

    /// Every identifier in lookup order: container, rest, decay..., effect.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.container.as_str())
            .chain(std::iter::once(self.rest.as_str()))
            .chain(self.decay.iter().map(String::as_str))
            .chain(std::iter::once(self.effect.as_str()))
    }
}

/// Resolved handles for every layer, validated once at start-up.
#[derive(Clone, Debug)]
pub struct LayerSet<H> {
    pub container: H,
    pub rest: H,
    pub decay: Vec<H>,
    pub effect: H,
}

impl<H> LayerSet<H> {
    /// Look up every identifier in `manifest`. The first identifier the
    /// lookup cannot satisfy is a fatal error; no partial set is returned.
    pub fn resolve<F>(manifest: &LayerManifest, mut lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<H>,
    {
        if manifest.decay.is_empty() {
            return Err(PatinaError::NoDecayLayers);
        }

        let mut fetch = |id: &str| {
            lookup(id).ok_or_else(|| PatinaError::MissingLayer { id: id.to_string() })
        };

        let container = fetch(&manifest.container)?;
        let rest = fetch(&manifest.rest)?;
        let decay = manifest
            .decay
            .iter()
            .map(|id| fetch(id))
            .collect::<Result<Vec<_>>>()?;
        let effect = fetch(&manifest.effect)?;

        Ok(Self {
            container,
            rest,
            decay,
            effect,
        })
    }

    pub fn decay_count(&self) -> usize {
        self.decay.len()
    }

    /// Pair each drawable layer with its visibility flag, bottom to top:
    /// rest, decay layers by severity, then the effect surface.
    pub fn pairs<'a>(
        &'a self,
        visibility: &'a LayerVisibility,
    ) -> impl Iterator<Item = (&'a H, bool)> + 'a {
        std::iter::once((&self.rest, visibility.rest))
            .chain(
                self.decay
                    .iter()
                    .zip(visibility.decay.iter().copied()),
            )
            .chain(std::iter::once((&self.effect, visibility.effect)))
    }
}

/// Find every image layer as `<dir>/<id>.png`. The container is a layout
/// element with no image of its own and resolves to `None`.
pub fn locate_images(manifest: &LayerManifest, dir: &Path) -> Result<LayerSet<Option<PathBuf>>> {
    LayerSet::resolve(manifest, |id| {
        if id == manifest.container {
            return Some(None);
        }
        let path = dir.join(format!("{id}.png"));
        debug!(id, path = %path.display(), "Looking up layer");
        path.is_file().then_some(Some(path))
    })
}
