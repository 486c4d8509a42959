use crate::consts::REST_ZOOM;
use crate::frame::LayerVisibility;
use crate::sequencer::Phase;

/// Maps zoom to a reveal stage that only grows within one excursion.
#[derive(Clone, Debug)]
pub struct DisclosureStager {
    thresholds: Vec<f64>,
    stage: usize,
}

impl DisclosureStager {
    /// `thresholds` must be strictly ascending; one per decay layer.
    pub fn new(thresholds: Vec<f64>) -> Self {
        Self {
            thresholds,
            stage: 0,
        }
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn layer_count(&self) -> usize {
        self.thresholds.len()
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of thresholds at or below `zoom`.
    pub fn candidate(&self, zoom: f64) -> usize {
        self.thresholds.partition_point(|&t| t <= zoom)
    }

    /// Raise the stage to what `zoom` unlocks. Returns whether it grew.
    pub fn recompute(&mut self, zoom: f64) -> bool {
        let candidate = self.candidate(zoom);
        if candidate > self.stage {
            self.stage = candidate;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.stage = 0;
    }

    pub fn visibility(&self, zoom: f64, phase: &Phase) -> LayerVisibility {
        let count = self.layer_count();
        match phase {
            Phase::Holding { .. } | Phase::Transitioning { .. } => {
                let mut decay = vec![false; count];
                if let Some(worst) = decay.last_mut() {
                    *worst = true;
                }
                LayerVisibility {
                    rest: false,
                    decay,
                    effect: matches!(phase, Phase::Transitioning { .. }),
                }
            }
            Phase::Active if zoom == REST_ZOOM => LayerVisibility::at_rest(count),
            Phase::Active => LayerVisibility {
                rest: self.stage == 0,
                decay: (0..count).map(|i| i < self.stage).collect(),
                effect: false,
            },
        }
    }
}
