use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_HOLD_DELAY_MS, DEFAULT_MAX_ZOOM, DEFAULT_PINCH_SENSITIVITY, DEFAULT_THRESHOLDS,
    DEFAULT_TOUCH_ZOOM_SCALE, DEFAULT_TRANSITION_MS, DEFAULT_WHEEL_ZOOM_SCALE, REST_ZOOM,
};
use crate::error::{PatinaError, Result};
use crate::layers::LayerManifest;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub layers: LayerManifest,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Upper zoom bound. The lower bound is always 1 (rest).
    pub max_zoom: f64,
    /// Ascending zoom levels that unlock each decay layer in turn.
    pub thresholds: Vec<f64>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max_zoom: DEFAULT_MAX_ZOOM,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Dwell at rest before the transition fires.
    pub hold_delay_ms: u64,
    /// Length of the transition effect.
    pub transition_ms: u64,
}

impl TimingConfig {
    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hold_delay_ms: DEFAULT_HOLD_DELAY_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub wheel_zoom_scale: f64,
    pub touch_zoom_scale: f64,
    pub pinch_sensitivity: f64,
    pub wheel_focus: WheelFocus,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_zoom_scale: DEFAULT_WHEEL_ZOOM_SCALE,
            touch_zoom_scale: DEFAULT_TOUCH_ZOOM_SCALE,
            pinch_sensitivity: DEFAULT_PINCH_SENSITIVITY,
            wheel_focus: WheelFocus::default(),
        }
    }
}

/// Where wheel zoom is anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelFocus {
    /// The point under the pointer stays fixed.
    #[default]
    Pointer,
    /// Zoom about the image center with no offset compensation.
    Center,
}

impl std::fmt::Display for WheelFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pointer => write!(f, "Pointer"),
            Self::Center => write!(f, "Center"),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject configurations the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        let zoom = &self.zoom;
        if !zoom.max_zoom.is_finite() || zoom.max_zoom <= REST_ZOOM {
            return Err(invalid(format!(
                "max_zoom must be a finite value above {REST_ZOOM}, got {}",
                zoom.max_zoom
            )));
        }
        if zoom.thresholds.is_empty() {
            return Err(invalid("at least one zoom threshold is required".into()));
        }
        for pair in zoom.thresholds.windows(2) {
            if pair[0] >= pair[1] {
                return Err(invalid(format!(
                    "thresholds must be strictly ascending ({} >= {})",
                    pair[0], pair[1]
                )));
            }
        }
        for &t in &zoom.thresholds {
            if !t.is_finite() || t <= REST_ZOOM || t > zoom.max_zoom {
                return Err(invalid(format!(
                    "threshold {t} outside ({REST_ZOOM}, {}]",
                    zoom.max_zoom
                )));
            }
        }

        if self.timing.hold_delay_ms == 0 || self.timing.transition_ms == 0 {
            return Err(invalid("hold and transition durations must be non-zero".into()));
        }

        let input = &self.input;
        for (name, value) in [
            ("wheel_zoom_scale", input.wheel_zoom_scale),
            ("touch_zoom_scale", input.touch_zoom_scale),
            ("pinch_sensitivity", input.pinch_sensitivity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        self.layers.validate()
    }
}

fn invalid(message: String) -> PatinaError {
    PatinaError::InvalidConfig(message)
}
