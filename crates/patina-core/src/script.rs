//! Scripted gesture replay in virtual time.
//!
//! ```toml
//! container = [0.0, 0.0, 400.0, 300.0]
//!
//! [[step]]
//! at_ms = 0
//! input = { type = "wheel", delta_y = -400.0, x = 200.0, y = 150.0 }
//!
//! [[step]]
//! at_ms = 2600
//! ```
//!
//! A step without `input` only advances the clock and records a snapshot.

use std::path::Path;
use std::time::Duration;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::arbiter::GestureMode;
use crate::controller::Controller;
use crate::error::{PatinaError, Result};
use crate::frame::LayerVisibility;
use crate::input::{
    Input, PointerButton, PointerInput, PointerKind, TouchInput, TouchPhase, WheelInput,
};
use crate::scheduler::TimerQueue;
use crate::sequencer::Phase;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Script {
    /// Container layout rect as `[x0, y0, x1, y1]`.
    #[serde(default)]
    pub container: Option<[f64; 4]>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(default)]
    pub input: Option<ScriptInput>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptInput {
    Wheel {
        delta_y: f64,
        x: f64,
        y: f64,
    },
    Pointer {
        kind: PointerKind,
        #[serde(default)]
        button: PointerButton,
        x: f64,
        y: f64,
    },
    Touch {
        phase: TouchPhase,
        #[serde(default)]
        touches: Vec<[f64; 2]>,
    },
}

impl ScriptInput {
    pub fn to_input(&self) -> Input {
        match self {
            Self::Wheel { delta_y, x, y } => Input::Wheel(WheelInput {
                delta_y: *delta_y,
                position: Point::new(*x, *y),
            }),
            Self::Pointer { kind, button, x, y } => Input::Pointer(PointerInput {
                kind: *kind,
                button: *button,
                position: Point::new(*x, *y),
            }),
            Self::Touch { phase, touches } => Input::Touch(TouchInput::new(
                *phase,
                touches.iter().map(|&[x, y]| Point::new(x, y)),
            )),
        }
    }
}

/// Controller state observed after one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub at_ms: u64,
    pub zoom: f64,
    pub offset: Vec2,
    pub stage: usize,
    pub phase: Phase,
    pub mode: GestureMode,
    pub layers: LayerVisibility,
}

impl Snapshot {
    pub fn capture(at_ms: u64, controller: &Controller<TimerQueue>) -> Self {
        Self {
            at_ms,
            zoom: controller.zoom(),
            offset: controller.offset(),
            stage: controller.stage(),
            phase: controller.phase(),
            mode: controller.gesture_mode(),
            layers: controller.frame().layers,
        }
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>7}ms  zoom {:>6.3}  offset ({:>8.2}, {:>8.2})  stage {}  {:<13} {:<10} {}",
            self.at_ms,
            self.zoom,
            self.offset.x,
            self.offset.y,
            self.stage,
            self.phase.to_string(),
            self.mode.to_string(),
            self.layers
        )
    }
}

impl Script {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let script: Self = toml::from_str(contents)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        for pair in self.steps.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(PatinaError::Script(format!(
                    "step at {}ms comes after a step at {}ms",
                    pair[1].at_ms, pair[0].at_ms
                )));
            }
        }
        if let Some([x0, y0, x1, y1]) = self.container {
            if !(x1 > x0 && y1 > y0) {
                return Err(PatinaError::Script(format!(
                    "container [{x0}, {y0}, {x1}, {y1}] has no area"
                )));
            }
        }
        Ok(())
    }

    /// Replay every step against `controller`, one snapshot per step.
    pub fn run(&self, controller: &mut Controller<TimerQueue>) -> Result<Vec<Snapshot>> {
        self.validate()?;
        if let Some([x0, y0, x1, y1]) = self.container {
            controller.set_container(Rect::new(x0, y0, x1, y1));
        }

        let mut snapshots = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            controller.advance_to(Duration::from_millis(step.at_ms));
            if let Some(ref input) = step.input {
                controller.handle(&input.to_input());
            }
            snapshots.push(Snapshot::capture(step.at_ms, controller));
        }
        Ok(snapshots)
    }
}
