//! Raw input events as delivered by the host, in device coordinates.

use kurbo::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Vertical scroll amount; positive scrolls down (zooms out).
    pub delta_y: f64,
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub button: PointerButton,
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A multi-touch event with the contacts still active after it.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchInput {
    pub phase: TouchPhase,
    pub touches: Vec<Point>,
}

impl TouchInput {
    pub fn new(phase: TouchPhase, touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            phase,
            touches: touches.into_iter().collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.touches.len()
    }

    /// Midpoint and distance of the first two contacts.
    pub fn two_finger_geometry(&self) -> Option<(Point, f64)> {
        match self.touches.as_slice() {
            [a, b, ..] => Some((a.midpoint(*b), a.distance(*b))),
            _ => None,
        }
    }
}

/// Any input the controller accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Wheel(WheelInput),
    Pointer(PointerInput),
    Touch(TouchInput),
}

impl Input {
    /// Every coordinate the event carries is finite.
    pub fn is_finite(&self) -> bool {
        let ok = |p: &Point| p.x.is_finite() && p.y.is_finite();
        match self {
            Self::Wheel(w) => w.delta_y.is_finite() && ok(&w.position),
            Self::Pointer(p) => ok(&p.position),
            Self::Touch(t) => t.touches.iter().all(ok),
        }
    }
}
