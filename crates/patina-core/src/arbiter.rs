//! Input arbitration: one gesture mode at a time.
//!
//! The active mode and its start references live in a single [`Gesture`]
//! value. Entering a mode overwrites that value, so the previous mode's
//! references are gone before the new mode computes anything.

use kurbo::{Point, Rect, Vec2};
use tracing::debug;

use crate::config::{InputConfig, WheelFocus};
use crate::consts::MIN_PINCH_DISTANCE;
use crate::input::{Input, PointerButton, PointerInput, PointerKind, TouchInput, TouchPhase};
use crate::transform::{Focus, TransformEngine, ZoomChange};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    pub start: Point,
    pub base_offset: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchDragAnchor {
    pub start: Point,
    /// Position at the previous move, for per-increment direction.
    pub last: Point,
    pub base_offset: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchAnchor {
    /// Finger distance at the previous measurement.
    pub distance: f64,
    /// Contacts down at the previous measurement.
    pub contacts: usize,
    /// Centroid at pinch start, relative to the container center.
    pub anchor: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Wheel,
    MouseDrag(DragAnchor),
    TouchDrag(TouchDragAnchor),
    Pinch(PinchAnchor),
}

/// Data-free view of [`Gesture`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    Wheel,
    MouseDrag,
    TouchDrag,
    Pinch,
}

impl Gesture {
    pub fn mode(&self) -> GestureMode {
        match self {
            Self::Idle => GestureMode::Idle,
            Self::Wheel => GestureMode::Wheel,
            Self::MouseDrag(_) => GestureMode::MouseDrag,
            Self::TouchDrag(_) => GestureMode::TouchDrag,
            Self::Pinch(_) => GestureMode::Pinch,
        }
    }
}

impl std::fmt::Display for GestureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Wheel => write!(f, "wheel"),
            Self::MouseDrag => write!(f, "mouse-drag"),
            Self::TouchDrag => write!(f, "touch-drag"),
            Self::Pinch => write!(f, "pinch"),
        }
    }
}

/// How the controller must treat an input before it is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputClass {
    /// Hover, unarmed releases, extra contacts, moves suppressed at rest.
    Ignored,
    /// Gesture input: cancels any pending hold or transition first.
    Update,
    /// A drag or pinch finished.
    End,
}

/// Effect of one applied input on the transform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Outcome {
    pub zoom: Option<ZoomChange>,
    pub panned: bool,
    pub ended: bool,
}

#[derive(Clone, Debug)]
pub struct InputArbiter {
    gesture: Gesture,
    config: InputConfig,
}

impl InputArbiter {
    pub fn new(config: InputConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            config,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn mode(&self) -> GestureMode {
        self.gesture.mode()
    }

    /// Drop the active mode and its references.
    pub fn cancel(&mut self) {
        self.enter(Gesture::Idle);
    }

    pub fn classify(&self, input: &Input, at_rest: bool) -> InputClass {
        match input {
            Input::Wheel(_) => InputClass::Update,
            Input::Pointer(p) => self.classify_pointer(p, at_rest),
            Input::Touch(t) => self.classify_touch(t, at_rest),
        }
    }

    fn classify_pointer(&self, p: &PointerInput, at_rest: bool) -> InputClass {
        let dragging = matches!(self.gesture, Gesture::MouseDrag(_));
        match p.kind {
            PointerKind::Down if p.button == PointerButton::Primary => InputClass::Update,
            PointerKind::Move if dragging && !at_rest => InputClass::Update,
            PointerKind::Up if dragging && p.button == PointerButton::Primary => InputClass::End,
            _ => InputClass::Ignored,
        }
    }

    fn classify_touch(&self, t: &TouchInput, at_rest: bool) -> InputClass {
        match (t.phase, &self.gesture) {
            (TouchPhase::Start, Gesture::Pinch(_)) => InputClass::Ignored,
            (TouchPhase::Start, _) if t.count() >= 1 => InputClass::Update,
            (TouchPhase::Move, Gesture::Pinch(_)) if t.count() >= 2 => InputClass::Update,
            (TouchPhase::Move, Gesture::TouchDrag(_)) if t.count() == 1 && !at_rest => {
                InputClass::Update
            }
            (TouchPhase::End | TouchPhase::Cancel, Gesture::Pinch(_)) if t.count() < 2 => {
                InputClass::End
            }
            (TouchPhase::End | TouchPhase::Cancel, Gesture::TouchDrag(_)) if t.count() == 0 => {
                InputClass::End
            }
            _ => InputClass::Ignored,
        }
    }

    /// Apply a classified input to the engine.
    pub fn apply(&mut self, input: &Input, engine: &mut TransformEngine, container: Rect) -> Outcome {
        match input {
            Input::Wheel(w) => {
                self.enter(Gesture::Wheel);
                let delta = -w.delta_y * self.config.wheel_zoom_scale;
                let focus = match self.config.wheel_focus {
                    WheelFocus::Pointer => Focus::Anchor(engine.anchor_for(w.position, container)),
                    WheelFocus::Center => Focus::Center,
                };
                Outcome {
                    zoom: Some(engine.apply_zoom_delta(delta, focus)),
                    ..Outcome::default()
                }
            }
            Input::Pointer(p) => self.apply_pointer(p, engine),
            Input::Touch(t) => self.apply_touch(t, engine, container),
        }
    }

    fn apply_pointer(&mut self, p: &PointerInput, engine: &mut TransformEngine) -> Outcome {
        match (p.kind, self.gesture) {
            (PointerKind::Down, _) => {
                self.enter(Gesture::MouseDrag(DragAnchor {
                    start: p.position,
                    base_offset: engine.offset(),
                }));
                Outcome::default()
            }
            (PointerKind::Move, Gesture::MouseDrag(drag)) => Outcome {
                panned: engine.apply_pan_delta(drag.base_offset, p.position - drag.start),
                ..Outcome::default()
            },
            (PointerKind::Up, Gesture::MouseDrag(_)) => {
                self.enter(Gesture::Idle);
                Outcome {
                    ended: true,
                    ..Outcome::default()
                }
            }
            _ => Outcome::default(),
        }
    }

    fn apply_touch(
        &mut self,
        t: &TouchInput,
        engine: &mut TransformEngine,
        container: Rect,
    ) -> Outcome {
        match (t.phase, self.gesture) {
            (TouchPhase::Start, _) => {
                if let Some((centroid, distance)) = t.two_finger_geometry() {
                    self.enter(Gesture::Pinch(PinchAnchor {
                        distance,
                        contacts: t.count(),
                        anchor: engine.anchor_for(centroid, container),
                    }));
                } else if let Some(&start) = t.touches.first() {
                    self.enter(Gesture::TouchDrag(TouchDragAnchor {
                        start,
                        last: start,
                        base_offset: engine.offset(),
                    }));
                }
                Outcome::default()
            }
            (TouchPhase::Move, Gesture::Pinch(pinch)) => self.pinch_move(pinch, t, engine),
            (TouchPhase::Move, Gesture::TouchDrag(drag)) => match t.touches.first() {
                Some(&position) => self.touch_drag_move(drag, position, engine),
                None => Outcome::default(),
            },
            (TouchPhase::End | TouchPhase::Cancel, Gesture::Pinch(_) | Gesture::TouchDrag(_)) => {
                self.enter(Gesture::Idle);
                Outcome {
                    ended: true,
                    ..Outcome::default()
                }
            }
            _ => Outcome::default(),
        }
    }

    fn pinch_move(
        &mut self,
        pinch: PinchAnchor,
        t: &TouchInput,
        engine: &mut TransformEngine,
    ) -> Outcome {
        let Some((_, distance)) = t.two_finger_geometry() else {
            return Outcome::default();
        };
        self.gesture = Gesture::Pinch(PinchAnchor {
            distance,
            contacts: t.count(),
            ..pinch
        });

        // A finger landed or lifted: the first two contacts may be a new pair.
        if t.count() != pinch.contacts {
            debug!(from = pinch.contacts, to = t.count(), "Pinch contacts changed, rebasing");
            return Outcome::default();
        }
        if pinch.distance < MIN_PINCH_DISTANCE || !distance.is_finite() {
            debug!(reference = pinch.distance, "Degenerate pinch distance, skipping tick");
            return Outcome::default();
        }

        let ratio = distance / pinch.distance;
        let factor = 1.0 + (ratio - 1.0) * self.config.pinch_sensitivity;
        let target = engine.zoom() * factor;
        Outcome {
            zoom: Some(engine.set_zoom(target, Focus::Anchor(pinch.anchor))),
            ..Outcome::default()
        }
    }

    fn touch_drag_move(
        &mut self,
        drag: TouchDragAnchor,
        position: Point,
        engine: &mut TransformEngine,
    ) -> Outcome {
        let increment = position - drag.last;

        if !engine.is_at_rest() && increment.y.abs() > increment.x.abs() {
            // Pull up to zoom in.
            let delta = -increment.y * self.config.touch_zoom_scale;
            let change = engine.apply_zoom_delta(delta, Focus::Center);
            self.gesture = Gesture::TouchDrag(TouchDragAnchor {
                start: position,
                last: position,
                base_offset: engine.offset(),
            });
            return Outcome {
                zoom: Some(change),
                ..Outcome::default()
            };
        }

        self.gesture = Gesture::TouchDrag(TouchDragAnchor {
            last: position,
            ..drag
        });
        Outcome {
            panned: engine.apply_pan_delta(drag.base_offset, position - drag.start),
            ..Outcome::default()
        }
    }

    fn enter(&mut self, next: Gesture) {
        if self.gesture.mode() != next.mode() {
            debug!(from = %self.gesture.mode(), to = %next.mode(), "Gesture mode change");
        }
        self.gesture = next;
    }
}
