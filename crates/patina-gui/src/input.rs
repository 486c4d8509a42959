use std::collections::BTreeMap;

use kurbo::Point;
use patina_core::input::{
    Input, PointerButton, PointerInput, PointerKind, TouchInput, TouchPhase, WheelInput,
};

pub fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x as f64, pos.y as f64)
}

pub fn to_kurbo_rect(rect: egui::Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.max.x as f64,
        rect.max.y as f64,
    )
}

pub fn to_egui_rect(rect: kurbo::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.x0 as f32, rect.y0 as f32),
        egui::pos2(rect.x1 as f32, rect.y1 as f32),
    )
}

fn button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn touch_phase(phase: egui::TouchPhase) -> TouchPhase {
    match phase {
        egui::TouchPhase::Start => TouchPhase::Start,
        egui::TouchPhase::Move => TouchPhase::Move,
        egui::TouchPhase::End => TouchPhase::End,
        egui::TouchPhase::Cancel => TouchPhase::Cancel,
    }
}

/// Turns egui's raw event stream into controller inputs.
///
/// Contacts are keyed by touch id so every touch event carries the full
/// set of contacts still down. Pointer events egui synthesizes from a
/// touch are dropped while any contact is tracked.
#[derive(Default)]
pub struct InputTracker {
    touches: BTreeMap<u64, Point>,
}

impl InputTracker {
    /// Collect this frame's inputs. Gestures start only inside `container`.
    pub fn collect(&mut self, ctx: &egui::Context, container: egui::Rect) -> Vec<Input> {
        ctx.input(|i| {
            let touch_frame = i
                .events
                .iter()
                .any(|event| matches!(event, egui::Event::Touch { .. }));
            let mut inputs = Vec::new();

            for event in &i.events {
                match event {
                    egui::Event::Touch { id, phase, pos, .. } => {
                        inputs.extend(self.touch(id.0, touch_phase(*phase), *pos, container));
                    }
                    egui::Event::PointerButton {
                        pos,
                        button: b,
                        pressed,
                        ..
                    } if !touch_frame && self.touches.is_empty() => {
                        let Some(button) = button(*b) else { continue };
                        if *pressed && !container.contains(*pos) {
                            continue;
                        }
                        let kind = if *pressed {
                            PointerKind::Down
                        } else {
                            PointerKind::Up
                        };
                        inputs.push(Input::Pointer(PointerInput {
                            kind,
                            button,
                            position: to_point(*pos),
                        }));
                    }
                    egui::Event::PointerMoved(pos) if !touch_frame && self.touches.is_empty() => {
                        inputs.push(Input::Pointer(PointerInput {
                            kind: PointerKind::Move,
                            button: PointerButton::Primary,
                            position: to_point(*pos),
                        }));
                    }
                    _ => {}
                }
            }

            let scroll = i.raw_scroll_delta.y;
            if scroll != 0.0 {
                if let Some(pos) = i.pointer.hover_pos().filter(|p| container.contains(*p)) {
                    // egui scrolls positive upwards; wheel deltas grow downwards.
                    inputs.push(Input::Wheel(WheelInput {
                        delta_y: -(scroll as f64),
                        position: to_point(pos),
                    }));
                }
            }

            inputs
        })
    }

    fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        pos: egui::Pos2,
        container: egui::Rect,
    ) -> Option<Input> {
        match phase {
            TouchPhase::Start => {
                if !container.contains(pos) {
                    return None;
                }
                self.touches.insert(id, to_point(pos));
            }
            TouchPhase::Move => *self.touches.get_mut(&id)? = to_point(pos),
            TouchPhase::End | TouchPhase::Cancel => {
                self.touches.remove(&id)?;
            }
        }
        Some(Input::Touch(TouchInput::new(
            phase,
            self.touches.values().copied(),
        )))
    }
}
