#![allow(dead_code)]

use std::time::Duration;

use kurbo::{Point, Rect};
use patina_core::config::ViewerConfig;
use patina_core::input::{
    PointerButton, PointerInput, PointerKind, TouchInput, TouchPhase, WheelInput,
};
use patina_core::scheduler::TimerQueue;
use patina_core::Controller;

/// 400x300 container at the origin.
pub const CONTAINER: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

pub const CENTER: Point = Point::new(200.0, 150.0);

/// Default config with a wheel scale of 1, so `delta_y = -n` zooms in by `n`.
pub fn unit_wheel_config() -> ViewerConfig {
    let mut config = ViewerConfig::default();
    config.input.wheel_zoom_scale = 1.0;
    config
}

pub fn controller_with(config: &ViewerConfig) -> Controller<TimerQueue> {
    let mut controller = Controller::new(config, config.zoom.thresholds.len(), TimerQueue::new())
        .expect("valid test config");
    controller.set_container(CONTAINER);
    controller
}

pub fn controller() -> Controller<TimerQueue> {
    controller_with(&unit_wheel_config())
}

/// Wheel event at the container center; positive `amount` zooms in.
pub fn wheel_zoom(controller: &mut Controller<TimerQueue>, amount: f64) {
    wheel_at(controller, amount, CENTER);
}

pub fn wheel_at(controller: &mut Controller<TimerQueue>, amount: f64, position: Point) {
    controller.on_wheel(WheelInput {
        delta_y: -amount,
        position,
    });
}

pub fn mouse(controller: &mut Controller<TimerQueue>, kind: PointerKind, x: f64, y: f64) {
    controller.on_pointer(PointerInput {
        kind,
        button: PointerButton::Primary,
        position: Point::new(x, y),
    });
}

pub fn touch(controller: &mut Controller<TimerQueue>, phase: TouchPhase, touches: &[(f64, f64)]) {
    controller.on_touch(TouchInput::new(
        phase,
        touches.iter().map(|&(x, y)| Point::new(x, y)),
    ));
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}
