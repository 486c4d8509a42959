use approx::assert_relative_eq;
use kurbo::{Point, Rect, Vec2};

use patina_core::transform::{Focus, TransformEngine};

const CONTAINER: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_stays_in_range_for_any_delta_sequence() {
    let mut engine = TransformEngine::new(10.0);
    let deltas = [
        0.5, 3.0, -0.2, 20.0, -7.5, -100.0, 0.01, 9.99, 1e6, -1e6, 2.5, -0.3,
    ];
    for delta in deltas {
        engine.apply_zoom_delta(delta, Focus::Anchor(Vec2::new(40.0, -25.0)));
        let zoom = engine.zoom();
        assert!((1.0..=10.0).contains(&zoom), "zoom {zoom} after delta {delta}");
    }
}

#[test]
fn test_absolute_zoom_is_clamped() {
    let mut engine = TransformEngine::new(10.0);
    assert_eq!(engine.set_zoom(42.0, Focus::Center).new, 10.0);
    assert_eq!(engine.set_zoom(0.25, Focus::Center).new, 1.0);
}

#[test]
fn test_non_finite_delta_is_ignored() {
    let mut engine = TransformEngine::new(10.0);
    engine.apply_zoom_delta(2.0, Focus::Center);
    let change = engine.apply_zoom_delta(f64::NAN, Focus::Center);
    assert!(!change.changed());
    assert_eq!(engine.zoom(), 3.0);
}

// ---------------------------------------------------------------------------
// Rest forces zero offset
// ---------------------------------------------------------------------------

#[test]
fn test_returning_to_rest_zeroes_offset() {
    let mut engine = TransformEngine::new(10.0);
    engine.apply_zoom_delta(3.0, Focus::Anchor(Vec2::new(80.0, 60.0)));
    assert_ne!(engine.offset(), Vec2::ZERO);

    let change = engine.apply_zoom_delta(-50.0, Focus::Anchor(Vec2::new(-120.0, 10.0)));
    assert!(change.at_rest());
    assert!(change.decreased());
    assert_eq!(engine.offset(), Vec2::ZERO);
}

#[test]
fn test_pan_at_rest_is_noop() {
    let mut engine = TransformEngine::new(10.0);
    let panned = engine.apply_pan_delta(Vec2::ZERO, Vec2::new(25.0, 25.0));
    assert!(!panned);
    assert_eq!(engine.offset(), Vec2::ZERO);
}

#[test]
fn test_pan_is_relative_to_base() {
    let mut engine = TransformEngine::new(10.0);
    engine.set_zoom(2.0, Focus::Center);
    let base = Vec2::new(10.0, 5.0);
    assert!(engine.apply_pan_delta(base, Vec2::new(3.0, -2.0)));
    assert_eq!(engine.offset(), Vec2::new(13.0, 3.0));
    // A second move replaces, not accumulates.
    engine.apply_pan_delta(base, Vec2::new(4.0, 4.0));
    assert_eq!(engine.offset(), Vec2::new(14.0, 9.0));
}

// ---------------------------------------------------------------------------
// Focus handling
// ---------------------------------------------------------------------------

#[test]
fn test_center_focus_leaves_offset_alone() {
    let mut engine = TransformEngine::new(10.0);
    engine.set_zoom(2.0, Focus::Center);
    engine.apply_pan_delta(Vec2::ZERO, Vec2::new(12.0, -8.0));
    engine.apply_zoom_delta(1.5, Focus::Center);
    assert_eq!(engine.offset(), Vec2::new(12.0, -8.0));
}

#[test]
fn test_anchor_compensation_formula() {
    let mut engine = TransformEngine::new(10.0);
    let anchor = Vec2::new(50.0, -20.0);
    engine.set_zoom(3.0, Focus::Anchor(anchor));
    // offset = 0 - anchor * (3 - 1)
    assert_relative_eq!(engine.offset().x, -100.0);
    assert_relative_eq!(engine.offset().y, 40.0);
}

#[test]
fn test_point_under_pointer_stays_fixed() {
    let mut engine = TransformEngine::new(10.0);
    let pointer = Point::new(330.0, 70.0);

    for step in [1.0, 0.5, 2.0, -1.25] {
        let anchor = engine.anchor_for(pointer, CONTAINER);
        let content = CONTAINER.center() + anchor;
        engine.apply_zoom_delta(step, Focus::Anchor(anchor));
        let on_screen = engine.transform(CONTAINER).to_affine() * content;
        assert_relative_eq!(on_screen.x, pointer.x, epsilon = 1e-9);
        assert_relative_eq!(on_screen.y, pointer.y, epsilon = 1e-9);
    }
}

#[test]
fn test_transform_css_and_origin() {
    let mut engine = TransformEngine::new(10.0);
    engine.set_zoom(2.0, Focus::Center);
    engine.apply_pan_delta(Vec2::ZERO, Vec2::new(5.0, -3.5));
    let transform = engine.transform(CONTAINER);
    assert_eq!(transform.origin, Point::new(200.0, 150.0));
    assert_eq!(transform.css(), "translate(5.00px, -3.50px) scale(2.0000)");
}

#[test]
fn test_transform_rect_scales_about_center() {
    let mut engine = TransformEngine::new(10.0);
    engine.set_zoom(2.0, Focus::Center);
    let on_screen = engine.transform(CONTAINER).apply_to_rect(CONTAINER);
    assert_relative_eq!(on_screen.x0, -200.0);
    assert_relative_eq!(on_screen.y0, -150.0);
    assert_relative_eq!(on_screen.x1, 600.0);
    assert_relative_eq!(on_screen.y1, 450.0);
}
