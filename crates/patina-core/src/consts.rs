/// Zoom level at rest. Pan has no meaning here and is always zero.
pub const REST_ZOOM: f64 = 1.0;

/// Default maximum zoom factor.
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;

/// Default zoom thresholds that unlock each decay layer, ascending.
pub const DEFAULT_THRESHOLDS: [f64; 3] = [3.0, 6.0, 9.0];

/// Default dwell at rest before the transition effect fires.
pub const DEFAULT_HOLD_DELAY_MS: u64 = 2000;

/// Default duration of the transition effect.
pub const DEFAULT_TRANSITION_MS: u64 = 500;

/// Zoom delta per unit of wheel scroll (applied to the negated delta).
pub const DEFAULT_WHEEL_ZOOM_SCALE: f64 = 0.005;

/// Zoom delta per pixel of vertical single-finger movement.
pub const DEFAULT_TOUCH_ZOOM_SCALE: f64 = 0.01;

/// Multiplier on the pinch distance ratio. 1.0 tracks the fingers exactly.
pub const DEFAULT_PINCH_SENSITIVITY: f64 = 1.0;

/// Reference pinch distances below this (in pixels) are degenerate and
/// produce no zoom change for that tick.
pub const MIN_PINCH_DISTANCE: f64 = 1.0;

/// Tolerance for treating a clamped zoom as exactly at rest.
pub const ZOOM_EPSILON: f64 = 1e-9;
