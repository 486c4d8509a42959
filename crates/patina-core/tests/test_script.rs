mod common;

use approx::assert_relative_eq;
use kurbo::Vec2;

use patina_core::arbiter::GestureMode;
use patina_core::script::Script;
use patina_core::sequencer::Phase;
use patina_core::PatinaError;

use common::unit_wheel_config;

const EXCURSION: &str = r#"
container = [0.0, 0.0, 400.0, 300.0]

[[step]]
at_ms = 0
input = { type = "wheel", delta_y = -8.0, x = 200.0, y = 150.0 }

[[step]]
at_ms = 100
input = { type = "pointer", kind = "down", x = 100.0, y = 100.0 }

[[step]]
at_ms = 150
input = { type = "pointer", kind = "move", x = 140.0, y = 90.0 }

[[step]]
at_ms = 200
input = { type = "pointer", kind = "up", x = 140.0, y = 90.0 }

[[step]]
at_ms = 300
input = { type = "touch", phase = "start", touches = [[150.0, 150.0], [250.0, 150.0]] }

[[step]]
at_ms = 350
input = { type = "touch", phase = "move", touches = [[190.0, 150.0], [200.0, 150.0]] }

[[step]]
at_ms = 400
input = { type = "touch", phase = "end" }

[[step]]
at_ms = 2400

[[step]]
at_ms = 2900
"#;

#[test]
fn test_replay_walks_the_full_sequence() {
    let script = Script::from_toml_str(EXCURSION).unwrap();
    let mut controller = common::controller_with(&unit_wheel_config());
    let snapshots = script.run(&mut controller).unwrap();
    assert_eq!(snapshots.len(), 9);

    assert_relative_eq!(snapshots[0].zoom, 9.0);
    assert_eq!(snapshots[0].stage, 3);

    assert_eq!(snapshots[1].mode, GestureMode::MouseDrag);
    assert_eq!(snapshots[2].offset, Vec2::new(40.0, -10.0));
    assert_eq!(snapshots[3].mode, GestureMode::Idle);

    assert_eq!(snapshots[4].mode, GestureMode::Pinch);
    // Fingers 100px apart squeezed to 10px: clamps at rest.
    assert_eq!(snapshots[5].zoom, 1.0);
    assert_eq!(snapshots[5].offset, Vec2::ZERO);
    assert!(matches!(snapshots[5].phase, Phase::Holding { .. }));

    assert!(matches!(snapshots[6].phase, Phase::Holding { .. }));
    assert!(matches!(snapshots[7].phase, Phase::Transitioning { .. }));
    assert!(snapshots[7].layers.effect);

    assert_eq!(snapshots[8].phase, Phase::Active);
    assert_eq!(snapshots[8].stage, 0);
    assert!(snapshots[8].layers.rest);
}

#[test]
fn test_snapshot_display_is_one_line() {
    let script = Script::from_toml_str(EXCURSION).unwrap();
    let mut controller = common::controller_with(&unit_wheel_config());
    let snapshots = script.run(&mut controller).unwrap();
    let line = snapshots[7].to_string();
    assert!(!line.contains('\n'));
    assert!(line.contains("Transitioning"), "got: {line}");
    assert!(line.contains("effect x"), "got: {line}");
}

#[test]
fn test_out_of_order_steps_are_rejected() {
    let err = Script::from_toml_str(
        r#"
        [[step]]
        at_ms = 500

        [[step]]
        at_ms = 200
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, PatinaError::Script(_)));
}

#[test]
fn test_zero_area_container_is_rejected() {
    let err = Script::from_toml_str("container = [10.0, 10.0, 10.0, 50.0]\n").unwrap_err();
    assert!(matches!(err, PatinaError::Script(_)));
}

#[test]
fn test_unknown_input_type_is_a_parse_error() {
    let err = Script::from_toml_str(
        r#"
        [[step]]
        at_ms = 0
        input = { type = "keyboard", key = "z" }
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, PatinaError::Toml(_)));
}
