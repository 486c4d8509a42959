use patina_core::disclosure::DisclosureStager;
use patina_core::scheduler::TimerToken;
use patina_core::sequencer::Phase;

fn stager() -> DisclosureStager {
    DisclosureStager::new(vec![3.0, 6.0, 9.0])
}

#[test]
fn test_stage_counts_thresholds_reached() {
    let mut s = stager();
    s.recompute(2.9);
    assert_eq!(s.stage(), 0);
    s.recompute(4.0);
    assert_eq!(s.stage(), 1);
    s.recompute(9.0);
    assert_eq!(s.stage(), 3);
}

#[test]
fn test_stage_never_decreases_within_excursion() {
    let mut s = stager();
    let mut previous = 0;
    for zoom in [1.5, 6.5, 2.0, 1.0, 3.1, 9.5, 4.0, 1.0] {
        s.recompute(zoom);
        assert!(s.stage() >= previous, "stage dropped at zoom {zoom}");
        previous = s.stage();
    }
    assert_eq!(s.stage(), 3);
}

#[test]
fn test_reset_clears_stage() {
    let mut s = stager();
    s.recompute(7.0);
    assert!(!s.recompute(3.0));
    s.reset();
    assert_eq!(s.stage(), 0);
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[test]
fn test_rest_shows_only_rest_layer_despite_wear() {
    let mut s = stager();
    s.recompute(8.0);
    let v = s.visibility(1.0, &Phase::Active);
    assert!(v.rest);
    assert_eq!(v.decay, vec![false, false, false]);
    assert!(!v.effect);
}

#[test]
fn test_zoomed_shows_revealed_layers() {
    let mut s = stager();
    s.recompute(6.0);
    let v = s.visibility(2.0, &Phase::Active);
    assert!(!v.rest);
    assert_eq!(v.decay, vec![true, true, false]);
    assert_eq!(v.worst_visible(), Some(1));
}

#[test]
fn test_zoomed_below_first_threshold_keeps_rest_layer() {
    let mut s = stager();
    s.recompute(2.0);
    let v = s.visibility(2.0, &Phase::Active);
    assert!(v.rest);
    assert_eq!(v.visible_decay(), 0);
}

#[test]
fn test_holding_forces_worst_layer() {
    let s = stager();
    let v = s.visibility(
        1.0,
        &Phase::Holding {
            timer: TimerToken::from_raw(1),
        },
    );
    assert!(!v.rest);
    assert_eq!(v.decay, vec![false, false, true]);
    assert!(!v.effect);
}

#[test]
fn test_transition_shows_effect_surface() {
    let s = stager();
    let v = s.visibility(
        1.0,
        &Phase::Transitioning {
            timer: TimerToken::from_raw(2),
        },
    );
    assert!(v.effect);
    assert_eq!(v.worst_visible(), Some(2));
    assert_eq!(v.to_string(), "rest . decay [. . x] effect x");
}
