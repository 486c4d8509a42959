mod common;

use patina_core::scheduler::{Scheduler, TimerQueue};
use patina_core::sequencer::{Interruption, Phase, Sequencer, TimerOutcome};

use common::ms;

fn sequencer() -> Sequencer {
    Sequencer::new(ms(2000), ms(500))
}

// ---------------------------------------------------------------------------
// TimerQueue
// ---------------------------------------------------------------------------

#[test]
fn test_queue_fires_in_deadline_order() {
    let mut queue = TimerQueue::new();
    let late = queue.schedule(ms(300));
    let early = queue.schedule(ms(100));
    assert_eq!(queue.next_deadline(), Some(ms(100)));

    assert_eq!(queue.pop_due(ms(50)), None);
    assert_eq!(queue.pop_due(ms(400)), Some(early));
    assert_eq!(queue.now(), ms(100));
    assert_eq!(queue.pop_due(ms(400)), Some(late));
    assert_eq!(queue.pop_due(ms(400)), None);
    assert_eq!(queue.now(), ms(400));
}

#[test]
fn test_cancelled_timer_never_fires() {
    let mut queue = TimerQueue::new();
    let token = queue.schedule(ms(10));
    queue.cancel(token);
    assert!(!queue.is_pending(token));
    assert_eq!(queue.pop_due(ms(1000)), None);
}

#[test]
fn test_clock_never_moves_backwards() {
    let mut queue = TimerQueue::new();
    queue.pop_due(ms(500));
    queue.pop_due(ms(100));
    assert_eq!(queue.now(), ms(500));
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

#[test]
fn test_full_sequence() {
    let mut queue = TimerQueue::new();
    let mut seq = sequencer();

    assert!(seq.arm_hold(&mut queue));
    let Phase::Holding { timer: hold } = seq.phase() else {
        panic!("expected Holding, got {:?}", seq.phase());
    };
    assert_eq!(queue.pending(), 1);

    let fired = queue.pop_due(ms(2000)).unwrap();
    assert_eq!(fired, hold);
    assert_eq!(seq.on_timer(fired, &mut queue), TimerOutcome::TransitionStarted);
    assert!(matches!(seq.phase(), Phase::Transitioning { .. }));
    assert_eq!(queue.pending(), 1, "only the transition timer is pending");

    let fired = queue.pop_due(ms(2500)).unwrap();
    assert_eq!(seq.on_timer(fired, &mut queue), TimerOutcome::TransitionFinished);
    assert_eq!(seq.phase(), Phase::Active);
    assert_eq!(queue.pending(), 0);
}

#[test]
fn test_arm_hold_only_from_active() {
    let mut queue = TimerQueue::new();
    let mut seq = sequencer();
    assert!(seq.arm_hold(&mut queue));
    assert!(!seq.arm_hold(&mut queue));
    assert_eq!(queue.pending(), 1);
}

#[test]
fn test_interrupt_hold() {
    let mut queue = TimerQueue::new();
    let mut seq = sequencer();
    seq.arm_hold(&mut queue);
    assert_eq!(seq.interrupt(&mut queue), Interruption::HoldCancelled);
    assert_eq!(seq.phase(), Phase::Active);
    assert_eq!(queue.pending(), 0);
}

#[test]
fn test_interrupt_transition() {
    let mut queue = TimerQueue::new();
    let mut seq = sequencer();
    seq.arm_hold(&mut queue);
    let hold = queue.pop_due(ms(2000)).unwrap();
    seq.on_timer(hold, &mut queue);

    assert_eq!(seq.interrupt(&mut queue), Interruption::TransitionAborted);
    assert_eq!(seq.phase(), Phase::Active);
    assert_eq!(queue.pop_due(ms(10_000)), None);
}

#[test]
fn test_interrupt_when_active_is_noop() {
    let mut queue = TimerQueue::new();
    let mut seq = sequencer();
    assert_eq!(seq.interrupt(&mut queue), Interruption::None);
}

#[test]
fn test_stale_token_is_ignored() {
    let mut queue = TimerQueue::new();
    let mut seq = sequencer();
    seq.arm_hold(&mut queue);
    let Phase::Holding { timer: old } = seq.phase() else {
        panic!("expected Holding");
    };
    seq.interrupt(&mut queue);
    seq.arm_hold(&mut queue);

    assert_eq!(seq.on_timer(old, &mut queue), TimerOutcome::Stale);
    assert!(matches!(seq.phase(), Phase::Holding { timer } if timer != old));
}
