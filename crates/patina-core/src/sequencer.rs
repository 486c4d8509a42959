//! Hold-then-reset sequencing.
//!
//! ```text
//! Active --arm_hold--> Holding --hold elapsed--> Transitioning --elapsed--> Active (reset)
//!    ^                    |                           |
//!    +----- interrupt ----+------- interrupt ---------+ (forced reset)
//! ```
//!
//! Each non-active phase owns the token of the one timer it waits on, so a
//! hold timer and a transition timer can never be pending together.

use std::time::Duration;

use tracing::{info, warn};

use crate::scheduler::{Scheduler, TimerToken};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Active,
    /// Dwelling at rest with the worst wear on show.
    Holding { timer: TimerToken },
    /// The terminal effect is playing.
    Transitioning { timer: TimerToken },
}

impl Phase {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Holding { .. } => write!(f, "Holding"),
            Self::Transitioning { .. } => write!(f, "Transitioning"),
        }
    }
}

/// What an interrupt undid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interruption {
    None,
    HoldCancelled,
    /// The caller must apply the full reset before handling the input.
    TransitionAborted,
}

/// What a delivered timer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Not the timer the current phase waits on.
    Stale,
    TransitionStarted,
    /// The caller must apply the full reset.
    TransitionFinished,
}

#[derive(Clone, Debug)]
pub struct Sequencer {
    phase: Phase,
    hold_delay: Duration,
    transition: Duration,
}

impl Sequencer {
    pub fn new(hold_delay: Duration, transition: Duration) -> Self {
        Self {
            phase: Phase::Active,
            hold_delay,
            transition,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hold_delay(&self) -> Duration {
        self.hold_delay
    }

    pub fn transition_duration(&self) -> Duration {
        self.transition
    }

    /// Start the dwell. Only valid from `Active`; otherwise nothing happens.
    pub fn arm_hold(&mut self, scheduler: &mut impl Scheduler) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        let timer = scheduler.schedule(self.hold_delay);
        info!(%timer, delay = ?self.hold_delay, "Hold armed");
        self.phase = Phase::Holding { timer };
        true
    }

    /// Cancel whatever is pending. Live input always wins over timers.
    pub fn interrupt(&mut self, scheduler: &mut impl Scheduler) -> Interruption {
        match std::mem::take(&mut self.phase) {
            Phase::Active => Interruption::None,
            Phase::Holding { timer } => {
                scheduler.cancel(timer);
                info!(%timer, "Hold cancelled by input");
                Interruption::HoldCancelled
            }
            Phase::Transitioning { timer } => {
                scheduler.cancel(timer);
                info!(%timer, "Transition aborted by input");
                Interruption::TransitionAborted
            }
        }
    }

    pub fn on_timer(&mut self, token: TimerToken, scheduler: &mut impl Scheduler) -> TimerOutcome {
        match self.phase {
            Phase::Holding { timer } if timer == token => {
                let timer = scheduler.schedule(self.transition);
                info!(%timer, duration = ?self.transition, "Transition started");
                self.phase = Phase::Transitioning { timer };
                TimerOutcome::TransitionStarted
            }
            Phase::Transitioning { timer } if timer == token => {
                info!("Transition finished");
                self.phase = Phase::Active;
                TimerOutcome::TransitionFinished
            }
            _ => {
                warn!(%token, phase = %self.phase, "Ignoring stale timer");
                TimerOutcome::Stale
            }
        }
    }
}
