use std::time::Duration;

/// Handle for one scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Token from a raw id, for hosts that keep their own timer table.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TimerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// "Run after a duration, cancellable" primitive.
///
/// When a scheduled timer elapses, the host hands its token back to the
/// controller. After `cancel` returns the token must never be delivered.
pub trait Scheduler {
    fn schedule(&mut self, after: Duration) -> TimerToken;
    fn cancel(&mut self, token: TimerToken);
}

/// Deadline queue on a caller-supplied clock.
///
/// Time only moves when the caller says so, which makes it suitable both for
/// virtual-time replay and for a frame loop that passes `Instant::elapsed`.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<(Duration, TimerToken)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|&(_, t)| t == token)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|&(at, _)| at).min()
    }

    /// Remove the earliest timer due at or before `now`, moving the clock to
    /// its deadline. With nothing due the clock moves to `now` (never
    /// backwards).
    ///
    /// Call repeatedly until it returns `None`: a callback may schedule a new
    /// timer that is itself already due.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerToken> {
        let target = self.now.max(now);
        let due = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (at, _))| *at <= target)
            .min_by_key(|(_, (at, token))| (*at, *token))
            .map(|(index, _)| index);

        match due {
            Some(index) => {
                let (at, token) = self.pending.remove(index);
                // Timers scheduled from this token's handler count from its deadline.
                self.now = self.now.max(at);
                Some(token)
            }
            None => {
                self.now = target;
                None
            }
        }
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, after: Duration) -> TimerToken {
        self.next_id += 1;
        let token = TimerToken(self.next_id);
        self.pending.push((self.now + after, token));
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|&(_, t)| t != token);
    }
}
