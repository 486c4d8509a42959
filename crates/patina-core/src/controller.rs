use std::time::Duration;

use kurbo::{Rect, Vec2};
use tracing::{debug, info};

use crate::arbiter::{Gesture, GestureMode, InputArbiter, InputClass, Outcome};
use crate::config::ViewerConfig;
use crate::disclosure::DisclosureStager;
use crate::error::{PatinaError, Result};
use crate::frame::RenderFrame;
use crate::input::{Input, PointerInput, TouchInput, WheelInput};
use crate::scheduler::{Scheduler, TimerQueue, TimerToken};
use crate::sequencer::{Interruption, Phase, Sequencer, TimerOutcome};
use crate::transform::TransformEngine;

/// The single owner of all interaction state.
///
/// Every handler runs to completion: sequencing conflicts are resolved
/// before the input touches the transform, and the transform is settled
/// before the disclosure stage and the sequencer look at it.
#[derive(Debug)]
pub struct Controller<S: Scheduler> {
    engine: TransformEngine,
    stager: DisclosureStager,
    sequencer: Sequencer,
    arbiter: InputArbiter,
    scheduler: S,
    container: Rect,
    /// Zoom has left rest since the last reset.
    excursion: bool,
    generation: u64,
}

impl<S: Scheduler> Controller<S> {
    /// Build a controller for `decay_layers` decay layers, one per threshold.
    pub fn new(config: &ViewerConfig, decay_layers: usize, scheduler: S) -> Result<Self> {
        config.validate()?;
        let thresholds = config.zoom.thresholds.clone();
        if thresholds.len() != decay_layers {
            return Err(PatinaError::LayerCountMismatch {
                thresholds: thresholds.len(),
                layers: decay_layers,
            });
        }

        Ok(Self {
            engine: TransformEngine::new(config.zoom.max_zoom),
            stager: DisclosureStager::new(thresholds),
            sequencer: Sequencer::new(
                config.timing.hold_delay(),
                config.timing.transition_duration(),
            ),
            arbiter: InputArbiter::new(config.input.clone()),
            scheduler,
            container: Rect::ZERO,
            excursion: false,
            generation: 0,
        })
    }

    /// Untransformed layout rect of the image container, in device pixels.
    pub fn set_container(&mut self, rect: Rect) {
        if self.container != rect {
            self.container = rect;
            self.generation += 1;
        }
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn zoom(&self) -> f64 {
        self.engine.zoom()
    }

    pub fn offset(&self) -> Vec2 {
        self.engine.offset()
    }

    pub fn stage(&self) -> usize {
        self.stager.stage()
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    pub fn gesture(&self) -> &Gesture {
        self.arbiter.gesture()
    }

    pub fn gesture_mode(&self) -> GestureMode {
        self.arbiter.mode()
    }

    /// Bumped on every change that needs a re-render.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            transform: self.engine.transform(self.container),
            layers: self
                .stager
                .visibility(self.engine.zoom(), &self.sequencer.phase()),
        }
    }

    pub fn on_wheel(&mut self, wheel: WheelInput) {
        self.handle(&Input::Wheel(wheel));
    }

    pub fn on_pointer(&mut self, pointer: PointerInput) {
        self.handle(&Input::Pointer(pointer));
    }

    pub fn on_touch(&mut self, touch: TouchInput) {
        self.handle(&Input::Touch(touch));
    }

    pub fn handle(&mut self, input: &Input) {
        if !input.is_finite() {
            debug!(?input, "Dropping input with non-finite coordinates");
            return;
        }

        let class = self.arbiter.classify(input, self.engine.is_at_rest());
        if class == InputClass::Ignored {
            return;
        }

        if class == InputClass::Update {
            match self.sequencer.interrupt(&mut self.scheduler) {
                Interruption::None => {}
                Interruption::HoldCancelled => self.generation += 1,
                Interruption::TransitionAborted => self.reset(),
            }
        }

        let outcome = self.arbiter.apply(input, &mut self.engine, self.container);
        self.settle(outcome);
    }

    /// Deliver an elapsed timer.
    pub fn on_timer(&mut self, token: TimerToken) {
        match self.sequencer.on_timer(token, &mut self.scheduler) {
            TimerOutcome::Stale => {}
            TimerOutcome::TransitionStarted => self.generation += 1,
            TimerOutcome::TransitionFinished => self.reset(),
        }
    }

    fn settle(&mut self, outcome: Outcome) {
        if outcome.panned {
            self.generation += 1;
        }

        if let Some(change) = outcome.zoom {
            if change.changed() {
                self.generation += 1;
            }
            if !change.at_rest() {
                self.excursion = true;
            }
            if self.sequencer.phase().is_active() && self.stager.recompute(change.new) {
                debug!(stage = self.stager.stage(), zoom = change.new, "Reveal stage raised");
            }
            if change.decreased() && change.at_rest() {
                self.arm_hold();
            }
        }

        if outcome.ended && self.engine.is_at_rest() {
            self.arm_hold();
        }
    }

    fn arm_hold(&mut self) {
        if self.excursion && self.sequencer.arm_hold(&mut self.scheduler) {
            self.generation += 1;
        }
    }

    /// Back to the start-up state: rest zoom, no offset, no wear.
    fn reset(&mut self) {
        info!(stage = self.stager.stage(), "Resetting to rest");
        self.engine.reset();
        self.stager.reset();
        self.excursion = false;
        self.generation += 1;
    }
}

impl Controller<TimerQueue> {
    /// Move virtual time to `now`, firing every timer that falls due in
    /// deadline order. Returns how many fired.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(token) = self.scheduler.pop_due(now) {
            self.on_timer(token);
            fired += 1;
        }
        fired
    }

    pub fn advance_by(&mut self, delta: Duration) -> usize {
        let now = self.scheduler.now() + delta;
        self.advance_to(now)
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}
