// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot autoplay sessions.
//!
//! A session owns one demo's simulation state and drives it through
//! `Idle → Running → {Cancelled | Completed}`. The run is started at most once (by the
//! demo's visibility gate) and ticks on a fixed cadence until the demo's stop predicate
//! holds or the user takes over.
//!
//! Terminal states are sticky: whichever of cancellation and natural completion lands
//! first wins, and the other is dropped. A session holds at most one pending timer; a
//! delivered handle that is not the current one is stale and ignored, which is what makes
//! cancellation win against a tick that was already in flight.

use core::fmt;
use core::time::Duration;

use crate::scheduler::{Scheduler, TimerHandle};

/// Token scheduled by a session for each of its ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tick;

/// Lifecycle of a session's one-shot autoplay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoplayState {
    /// Not yet started.
    #[default]
    Idle,
    /// Ticking.
    Running,
    /// Stopped by user interaction. Terminal.
    Cancelled,
    /// Stopped by the stop predicate. Terminal.
    Completed,
}

impl AutoplayState {
    /// Returns `true` for `Cancelled` and `Completed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

/// The demo-specific half of a session.
///
/// The session supplies the control flow; a model only says where to start, how to take one
/// step and when to stop.
pub trait Model {
    /// Simulation snapshot, exclusively owned by the session.
    type State;

    /// Starting state.
    fn initial(&self) -> Self::State;

    /// State to restore on reset.
    ///
    /// Defaults to [`Model::initial`]. Demos override this to carry user settings (such as a
    /// learning rate picked on a slider) across resets.
    fn reset_state(&self, current: &Self::State) -> Self::State {
        let _ = current;
        self.initial()
    }

    /// Applies one update.
    fn step(&self, state: &mut Self::State);

    /// Stop predicate, evaluated after every tick. `step_index` counts steps since reset.
    fn is_finished(&self, state: &Self::State, step_index: usize) -> bool;

    /// Stop predicate for continuous playback. `steps` counts ticks since playback started.
    ///
    /// Defaults to [`Model::is_finished`]. Demos whose autoplay stops on a step budget
    /// override this so playback keeps going after the one-shot run has spent it.
    fn playback_finished(&self, state: &Self::State, steps: usize) -> bool {
        self.is_finished(state, steps)
    }

    /// Jumps the state to the value encoded by a slider position.
    fn apply_slider(&self, state: &mut Self::State, value: f64) {
        let _ = (state, value);
    }

    /// Delay between ticks.
    fn tick_interval(&self) -> Duration;
}

/// Receives every state change of a session.
///
/// Adapters must render from state (idempotent for a given state), never from deltas.
pub trait RenderAdapter<S: ?Sized> {
    /// Draws `state`.
    fn render(&mut self, state: &S);
}

impl<S: ?Sized, F: FnMut(&S)> RenderAdapter<S> for F {
    fn render(&mut self, state: &S) {
        self(state);
    }
}

/// A session that cannot be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WiringError {
    /// No render adapter was supplied.
    MissingRenderer,
}

impl fmt::Display for WiringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRenderer => f.write_str("autoplay session has no render adapter"),
        }
    }
}

impl core::error::Error for WiringError {}

/// What a delivered timer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Took a step and scheduled the next tick.
    Stepped,
    /// Took a step, hit the stop predicate and ended the autoplay run.
    Completed,
    /// Took a step, hit [`Model::playback_finished`] and ended continuous playback.
    PlaybackStopped,
    /// Not the session's pending timer; nothing happened.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Driver {
    Autoplay,
    Playback,
}

/// Builder for [`AutoplaySession`].
#[derive(Debug)]
pub struct AutoplayBuilder<M, R> {
    label: &'static str,
    model: M,
    renderer: Option<R>,
}

impl<M: Model, R: RenderAdapter<M::State>> AutoplayBuilder<M, R> {
    /// Names the session in log output.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Sets the render adapter.
    pub fn renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Builds the session and renders its initial state.
    pub fn build(self) -> Result<AutoplaySession<M, R>, WiringError> {
        let mut renderer = self.renderer.ok_or(WiringError::MissingRenderer)?;
        let sim = self.model.initial();
        renderer.render(&sim);
        Ok(AutoplaySession {
            label: self.label,
            model: self.model,
            renderer,
            state: AutoplayState::Idle,
            sim,
            step_index: 0,
            pending: None,
            playback_steps: 0,
        })
    }
}

/// One demo's simulation plus its one-shot autoplay lifecycle.
#[derive(Debug)]
pub struct AutoplaySession<M: Model, R> {
    label: &'static str,
    model: M,
    renderer: R,
    state: AutoplayState,
    sim: M::State,
    step_index: usize,
    pending: Option<(TimerHandle, Driver)>,
    playback_steps: usize,
}

impl<M: Model, R: RenderAdapter<M::State>> AutoplaySession<M, R> {
    /// Starts building a session for `model`.
    pub fn builder(model: M) -> AutoplayBuilder<M, R> {
        AutoplayBuilder {
            label: "autoplay",
            model,
            renderer: None,
        }
    }

    /// Lifecycle state.
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// Steps taken since the last reset.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Current simulation state.
    pub fn sim(&self) -> &M::State {
        &self.sim
    }

    /// The demo model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The render adapter.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Whether continuous playback is ticking.
    pub fn is_playing(&self) -> bool {
        matches!(self.pending, Some((_, Driver::Playback)))
    }

    /// Applies one update and renders. Safe in any lifecycle state.
    pub fn step(&mut self) {
        self.model.step(&mut self.sim);
        self.step_index += 1;
        self.renderer.render(&self.sim);
    }

    /// Restores the starting state and renders.
    ///
    /// Any pending tick is canceled. A running autoplay becomes `Cancelled`; `Idle` and
    /// terminal states are left alone, so a reset never re-arms the one-shot run.
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler<Tick>) {
        self.clear_pending(scheduler);
        self.finish(AutoplayState::Cancelled);
        self.sim = self.model.reset_state(&self.sim);
        self.step_index = 0;
        self.renderer.render(&self.sim);
    }

    /// Starts the one-shot autoplay run.
    ///
    /// Returns `false` (and does nothing) unless the session is `Idle`.
    pub fn run_once(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool {
        if self.state != AutoplayState::Idle {
            return false;
        }
        self.clear_pending(scheduler);
        self.state = AutoplayState::Running;
        log::debug!("{}: autoplay started", self.label);
        self.schedule(scheduler, Driver::Autoplay);
        true
    }

    /// Cancels a running autoplay. Idempotent; returns `true` if this call cancelled it.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool {
        if self.state != AutoplayState::Running {
            return false;
        }
        if let Some((handle, Driver::Autoplay)) = self.pending {
            scheduler.cancel(handle);
            self.pending = None;
        }
        self.finish(AutoplayState::Cancelled)
    }

    /// Applies a slider position and renders.
    pub fn set_slider(&mut self, value: f64) {
        self.model.apply_slider(&mut self.sim, value);
        self.renderer.render(&self.sim);
    }

    /// Starts or stops continuous playback; returns whether playback is now ticking.
    ///
    /// Playback shares the session's single timer slot. It stops on
    /// [`Model::playback_finished`], counting its own ticks. Starting playback while the
    /// autoplay is running cancels the autoplay.
    pub fn toggle_playback(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool {
        self.finish(AutoplayState::Cancelled);
        if self.is_playing() {
            self.clear_pending(scheduler);
            log::debug!("{}: playback stopped", self.label);
            return false;
        }
        self.clear_pending(scheduler);
        self.playback_steps = 0;
        self.schedule(scheduler, Driver::Playback);
        log::debug!("{}: playback started", self.label);
        true
    }

    /// Delivers a fired timer.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        scheduler: &mut dyn Scheduler<Tick>,
    ) -> TickOutcome {
        let driver = match self.pending {
            Some((pending, driver)) if pending == handle => driver,
            _ => return TickOutcome::Stale,
        };
        self.pending = None;
        if driver == Driver::Autoplay && self.state != AutoplayState::Running {
            return TickOutcome::Stale;
        }

        self.step();
        log::trace!("{}: tick {}", self.label, self.step_index);
        match driver {
            Driver::Autoplay => {
                if self.model.is_finished(&self.sim, self.step_index) {
                    self.finish(AutoplayState::Completed);
                    return TickOutcome::Completed;
                }
            }
            Driver::Playback => {
                self.playback_steps += 1;
                if self.model.playback_finished(&self.sim, self.playback_steps) {
                    log::debug!("{}: playback reached its stop condition", self.label);
                    return TickOutcome::PlaybackStopped;
                }
            }
        }
        self.schedule(scheduler, driver);
        TickOutcome::Stepped
    }

    fn schedule(&mut self, scheduler: &mut dyn Scheduler<Tick>, driver: Driver) {
        let handle = scheduler.after(self.model.tick_interval(), Tick);
        self.pending = Some((handle, driver));
    }

    fn clear_pending(&mut self, scheduler: &mut dyn Scheduler<Tick>) {
        if let Some((handle, _)) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }

    /// Moves `Running` to a terminal state; a no-op from any other state.
    fn finish(&mut self, to: AutoplayState) -> bool {
        if self.state != AutoplayState::Running {
            return false;
        }
        self.state = to;
        log::debug!("{}: autoplay {:?} after {} steps", self.label, to, self.step_index);
        true
    }
}

/// Object-safe view of a session, for hosts holding heterogeneous demos.
pub trait Autoplay {
    /// Lifecycle state.
    fn state(&self) -> AutoplayState;
    /// Steps taken since the last reset.
    fn step_index(&self) -> usize;
    /// Whether continuous playback is ticking.
    fn is_playing(&self) -> bool;
    /// See [`AutoplaySession::step`].
    fn step(&mut self);
    /// See [`AutoplaySession::reset`].
    fn reset(&mut self, scheduler: &mut dyn Scheduler<Tick>);
    /// See [`AutoplaySession::run_once`].
    fn run_once(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool;
    /// See [`AutoplaySession::cancel`].
    fn cancel(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool;
    /// See [`AutoplaySession::set_slider`].
    fn set_slider(&mut self, value: f64);
    /// See [`AutoplaySession::toggle_playback`].
    fn toggle_playback(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool;
    /// See [`AutoplaySession::on_timer`].
    fn on_timer(&mut self, handle: TimerHandle, scheduler: &mut dyn Scheduler<Tick>)
    -> TickOutcome;
}

impl<M: Model, R: RenderAdapter<M::State>> Autoplay for AutoplaySession<M, R> {
    fn state(&self) -> AutoplayState {
        Self::state(self)
    }

    fn step_index(&self) -> usize {
        Self::step_index(self)
    }

    fn is_playing(&self) -> bool {
        Self::is_playing(self)
    }

    fn step(&mut self) {
        Self::step(self);
    }

    fn reset(&mut self, scheduler: &mut dyn Scheduler<Tick>) {
        Self::reset(self, scheduler);
    }

    fn run_once(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool {
        Self::run_once(self, scheduler)
    }

    fn cancel(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool {
        Self::cancel(self, scheduler)
    }

    fn set_slider(&mut self, value: f64) {
        Self::set_slider(self, value);
    }

    fn toggle_playback(&mut self, scheduler: &mut dyn Scheduler<Tick>) -> bool {
        Self::toggle_playback(self, scheduler)
    }

    fn on_timer(
        &mut self,
        handle: TimerHandle,
        scheduler: &mut dyn Scheduler<Tick>,
    ) -> TickOutcome {
        Self::on_timer(self, handle, scheduler)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::scheduler::ManualScheduler;

    /// Counts up by one; stops at `limit`.
    struct Counter {
        limit: u32,
    }

    impl Model for Counter {
        type State = u32;

        fn initial(&self) -> u32 {
            0
        }

        fn step(&self, state: &mut u32) {
            *state += 1;
        }

        fn is_finished(&self, state: &u32, _step_index: usize) -> bool {
            *state >= self.limit
        }

        fn apply_slider(&self, state: &mut u32, value: f64) {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "test slider values are small integers"
            )]
            {
                *state = value as u32;
            }
        }

        fn tick_interval(&self) -> Duration {
            Duration::from_millis(100)
        }
    }

    type Renders = Rc<RefCell<Vec<u32>>>;

    fn session(limit: u32) -> (AutoplaySession<Counter, impl FnMut(&u32)>, Renders) {
        let renders: Renders = Rc::default();
        let sink = renders.clone();
        let s = AutoplaySession::builder(Counter { limit })
            .renderer(move |v: &u32| sink.borrow_mut().push(*v))
            .build()
            .unwrap();
        (s, renders)
    }

    fn run(
        s: &mut AutoplaySession<Counter, impl FnMut(&u32)>,
        sched: &mut ManualScheduler<Tick>,
        until_ms: u64,
    ) {
        let deadline = Duration::from_millis(until_ms);
        while let Some(f) = sched.pop_due(deadline) {
            s.on_timer(f.handle, sched);
        }
        sched.advance_to(deadline);
    }

    #[test]
    fn missing_renderer_is_a_wiring_error() {
        let r = AutoplaySession::<Counter, fn(&u32)>::builder(Counter { limit: 3 }).build();
        assert_eq!(r.err(), Some(WiringError::MissingRenderer));
    }

    #[test]
    fn build_renders_the_initial_state() {
        let (_s, renders) = session(3);
        assert_eq!(*renders.borrow(), [0]);
    }

    #[test]
    fn autoplay_runs_to_completion_once() {
        let (mut s, renders) = session(3);
        let mut sched = ManualScheduler::new();
        assert!(s.run_once(&mut sched), "idle session starts");
        assert!(!s.run_once(&mut sched), "a running session does not restart");
        assert_eq!(sched.pending(), 1, "one timer drives the session");

        run(&mut s, &mut sched, 1_000);
        assert_eq!(s.state(), AutoplayState::Completed);
        assert_eq!(*s.sim(), 3);
        assert_eq!(*renders.borrow(), [0, 1, 2, 3]);
        assert_eq!(sched.pending(), 0, "no tick after completion");
        assert!(!s.run_once(&mut sched), "completed is terminal");
    }

    #[test]
    fn ticks_follow_the_interval() {
        let (mut s, _) = session(10);
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        run(&mut s, &mut sched, 99);
        assert_eq!(s.step_index(), 0, "first tick is due at 100ms");
        run(&mut s, &mut sched, 350);
        assert_eq!(s.step_index(), 3);
    }

    #[test]
    fn cancel_between_ticks_prevents_the_next_tick() {
        let (mut s, _) = session(10);
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        run(&mut s, &mut sched, 250);
        assert_eq!(s.step_index(), 2);

        assert!(s.cancel(&mut sched), "running session cancels");
        assert!(!s.cancel(&mut sched), "cancel is idempotent");
        run(&mut s, &mut sched, 10_000);
        assert_eq!(s.step_index(), 2, "tick 3 never ran");
        assert_eq!(s.state(), AutoplayState::Cancelled);
    }

    #[test]
    fn a_tick_already_in_flight_is_dropped_after_cancel() {
        let (mut s, _) = session(10);
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        // The host has already popped the tick when the cancel lands.
        let fired = sched.pop_due(Duration::from_millis(100)).unwrap();
        s.cancel(&mut sched);
        assert_eq!(s.on_timer(fired.handle, &mut sched), TickOutcome::Stale);
        assert_eq!(s.step_index(), 0);
    }

    #[test]
    fn completion_wins_over_a_late_cancel() {
        let (mut s, _) = session(1);
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        run(&mut s, &mut sched, 100);
        assert_eq!(s.state(), AutoplayState::Completed);
        assert!(!s.cancel(&mut sched), "late cancel is dropped");
        assert_eq!(s.state(), AutoplayState::Completed);
    }

    #[test]
    fn terminal_states_survive_steps_resets_and_sliders() {
        let (mut s, _) = session(10);
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        s.cancel(&mut sched);
        s.step();
        s.set_slider(4.0);
        s.reset(&mut sched);
        s.toggle_playback(&mut sched);
        run(&mut s, &mut sched, 10_000);
        assert_eq!(s.state(), AutoplayState::Cancelled);
        assert!(!s.run_once(&mut sched), "never re-armed");
    }

    #[test]
    fn reset_while_running_cancels() {
        let (mut s, _) = session(10);
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        run(&mut s, &mut sched, 200);
        s.reset(&mut sched);
        assert_eq!(s.state(), AutoplayState::Cancelled);
        assert_eq!(sched.pending(), 0, "pending tick canceled");
        assert_eq!((*s.sim(), s.step_index()), (0, 0));
    }

    #[test]
    fn reset_is_idempotent_and_keeps_idle() {
        let (mut s, _) = session(10);
        let mut sched = ManualScheduler::new();
        s.step();
        s.step();
        s.reset(&mut sched);
        let once = (*s.sim(), s.step_index(), s.state());
        s.reset(&mut sched);
        assert_eq!(once, (*s.sim(), s.step_index(), s.state()));
        assert_eq!(s.state(), AutoplayState::Idle, "reset does not consume the run");
    }

    #[test]
    fn playback_ticks_until_the_stop_predicate() {
        let (mut s, _) = session(4);
        let mut sched = ManualScheduler::new();
        assert!(s.toggle_playback(&mut sched), "playback starts");
        run(&mut s, &mut sched, 1_000);
        assert_eq!(*s.sim(), 4);
        assert!(!s.is_playing(), "stopped at the predicate");
        assert_eq!(s.state(), AutoplayState::Idle, "playback leaves the lifecycle alone");
    }

    #[test]
    fn playback_toggle_stops_ticking() {
        let (mut s, _) = session(100);
        let mut sched = ManualScheduler::new();
        s.toggle_playback(&mut sched);
        run(&mut s, &mut sched, 250);
        assert!(!s.toggle_playback(&mut sched), "second toggle stops");
        run(&mut s, &mut sched, 1_000);
        assert_eq!(s.step_index(), 2);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn playback_while_running_cancels_the_autoplay() {
        let (mut s, _) = session(100);
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        run(&mut s, &mut sched, 150);
        assert!(s.toggle_playback(&mut sched), "playback takes over");
        assert_eq!(s.state(), AutoplayState::Cancelled);
        assert!(!s.toggle_playback(&mut sched), "second toggle stops");
        run(&mut s, &mut sched, 10_000);
        assert_eq!(s.step_index(), 1, "no autoplay tick survives");
        assert_eq!(sched.pending(), 0);
        assert!(!s.run_once(&mut sched), "cancelled is terminal");
    }

    /// Stops autoplay after `budget` steps; playback runs until the state reaches `limit`.
    struct Budgeted {
        budget: usize,
        limit: u32,
    }

    impl Model for Budgeted {
        type State = u32;

        fn initial(&self) -> u32 {
            0
        }

        fn step(&self, state: &mut u32) {
            *state += 1;
        }

        fn is_finished(&self, state: &u32, step_index: usize) -> bool {
            *state >= self.limit || step_index >= self.budget
        }

        fn playback_finished(&self, state: &u32, _steps: usize) -> bool {
            *state >= self.limit
        }

        fn tick_interval(&self) -> Duration {
            Duration::from_millis(100)
        }
    }

    #[test]
    fn playback_after_a_completed_run_uses_its_own_stop_check() {
        let mut s = AutoplaySession::builder(Budgeted { budget: 3, limit: 10 })
            .renderer(|_: &u32| {})
            .build()
            .unwrap();
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        let deadline = Duration::from_millis(1_000);
        while let Some(f) = sched.pop_due(deadline) {
            s.on_timer(f.handle, &mut sched);
        }
        assert_eq!(s.state(), AutoplayState::Completed);
        assert_eq!(*s.sim(), 3, "autoplay spent its budget");

        assert!(s.toggle_playback(&mut sched), "playback starts");
        let deadline = Duration::from_millis(60_000);
        while let Some(f) = sched.pop_due(deadline) {
            s.on_timer(f.handle, &mut sched);
        }
        assert_eq!(*s.sim(), 10, "playback ran past the budget");
        assert!(!s.is_playing());
        assert_eq!(s.state(), AutoplayState::Completed);
    }

    /// Stops after `budget` steps and has no playback override.
    struct Capped {
        budget: usize,
    }

    impl Model for Capped {
        type State = u32;

        fn initial(&self) -> u32 {
            0
        }

        fn step(&self, state: &mut u32) {
            *state += 1;
        }

        fn is_finished(&self, _state: &u32, step_index: usize) -> bool {
            step_index >= self.budget
        }

        fn tick_interval(&self) -> Duration {
            Duration::from_millis(100)
        }
    }

    #[test]
    fn default_playback_check_counts_from_playback_start() {
        let mut s = AutoplaySession::builder(Capped { budget: 3 })
            .renderer(|_: &u32| {})
            .build()
            .unwrap();
        let mut sched = ManualScheduler::new();
        for _ in 0..5 {
            s.step();
        }
        s.toggle_playback(&mut sched);
        for (ms, playing) in [(250, true), (1_000, false)] {
            let deadline = Duration::from_millis(ms);
            while let Some(f) = sched.pop_due(deadline) {
                s.on_timer(f.handle, &mut sched);
            }
            assert_eq!(s.is_playing(), playing, "playback counts its own ticks at {ms}ms");
        }
        assert_eq!(s.step_index(), 8);
    }
}
