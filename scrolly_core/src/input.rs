// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manual interaction routing.
//!
//! Every direct-manipulation input first takes the demo away from its scripted autoplay,
//! then applies its own effect. Once cancelled, the autoplay never comes back.

extern crate alloc;

use alloc::vec::Vec;

use crate::autoplay::{Autoplay, AutoplayState, Tick};
use crate::scheduler::Scheduler;

/// Buttons a demo can expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Restore the starting state.
    Reset,
    /// Take a single step.
    Step,
    /// Start or stop continuous playback.
    PlayPause,
}

impl Button {
    /// Default button caption.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Reset => "Reset",
            Self::Step => "Step",
            Self::PlayPause => "Animate",
        }
    }
}

/// One user input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A slider moved to a value inside its declared range.
    Slider(f64),
    /// A button was activated.
    Button(Button),
}

/// Declared range and default of a demo slider.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderSpec {
    /// Label shown next to the slider.
    pub label: &'static str,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Step granularity.
    pub step: f64,
    /// Initial value.
    pub value: f64,
}

/// The inputs a demo exposes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Controls {
    /// Optional slider.
    pub slider: Option<SliderSpec>,
    /// Buttons in display order.
    pub buttons: Vec<Button>,
}

impl Controls {
    /// Returns `true` if the demo has no inputs at all.
    pub fn is_empty(&self) -> bool {
        self.slider.is_none() && self.buttons.is_empty()
    }
}

/// What routing an input did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteOutcome {
    /// The input cancelled a running autoplay.
    pub preempted: bool,
    /// Continuous playback is ticking after the input.
    pub playing: bool,
}

/// Routes one input to `session`: cancel a running autoplay, then apply the input.
pub fn route(
    session: &mut dyn Autoplay,
    event: InputEvent,
    scheduler: &mut dyn Scheduler<Tick>,
) -> RouteOutcome {
    let preempted = session.state() == AutoplayState::Running && session.cancel(scheduler);
    if preempted {
        log::debug!("input {event:?} pre-empted autoplay");
    }
    match event {
        InputEvent::Slider(value) => session.set_slider(value),
        InputEvent::Button(Button::Reset) => session.reset(scheduler),
        InputEvent::Button(Button::Step) => session.step(),
        InputEvent::Button(Button::PlayPause) => {
            session.toggle_playback(scheduler);
        }
    }
    RouteOutcome {
        preempted,
        playing: session.is_playing(),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::time::Duration;

    use super::*;
    use crate::autoplay::{AutoplaySession, Model};
    use crate::scheduler::ManualScheduler;

    struct Param;

    impl Model for Param {
        type State = f64;

        fn initial(&self) -> f64 {
            4.0
        }

        fn step(&self, state: &mut f64) {
            *state *= 0.9;
        }

        fn is_finished(&self, state: &f64, step_index: usize) -> bool {
            state.abs() < 0.01 || step_index >= 40
        }

        fn apply_slider(&self, state: &mut f64, value: f64) {
            *state = value;
        }

        fn tick_interval(&self) -> Duration {
            Duration::from_millis(300)
        }
    }

    fn running() -> (AutoplaySession<Param, fn(&f64)>, ManualScheduler<Tick>) {
        let mut s = AutoplaySession::builder(Param)
            .renderer((|_: &f64| {}) as fn(&f64))
            .build()
            .unwrap();
        let mut sched = ManualScheduler::new();
        s.run_once(&mut sched);
        (s, sched)
    }

    #[test]
    fn every_input_preempts_a_running_autoplay() {
        for event in [
            InputEvent::Slider(2.0),
            InputEvent::Button(Button::Reset),
            InputEvent::Button(Button::Step),
            InputEvent::Button(Button::PlayPause),
        ] {
            let (mut s, mut sched) = running();
            let out = route(&mut s, event, &mut sched);
            assert!(out.preempted, "{event:?} pre-empts");
            assert_eq!(s.state(), AutoplayState::Cancelled, "{event:?} cancels");
        }
    }

    #[test]
    fn slider_applies_after_cancel() {
        let (mut s, mut sched) = running();
        route(&mut s, InputEvent::Slider(1.5), &mut sched);
        assert_eq!(*s.sim(), 1.5);
        while let Some(f) = sched.pop_due(Duration::from_secs(60)) {
            s.on_timer(f.handle, &mut sched);
        }
        assert_eq!(*s.sim(), 1.5, "no autoplay tick moved the value");
    }

    #[test]
    fn play_pause_takes_over_the_timer_slot() {
        let (mut s, mut sched) = running();
        let out = route(&mut s, InputEvent::Button(Button::PlayPause), &mut sched);
        assert!(out.playing, "playback is ticking");
        assert_eq!(sched.pending(), 1, "only the playback tick is pending");

        let out = route(&mut s, InputEvent::Button(Button::PlayPause), &mut sched);
        assert!(!out.preempted, "nothing left to pre-empt");
        assert!(!out.playing);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn input_on_idle_session_does_not_consume_the_run() {
        let mut s = AutoplaySession::builder(Param)
            .renderer((|_: &f64| {}) as fn(&f64))
            .build()
            .unwrap();
        let mut sched = ManualScheduler::new();
        let out = route(&mut s, InputEvent::Button(Button::Step), &mut sched);
        assert!(!out.preempted);
        assert_eq!(s.state(), AutoplayState::Idle);
        assert!(s.run_once(&mut sched), "reveal can still start the run");
    }
}
