// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-gated animation lifecycle for scroll-driven visualizations.
//!
//! Every demo on a scrolling explainer page follows the same shape:
//! - a **visibility gate** fires once, the first time its region is sufficiently visible;
//! - that starts a one-shot **autoplay** of scripted steps on a timer;
//! - any **user input** permanently cancels the autoplay and takes over;
//! - independently, the section's text is **typed out** and only then do its controls fade in.
//!
//! This crate owns that lifecycle and nothing else. Timers, intersection notifications,
//! scroll geometry and user input are capabilities handed in by the host; drawing happens
//! behind a [`RenderAdapter`]. Everything is single-threaded and cooperative: a cancellation
//! never interrupts a step in progress, it only prevents the next one.
//!
//! Timers deliver typed tokens instead of closures (see [`Scheduler`]), so every piece of
//! state has exactly one owner and every transition can be tested against a
//! [`ManualScheduler`] without a drawing surface.

#![no_std]

extern crate alloc;

mod autoplay;
mod gate;
mod input;
mod scheduler;
mod scroll;
mod sequencer;
mod typewriter;

pub use autoplay::{
    Autoplay, AutoplayBuilder, AutoplaySession, AutoplayState, Model, RenderAdapter, Tick,
    TickOutcome, WiringError,
};
pub use gate::{GateSet, VisibilityGate};
pub use input::{Button, Controls, InputEvent, RouteOutcome, SliderSpec, route};
pub use scheduler::{Fired, ManualScheduler, MappedScheduler, Scheduler, TimerHandle};
pub use scroll::{ScrollLinked, ScrollMetrics, epoch_for_progress, scroll_progress};
pub use sequencer::{ControlsPhase, RevealPhase, RevealTiming, SectionReveal, SectionTimer};
pub use typewriter::Typewriter;
