// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page orchestrator.
//!
//! A [`Page`] owns every section and is the single place host events arrive: intersection
//! ratios, scroll geometry, user input and fired timers. All timers share one scheduler and
//! one token type, [`PageTimer`], which says which section (and which part of it) a fired
//! timer belongs to.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::Rect;
use scrolly_charts::{Frame, WipeReveal};
use scrolly_core::{
    AutoplayState, Controls, ControlsPhase, InputEvent, MappedScheduler, RevealPhase,
    RevealTiming, RouteOutcome, Scheduler, ScrollMetrics, SectionReveal, SectionTimer, Tick,
    TimerHandle, VisibilityGate, route,
};

use crate::demo::DemoSession;
use crate::loss_curve::LossCurve;

/// Threshold at which a section's text starts typing.
pub const TEXT_THRESHOLD: f64 = 0.15;
/// Threshold at which a chart is revealed and its autoplay starts.
pub const CHART_THRESHOLD: f64 = 0.2;
/// Threshold for the scroll-linked chart, which tracks visibility continuously.
pub const SCROLL_CHART_THRESHOLD: f64 = 0.1;

/// Index of a section in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub usize);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}", self.0)
    }
}

/// Timer token for everything on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageTimer {
    /// A demo's autoplay or playback tick.
    Demo(SectionId),
    /// A step of a section's text reveal.
    Section(SectionId, SectionTimer),
}

/// Errors from page entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageError {
    /// No section with this id.
    UnknownSection(SectionId),
    /// The section has no interactive demo to route input to.
    NotInteractive(SectionId),
    /// The layout describes a different number of sections than the page has.
    LayoutMismatch {
        /// Sections on the page.
        sections: usize,
        /// Sections in the layout.
        layout: usize,
    },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSection(id) => write!(f, "{id} does not exist"),
            Self::NotInteractive(id) => write!(f, "{id} has no interactive demo"),
            Self::LayoutMismatch { sections, layout } => write!(
                f,
                "page has {sections} sections but the layout describes {layout}"
            ),
        }
    }
}

impl core::error::Error for PageError {}

/// Text of a section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionText {
    /// Heading, typed first.
    pub heading: Option<String>,
    /// Body paragraph, typed after the heading.
    pub paragraph: Option<String>,
    /// Whether the section has an "expand details" affordance.
    pub expandable: bool,
}

impl SectionText {
    /// Heading and paragraph, not expandable.
    pub fn new(heading: impl Into<String>, paragraph: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            paragraph: Some(paragraph.into()),
            expandable: false,
        }
    }

    /// Adds the expand affordance.
    pub fn expandable(mut self) -> Self {
        self.expandable = true;
        self
    }
}

/// What a section shows besides its text.
pub enum DemoSlot {
    /// Text only.
    Empty,
    /// A timer-driven demo with a one-shot autoplay.
    Autoplay(Box<dyn DemoSession>),
    /// A demo driven by scroll position.
    ScrollLinked(LossCurve),
}

impl fmt::Debug for DemoSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Autoplay(s) => f
                .debug_struct("Autoplay")
                .field("state", &s.state())
                .field("step_index", &s.step_index())
                .finish_non_exhaustive(),
            Self::ScrollLinked(l) => f.debug_tuple("ScrollLinked").field(l).finish(),
        }
    }
}

/// One page section.
#[derive(Debug)]
pub struct Section {
    name: &'static str,
    text: SectionText,
    text_gate: VisibilityGate,
    chart_gate: VisibilityGate,
    reveal: SectionReveal,
    wipe: WipeReveal,
    demo: DemoSlot,
}

impl Section {
    /// Creates a section. `name` is a stable slug hosts use to find its elements.
    pub fn new(
        name: &'static str,
        text: SectionText,
        demo: DemoSlot,
        timing: RevealTiming,
    ) -> Self {
        let chart_threshold = if matches!(demo, DemoSlot::ScrollLinked(_)) {
            SCROLL_CHART_THRESHOLD
        } else {
            CHART_THRESHOLD
        };
        let reveal = SectionReveal::new(
            text.heading.clone(),
            text.paragraph.clone(),
            text.expandable,
            timing,
        );
        Self {
            name,
            text,
            text_gate: VisibilityGate::new(TEXT_THRESHOLD),
            chart_gate: VisibilityGate::new(chart_threshold),
            reveal,
            wipe: WipeReveal::default(),
            demo,
        }
    }

    /// Replaces the chart wipe.
    pub fn with_wipe(mut self, wipe: WipeReveal) -> Self {
        self.wipe = wipe;
        self
    }

    /// Stable slug.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full text.
    pub fn text(&self) -> &SectionText {
        &self.text
    }

    /// The text reveal state machine.
    pub fn reveal(&self) -> &SectionReveal {
        &self.reveal
    }

    /// The chart's visibility gate.
    pub fn chart_gate(&self) -> &VisibilityGate {
        &self.chart_gate
    }

    /// The text's visibility gate.
    pub fn text_gate(&self) -> &VisibilityGate {
        &self.text_gate
    }

    /// The chart wipe.
    pub fn wipe(&self) -> &WipeReveal {
        &self.wipe
    }

    /// The demo slot.
    pub fn demo(&self) -> &DemoSlot {
        &self.demo
    }

    /// The autoplay session, if the section has one.
    pub fn session(&self) -> Option<&dyn DemoSession> {
        match &self.demo {
            DemoSlot::Autoplay(s) => Some(s.as_ref()),
            _ => None,
        }
    }
}

/// Everything a host needs to paint one section at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionSnapshot {
    /// Section id.
    pub id: SectionId,
    /// Stable slug.
    pub name: &'static str,
    /// Revealed heading prefix.
    pub heading: String,
    /// Revealed paragraph prefix.
    pub paragraph: String,
    /// Text reveal phase.
    pub phase: RevealPhase,
    /// Controls visibility.
    pub controls_phase: ControlsPhase,
    /// Whether the expand affordance is shown.
    pub expand_visible: bool,
    /// Latest chart frame; empty for text-only sections.
    pub frame: Frame,
    /// Visible part of the chart under the wipe.
    pub clip: Rect,
    /// Autoplay lifecycle, for timer-driven demos.
    pub autoplay: Option<AutoplayState>,
    /// Whether continuous playback is ticking.
    pub playing: bool,
    /// Inputs the demo exposes.
    pub controls: Controls,
    /// Current slider position.
    pub slider_value: Option<f64>,
    /// One-line demo status.
    pub status: String,
}

/// All sections of the page, in document order.
#[derive(Debug, Default)]
pub struct Page {
    sections: Vec<Section>,
}

impl Page {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section.
    pub fn push(&mut self, section: Section) -> SectionId {
        self.sections.push(section);
        SectionId(self.sections.len() - 1)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the page has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        (0..self.sections.len()).map(SectionId)
    }

    /// Looks a section up.
    pub fn section(&self, id: SectionId) -> Result<&Section, PageError> {
        self.sections.get(id.0).ok_or(PageError::UnknownSection(id))
    }

    /// Finds a section by slug.
    pub fn find(&self, name: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .position(|s| s.name == name)
            .map(SectionId)
    }

    fn section_mut(&mut self, id: SectionId) -> Result<&mut Section, PageError> {
        self.sections.get_mut(id.0).ok_or(PageError::UnknownSection(id))
    }

    /// Delivers an intersection notification for a section.
    ///
    /// The first notification at or above the text threshold starts the text reveal; the
    /// first at or above the chart threshold starts the wipe and the demo's autoplay. Later
    /// notifications only update visibility.
    pub fn on_intersection(
        &mut self,
        id: SectionId,
        ratio: f64,
        scheduler: &mut dyn Scheduler<PageTimer>,
    ) -> Result<(), PageError> {
        let section = self.section_mut(id)?;
        if section.text_gate.notify(ratio) {
            log::debug!("{id} ({}) text revealed", section.name);
            let mut text_scheduler = MappedScheduler::<_, PageTimer, _>::new(
                &mut *scheduler,
                move |t: SectionTimer| PageTimer::Section(id, t),
            );
            section.reveal.on_visible(&mut text_scheduler);
        }
        if section.chart_gate.notify(ratio) {
            log::debug!("{id} ({}) chart revealed", section.name);
            section.wipe.start(scheduler.now());
            if let DemoSlot::Autoplay(session) = &mut section.demo {
                let mut demo_scheduler = MappedScheduler::<_, PageTimer, _>::new(
                    &mut *scheduler,
                    move |_: Tick| PageTimer::Demo(id),
                );
                session.run_once(&mut demo_scheduler);
            }
        }
        if let DemoSlot::ScrollLinked(demo) = &mut section.demo {
            demo.set_visible(section.chart_gate.is_visible());
        }
        Ok(())
    }

    /// Delivers a scroll event for a section. Returns the displayed epoch of a visible
    /// scroll-linked demo, `None` for everything else.
    pub fn on_scroll(
        &mut self,
        id: SectionId,
        metrics: ScrollMetrics,
    ) -> Result<Option<usize>, PageError> {
        let section = self.section_mut(id)?;
        Ok(match &mut section.demo {
            DemoSlot::ScrollLinked(demo) => demo.on_scroll(metrics),
            _ => None,
        })
    }

    /// Routes a user input to a section's demo, pre-empting its autoplay.
    pub fn on_input(
        &mut self,
        id: SectionId,
        event: InputEvent,
        scheduler: &mut dyn Scheduler<PageTimer>,
    ) -> Result<RouteOutcome, PageError> {
        let section = self.section_mut(id)?;
        let DemoSlot::Autoplay(session) = &mut section.demo else {
            return Err(PageError::NotInteractive(id));
        };
        let mut demo_scheduler =
            MappedScheduler::<_, PageTimer, _>::new(scheduler, move |_: Tick| PageTimer::Demo(id));
        let session: &mut dyn DemoSession = session.as_mut();
        Ok(route(session, event, &mut demo_scheduler))
    }

    /// Delivers a fired timer.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        token: PageTimer,
        scheduler: &mut dyn Scheduler<PageTimer>,
    ) -> Result<(), PageError> {
        match token {
            PageTimer::Demo(id) => {
                let section = self.section_mut(id)?;
                if let DemoSlot::Autoplay(session) = &mut section.demo {
                    let mut demo_scheduler = MappedScheduler::<_, PageTimer, _>::new(
                        scheduler,
                        move |_: Tick| PageTimer::Demo(id),
                    );
                    let outcome = session.on_timer(handle, &mut demo_scheduler);
                    log::trace!("{id} timer: {outcome:?}");
                }
            }
            PageTimer::Section(id, event) => {
                let section = self.section_mut(id)?;
                let mut text_scheduler = MappedScheduler::<_, PageTimer, _>::new(
                    scheduler,
                    move |t: SectionTimer| PageTimer::Section(id, t),
                );
                section.reveal.on_timer(handle, event, &mut text_scheduler);
            }
        }
        Ok(())
    }

    /// What a host should paint for a section at `now`.
    pub fn snapshot(&self, id: SectionId, now: Duration) -> Result<SectionSnapshot, PageError> {
        let section = self.section(id)?;
        let (frame, autoplay, playing, controls, slider_value, status) = match &section.demo {
            DemoSlot::Empty => (
                Frame::default(),
                None,
                false,
                Controls::default(),
                None,
                String::new(),
            ),
            DemoSlot::Autoplay(s) => (
                s.frame().clone(),
                Some(s.state()),
                s.is_playing(),
                s.controls(),
                s.slider_value(),
                s.status(),
            ),
            DemoSlot::ScrollLinked(l) => (
                l.frame().clone(),
                None,
                false,
                Controls::default(),
                None,
                l.status(),
            ),
        };
        let clip = section.wipe.clip(frame.view, now);
        Ok(SectionSnapshot {
            id,
            name: section.name,
            heading: section.reveal.heading_text().unwrap_or_default().to_string(),
            paragraph: section.reveal.paragraph_text().unwrap_or_default().to_string(),
            phase: section.reveal.phase(),
            controls_phase: section.reveal.controls(),
            expand_visible: section.reveal.expand_visible(),
            frame,
            clip,
            autoplay,
            playing,
            controls,
            slider_value,
            status,
        })
    }
}
