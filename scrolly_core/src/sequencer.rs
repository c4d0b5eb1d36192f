// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section reveal sequencing.
//!
//! When a section first scrolls into view its text is typed out and only then do its
//! controls fade in:
//!
//! ```text
//! NotStarted → TypingHeading → TypingParagraph → ControlsFadingIn → Done
//! ```
//!
//! Each completed phase schedules exactly the next one, so the ordering is carried by the
//! state machine rather than by nested callbacks. A missing heading or paragraph is skipped.
//! The controls stay `Hidden` for two frame boundaries after the text completes so the
//! starting style is committed before the fade is applied.

extern crate alloc;

use alloc::string::String;
use core::time::Duration;

use smallvec::SmallVec;

use crate::scheduler::{Scheduler, TimerHandle};
use crate::typewriter::Typewriter;

/// Delays used by [`SectionReveal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTiming {
    /// Per-character delay for the heading.
    pub heading_char: Duration,
    /// Per-character delay for the paragraph.
    pub paragraph_char: Duration,
    /// Pause between the heading completing and the paragraph starting.
    pub paragraph_gap: Duration,
    /// Length of one rendering frame.
    pub frame: Duration,
    /// Duration of the controls fade.
    pub fade: Duration,
    /// Delay from the fade starting to the expand affordance appearing.
    pub expand_delay: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            heading_char: Duration::from_millis(45),
            paragraph_char: Duration::from_millis(22),
            paragraph_gap: Duration::from_millis(400),
            frame: Duration::from_millis(16),
            fade: Duration::from_millis(500),
            expand_delay: Duration::from_millis(600),
        }
    }
}

/// Progress of a section's reveal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealPhase {
    /// The section has not been visible yet.
    #[default]
    NotStarted,
    /// Typing the heading.
    TypingHeading,
    /// Waiting for, or typing, the paragraph.
    TypingParagraph,
    /// Text is done; controls are being brought in.
    ControlsFadingIn,
    /// Everything is shown.
    Done,
}

/// Visibility of a section's control widgets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControlsPhase {
    /// Not shown.
    #[default]
    Hidden,
    /// The fade transition is running.
    FadingIn,
    /// Fully shown.
    Shown,
}

/// Timer tokens scheduled by a [`SectionReveal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionTimer {
    /// Reveal the next heading character.
    HeadingChar,
    /// The pause after the heading is over.
    ParagraphStart,
    /// Reveal the next paragraph character.
    ParagraphChar,
    /// A frame boundary before the fade (1 or 2).
    Frame(u8),
    /// The controls fade finished.
    FadeComplete,
    /// Show the expand affordance.
    ExpandReveal,
}

/// The reveal state machine of one page section.
#[derive(Clone, Debug)]
pub struct SectionReveal {
    timing: RevealTiming,
    heading: Option<Typewriter>,
    paragraph: Option<Typewriter>,
    expandable: bool,
    phase: RevealPhase,
    controls: ControlsPhase,
    expand_visible: bool,
    typed: bool,
    pending: SmallVec<[TimerHandle; 2]>,
}

impl SectionReveal {
    /// Creates the sequencer for a section.
    ///
    /// Empty strings are treated as absent.
    pub fn new(
        heading: Option<impl Into<String>>,
        paragraph: Option<impl Into<String>>,
        expandable: bool,
        timing: RevealTiming,
    ) -> Self {
        let heading = heading
            .map(|h| Typewriter::new(h, timing.heading_char))
            .filter(|t| !t.is_empty());
        let paragraph = paragraph
            .map(|p| Typewriter::new(p, timing.paragraph_char))
            .filter(|t| !t.is_empty());
        Self {
            timing,
            heading,
            paragraph,
            expandable,
            phase: RevealPhase::NotStarted,
            controls: ControlsPhase::Hidden,
            expand_visible: false,
            typed: false,
            pending: SmallVec::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Current controls phase.
    pub fn controls(&self) -> ControlsPhase {
        self.controls
    }

    /// Whether the expand affordance is shown.
    pub fn expand_visible(&self) -> bool {
        self.expand_visible
    }

    /// Whether typing has been scheduled. Write-once.
    pub fn is_typed(&self) -> bool {
        self.typed
    }

    /// The revealed part of the heading.
    pub fn heading_text(&self) -> Option<&str> {
        self.heading.as_ref().map(Typewriter::visible_text)
    }

    /// The revealed part of the paragraph.
    pub fn paragraph_text(&self) -> Option<&str> {
        self.paragraph.as_ref().map(Typewriter::visible_text)
    }

    /// Total time from the first visibility to the controls beginning to appear, excluding
    /// the frame boundaries.
    pub fn text_duration(&self) -> Duration {
        let heading = self.heading.as_ref().map_or(Duration::ZERO, Typewriter::duration);
        let paragraph = self
            .paragraph
            .as_ref()
            .map_or(Duration::ZERO, Typewriter::duration);
        let gap = if self.heading.is_some() && self.paragraph.is_some() {
            self.timing.paragraph_gap
        } else {
            Duration::ZERO
        };
        heading + gap + paragraph
    }

    /// Starts the sequence on the section's first qualifying visibility.
    ///
    /// Returns `false` if the sequence was already started.
    pub fn on_visible(&mut self, scheduler: &mut dyn Scheduler<SectionTimer>) -> bool {
        if self.typed {
            return false;
        }
        self.typed = true;
        if self.heading.is_some() {
            self.enter(RevealPhase::TypingHeading);
            self.schedule(scheduler, self.timing.heading_char, SectionTimer::HeadingChar);
        } else {
            self.begin_paragraph(scheduler, false);
        }
        true
    }

    /// Delivers a fired timer. Returns `false` for timers this section does not own.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        event: SectionTimer,
        scheduler: &mut dyn Scheduler<SectionTimer>,
    ) -> bool {
        let Some(index) = self.pending.iter().position(|&h| h == handle) else {
            return false;
        };
        self.pending.swap_remove(index);
        self.advance(event, scheduler);
        true
    }

    fn advance(&mut self, event: SectionTimer, scheduler: &mut dyn Scheduler<SectionTimer>) {
        match (self.phase, event) {
            (RevealPhase::TypingHeading, SectionTimer::HeadingChar) => {
                let done = self.heading.as_mut().is_none_or(Typewriter::advance);
                if done {
                    self.begin_paragraph(scheduler, true);
                } else {
                    self.schedule(scheduler, self.timing.heading_char, SectionTimer::HeadingChar);
                }
            }
            (RevealPhase::TypingParagraph, SectionTimer::ParagraphStart) => {
                self.schedule(
                    scheduler,
                    self.timing.paragraph_char,
                    SectionTimer::ParagraphChar,
                );
            }
            (RevealPhase::TypingParagraph, SectionTimer::ParagraphChar) => {
                let done = self.paragraph.as_mut().is_none_or(Typewriter::advance);
                if done {
                    self.begin_controls(scheduler);
                } else {
                    self.schedule(
                        scheduler,
                        self.timing.paragraph_char,
                        SectionTimer::ParagraphChar,
                    );
                }
            }
            (RevealPhase::ControlsFadingIn, SectionTimer::Frame(1)) => {
                self.schedule(scheduler, self.timing.frame, SectionTimer::Frame(2));
            }
            (RevealPhase::ControlsFadingIn, SectionTimer::Frame(_)) => {
                self.controls = ControlsPhase::FadingIn;
                log::debug!("controls fading in");
                self.schedule(scheduler, self.timing.fade, SectionTimer::FadeComplete);
                if self.expandable {
                    self.schedule(
                        scheduler,
                        self.timing.expand_delay,
                        SectionTimer::ExpandReveal,
                    );
                }
            }
            (RevealPhase::ControlsFadingIn, SectionTimer::FadeComplete) => {
                self.controls = ControlsPhase::Shown;
                self.finish_if_settled();
            }
            (RevealPhase::ControlsFadingIn, SectionTimer::ExpandReveal) => {
                self.expand_visible = true;
                self.finish_if_settled();
            }
            (phase, event) => {
                log::trace!("ignoring {event:?} in {phase:?}");
            }
        }
    }

    fn begin_paragraph(
        &mut self,
        scheduler: &mut dyn Scheduler<SectionTimer>,
        after_heading: bool,
    ) {
        if self.paragraph.is_none() {
            self.begin_controls(scheduler);
            return;
        }
        self.enter(RevealPhase::TypingParagraph);
        if after_heading {
            self.schedule(
                scheduler,
                self.timing.paragraph_gap,
                SectionTimer::ParagraphStart,
            );
        } else {
            self.schedule(
                scheduler,
                self.timing.paragraph_char,
                SectionTimer::ParagraphChar,
            );
        }
    }

    fn begin_controls(&mut self, scheduler: &mut dyn Scheduler<SectionTimer>) {
        self.enter(RevealPhase::ControlsFadingIn);
        self.schedule(scheduler, self.timing.frame, SectionTimer::Frame(1));
    }

    fn finish_if_settled(&mut self) {
        if self.controls == ControlsPhase::Shown && (self.expand_visible || !self.expandable) {
            self.enter(RevealPhase::Done);
        }
    }

    fn enter(&mut self, phase: RevealPhase) {
        log::debug!("section reveal {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn schedule(
        &mut self,
        scheduler: &mut dyn Scheduler<SectionTimer>,
        delay: Duration,
        event: SectionTimer,
    ) {
        let handle = scheduler.after(delay, event);
        self.pending.push(handle);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scheduler::ManualScheduler;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn run(s: &mut SectionReveal, sched: &mut ManualScheduler<SectionTimer>, until: Duration) {
        while let Some(f) = sched.pop_due(until) {
            s.on_timer(f.handle, f.token, sched);
        }
        sched.advance_to(until);
    }

    fn section(heading: Option<&str>, paragraph: Option<&str>, expandable: bool) -> SectionReveal {
        SectionReveal::new(heading, paragraph, expandable, RevealTiming::default())
    }

    #[test]
    fn controls_appear_only_after_both_texts_are_typed() {
        let heading = "0123456789";
        let paragraph = "abcdefghijklmnopqrst";
        let mut s = section(Some(heading), Some(paragraph), false);
        let mut sched = ManualScheduler::new();
        assert!(s.on_visible(&mut sched));
        assert_eq!(s.text_duration(), ms(10 * 45 + 400 + 20 * 22));

        run(&mut s, &mut sched, ms(449));
        assert_eq!(s.phase(), RevealPhase::TypingHeading);
        assert_eq!(s.heading_text(), Some("012345678"));

        run(&mut s, &mut sched, ms(450));
        assert_eq!(s.phase(), RevealPhase::TypingParagraph);
        assert_eq!(s.paragraph_text(), Some(""), "the gap runs first");

        run(&mut s, &mut sched, ms(1289));
        assert_eq!(s.controls(), ControlsPhase::Hidden, "never before 1290ms");
        assert_eq!(s.paragraph_text(), Some("abcdefghijklmnopqrs"));

        run(&mut s, &mut sched, ms(1290));
        assert_eq!(s.phase(), RevealPhase::ControlsFadingIn);
        assert_eq!(s.controls(), ControlsPhase::Hidden, "two frame boundaries first");

        run(&mut s, &mut sched, ms(1290 + 2 * 16));
        assert_eq!(s.controls(), ControlsPhase::FadingIn);

        run(&mut s, &mut sched, ms(1290 + 2 * 16 + 500));
        assert_eq!(s.controls(), ControlsPhase::Shown);
        assert_eq!(s.phase(), RevealPhase::Done);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn visibility_is_idempotent() {
        let mut s = section(Some("Title"), Some("Body"), false);
        let mut sched = ManualScheduler::new();
        assert!(s.on_visible(&mut sched));
        run(&mut s, &mut sched, ms(100));
        assert!(!s.on_visible(&mut sched), "re-entering the viewport is ignored");
        assert_eq!(sched.pending(), 1, "no duplicate typing chain");
        run(&mut s, &mut sched, ms(10_000));
        assert_eq!(s.heading_text(), Some("Title"));
        assert_eq!(s.paragraph_text(), Some("Body"));
    }

    #[test]
    fn missing_heading_types_the_paragraph_immediately() {
        let mut s = section(None, Some("abc"), false);
        let mut sched = ManualScheduler::new();
        s.on_visible(&mut sched);
        assert_eq!(s.phase(), RevealPhase::TypingParagraph);
        run(&mut s, &mut sched, ms(66));
        assert_eq!(s.phase(), RevealPhase::ControlsFadingIn, "no gap without a heading");
    }

    #[test]
    fn missing_text_goes_straight_to_controls() {
        let mut s = section(None, Some(""), false);
        let mut sched = ManualScheduler::new();
        s.on_visible(&mut sched);
        assert_eq!(s.phase(), RevealPhase::ControlsFadingIn);
        assert_eq!(s.heading_text(), None);
        assert_eq!(s.paragraph_text(), None, "empty text counts as absent");
    }

    #[test]
    fn expand_affordance_follows_the_fade_start() {
        let mut s = section(Some("H"), None, true);
        let mut sched = ManualScheduler::new();
        s.on_visible(&mut sched);
        // Heading done at 45ms, frames at 61 and 77ms, fade starts at 77ms.
        run(&mut s, &mut sched, ms(77 + 599));
        assert_eq!(s.controls(), ControlsPhase::Shown);
        assert!(!s.expand_visible());
        assert_eq!(s.phase(), RevealPhase::ControlsFadingIn, "waits for the affordance");

        run(&mut s, &mut sched, ms(77 + 600));
        assert!(s.expand_visible());
        assert_eq!(s.phase(), RevealPhase::Done);
    }

    #[test]
    fn foreign_timers_are_ignored() {
        let mut s = section(Some("Hi"), None, false);
        let mut other = section(Some("Other"), None, false);
        let mut sched = ManualScheduler::new();
        s.on_visible(&mut sched);
        let f = sched.pop_due(ms(1_000)).unwrap();
        assert!(!other.on_timer(f.handle, f.token, &mut sched), "not its timer");
        assert!(s.on_timer(f.handle, f.token, &mut sched));
        assert_eq!(s.heading_text(), Some("H"));
    }
}
