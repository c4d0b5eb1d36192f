// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A page driven entirely by a virtual clock and a scripted scroll position.
//!
//! [`HeadlessPage`] plays the role of the browser: it turns a scroll offset into
//! intersection ratios and scroll events, and fires timers from a [`ManualScheduler`].
//! Renders and test scenarios run through it without any drawing surface.

use core::time::Duration;

use scrolly_core::{InputEvent, ManualScheduler, RouteOutcome, Scheduler};

use crate::layout::PageLayout;
use crate::page::{Page, PageError, PageTimer, SectionId, SectionSnapshot};

/// A [`Page`] with its own scheduler and layout.
#[derive(Debug)]
pub struct HeadlessPage {
    page: Page,
    scheduler: ManualScheduler<PageTimer>,
    layout: PageLayout,
    scroll_y: f64,
}

impl HeadlessPage {
    /// Couples `page` with `layout`, which must describe the same sections.
    pub fn new(page: Page, layout: PageLayout) -> Result<Self, PageError> {
        if page.len() != layout.len() {
            return Err(PageError::LayoutMismatch {
                sections: page.len(),
                layout: layout.len(),
            });
        }
        Ok(Self {
            page,
            scheduler: ManualScheduler::new(),
            layout,
            scroll_y: 0.0,
        })
    }

    /// The page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The layout.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &ManualScheduler<PageTimer> {
        &self.scheduler
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Scrolls to `y`, delivering intersection notifications and then a scroll event to
    /// every section.
    pub fn scroll_to(&mut self, y: f64) -> Result<(), PageError> {
        self.scroll_y = y;
        for index in 0..self.page.len() {
            let id = SectionId(index);
            let ratio = self
                .layout
                .intersection_ratio(id, y)
                .ok_or(PageError::UnknownSection(id))?;
            self.page.on_intersection(id, ratio, &mut self.scheduler)?;
            if let Some(metrics) = self.layout.metrics(id, y) {
                self.page.on_scroll(id, metrics)?;
            }
        }
        Ok(())
    }

    /// Scrolls so that a section's top is at the top of the viewport.
    pub fn scroll_to_section(&mut self, id: SectionId) -> Result<(), PageError> {
        let y = self
            .layout
            .scroll_to_section(id)
            .ok_or(PageError::UnknownSection(id))?;
        self.scroll_to(y)
    }

    /// Delivers a user input to a section.
    pub fn input(&mut self, id: SectionId, event: InputEvent) -> Result<RouteOutcome, PageError> {
        self.page.on_input(id, event, &mut self.scheduler)
    }

    /// Fires every timer due up to `deadline`, in order, then moves the clock there.
    ///
    /// Returns the number of timers fired.
    pub fn run_until(&mut self, deadline: Duration) -> Result<usize, PageError> {
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            self.page
                .on_timer(timer.handle, timer.token, &mut self.scheduler)?;
            fired += 1;
        }
        self.scheduler.advance_to(deadline);
        Ok(fired)
    }

    /// Runs for `span` past the current time.
    pub fn run_for(&mut self, span: Duration) -> Result<usize, PageError> {
        self.run_until(self.now() + span)
    }

    /// What a host should paint for a section right now.
    pub fn snapshot(&self, id: SectionId) -> Result<SectionSnapshot, PageError> {
        self.page.snapshot(id, self.now())
    }
}
