// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame pump between a browser and a [`Page`].

use std::time::Duration;

use scrolly_core::{InputEvent, ManualScheduler, RouteOutcome, Scheduler, ScrollMetrics};
use scrolly_demos::{Page, PageError, PageTimer, SectionId, SectionSnapshot};

/// Owns the page and its timers, and remembers what was last painted.
///
/// Browser timers are not used: every animation frame reports the current time, due timers
/// fire in order, and only sections whose snapshot changed are handed back for painting.
#[derive(Debug)]
pub struct Pump {
    page: Page,
    scheduler: ManualScheduler<PageTimer>,
    painted: Vec<Option<SectionSnapshot>>,
}

impl Pump {
    /// Wraps `page`, with the clock at zero and nothing painted.
    pub fn new(page: Page) -> Self {
        let painted = vec![None; page.len()];
        Self {
            page,
            scheduler: ManualScheduler::new(),
            painted,
        }
    }

    /// The page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Fires every timer due by `now` and moves the clock there. Returns the number fired.
    pub fn advance(&mut self, now: Duration) -> Result<usize, PageError> {
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(now) {
            self.page
                .on_timer(timer.handle, timer.token, &mut self.scheduler)?;
            fired += 1;
        }
        self.scheduler.advance_to(now);
        Ok(fired)
    }

    /// Delivers an intersection ratio.
    pub fn on_intersection(&mut self, id: SectionId, ratio: f64) -> Result<(), PageError> {
        self.page.on_intersection(id, ratio, &mut self.scheduler)
    }

    /// Delivers section geometry from a scroll event.
    pub fn on_scroll(
        &mut self,
        id: SectionId,
        metrics: ScrollMetrics,
    ) -> Result<Option<usize>, PageError> {
        self.page.on_scroll(id, metrics)
    }

    /// Delivers a user input.
    pub fn on_input(
        &mut self,
        id: SectionId,
        event: InputEvent,
    ) -> Result<RouteOutcome, PageError> {
        self.page.on_input(id, event, &mut self.scheduler)
    }

    /// Snapshots of the sections that changed since they were last returned.
    pub fn dirty(&mut self) -> Result<Vec<SectionSnapshot>, PageError> {
        let now = self.now();
        let mut out = Vec::new();
        for (index, painted) in self.painted.iter_mut().enumerate() {
            let snapshot = self.page.snapshot(SectionId(index), now)?;
            if painted.as_ref() != Some(&snapshot) {
                *painted = Some(snapshot.clone());
                out.push(snapshot);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use scrolly_core::AutoplayState;
    use scrolly_demos::{PageConfig, standard_page};

    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn everything_is_dirty_once_then_nothing() {
        let mut pump = Pump::new(standard_page(&PageConfig::default()).unwrap());
        assert_eq!(pump.dirty().unwrap().len(), pump.page().len());
        assert!(pump.dirty().unwrap().is_empty(), "unchanged sections are skipped");
        pump.advance(ms(5_000)).unwrap();
        assert!(pump.dirty().unwrap().is_empty(), "nothing was revealed");
    }

    #[test]
    fn frames_fire_due_timers_and_repaint_the_section() {
        let mut pump = Pump::new(standard_page(&PageConfig::default()).unwrap());
        let gradient = SectionId(0);
        pump.dirty().unwrap();

        pump.on_intersection(gradient, 0.6).unwrap();
        assert_eq!(pump.advance(ms(16)).unwrap(), 0);
        let dirty = pump.dirty().unwrap();
        assert_eq!(dirty.len(), 1, "the wipe moved");
        assert_eq!(dirty[0].autoplay, Some(AutoplayState::Running));

        assert!(pump.advance(ms(300)).unwrap() > 0);
        assert_eq!(pump.now(), ms(300));
        let dirty = pump.dirty().unwrap();
        assert!(dirty[0].status.starts_with("θ = 3.600"), "{}", dirty[0].status);
    }
}
