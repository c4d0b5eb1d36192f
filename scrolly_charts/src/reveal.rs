// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The one-shot wipe that uncovers a chart the first time it scrolls into view.

use core::time::Duration;

use kurbo::Rect;

/// Easing curve applied to wipe progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Eases `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// A top-down clip-rect wipe.
///
/// The clip starts with zero height and grows to the full view over `duration`. Starting is
/// one-shot: later calls to [`WipeReveal::start`] are ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WipeReveal {
    /// Wipe duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
    started_at: Option<Duration>,
}

impl Default for WipeReveal {
    fn default() -> Self {
        Self::new(Duration::from_millis(2_000))
    }
}

impl WipeReveal {
    /// Creates an unstarted wipe.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::default(),
            started_at: None,
        }
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Starts the wipe at `now`; returns `false` if it had already started.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// When the wipe started, if it has.
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Eased progress in `[0, 1]`; `0` before the wipe starts.
    pub fn progress(&self, now: Duration) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(start);
        self.easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Whether the wipe has fully uncovered the chart.
    pub fn is_complete(&self, now: Duration) -> bool {
        self.started_at
            .is_some_and(|start| now.saturating_sub(start) >= self.duration)
    }

    /// The visible part of `view` at `now`.
    pub fn clip(&self, view: Rect, now: Duration) -> Rect {
        Rect::new(
            view.x0,
            view.y0,
            view.x1,
            view.y0 + view.height() * self.progress(now),
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn clip_grows_from_nothing_to_the_full_view() {
        let view = Rect::new(0.0, 0.0, 400.0, 300.0);
        let mut wipe = WipeReveal::default();
        assert_eq!(wipe.clip(view, ms(5_000)).height(), 0.0, "not started");
        assert!(wipe.start(ms(1_000)));
        assert_eq!(wipe.clip(view, ms(1_000)).height(), 0.0);
        assert_eq!(wipe.clip(view, ms(2_000)).height(), 150.0, "eased midpoint");
        assert_eq!(wipe.clip(view, ms(3_000)), view);
        assert!(wipe.is_complete(ms(3_000)));
    }

    #[test]
    fn start_is_one_shot() {
        let mut wipe = WipeReveal::default().with_easing(Easing::Linear);
        assert!(wipe.start(ms(10)));
        assert!(!wipe.start(ms(500)), "a second reveal is ignored");
        assert_eq!(wipe.started_at(), Some(ms(10)));
        assert!((wipe.progress(ms(510)) - 0.25).abs() < 1e-12);
    }
}
