// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-linked progress.
//!
//! Some demos have no timer at all: their progress is a pure function of where the section
//! sits in the viewport, recomputed on every scroll event while the section is visible.

/// Viewport and section geometry, polled on a scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Height of the viewport.
    pub viewport_height: f64,
    /// Top of the section relative to the top of the viewport.
    pub section_top: f64,
    /// Height of the section.
    pub section_height: f64,
}

/// Progress through a section as it scrolls past: `0` when its top enters the bottom of the
/// viewport, `1` once it is a third of its height past the top.
///
/// Always in `[0, 1]`; degenerate geometry yields `0`.
pub fn scroll_progress(m: ScrollMetrics) -> f64 {
    let denom = m.viewport_height + m.section_height / 3.0;
    let progress = (m.viewport_height - m.section_top) / denom;
    if progress.is_finite() && denom > 0.0 {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Maps progress onto a whole epoch in `0..=max_epoch`.
pub fn epoch_for_progress(progress: f64, max_epoch: usize) -> usize {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "non-negative and bounded by max_epoch; truncation is the intended floor"
    )]
    let epoch = (progress * max_epoch as f64) as usize;
    epoch.min(max_epoch)
}

/// A demo whose displayed epoch follows the scroll position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollLinked {
    max_epoch: usize,
    epoch: usize,
    visible: bool,
}

impl ScrollLinked {
    /// Creates a scroll-linked demo at epoch zero.
    pub fn new(max_epoch: usize) -> Self {
        Self {
            max_epoch,
            epoch: 0,
            visible: false,
        }
    }

    /// Last epoch.
    pub fn max_epoch(&self) -> usize {
        self.max_epoch
    }

    /// Displayed epoch.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Whether scroll events are currently applied.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Follows the section in and out of view.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Handles one scroll event. Returns the epoch to display, or `None` while hidden.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<usize> {
        if !self.visible {
            return None;
        }
        self.epoch = epoch_for_progress(scroll_progress(metrics), self.max_epoch);
        Some(self.epoch)
    }
}
