// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical page geometry for hosts without a layout engine.

extern crate alloc;

use alloc::vec::Vec;

use scrolly_core::ScrollMetrics;

use crate::page::SectionId;

/// Sections stacked top to bottom under a fixed-height viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    viewport_height: f64,
    /// `(top, height)` of every section in document coordinates.
    sections: Vec<(f64, f64)>,
}

impl PageLayout {
    /// Stacks sections of the given heights, separated by `gap`.
    pub fn stacked(viewport_height: f64, heights: impl IntoIterator<Item = f64>, gap: f64) -> Self {
        let mut top = 0.0;
        let sections = heights
            .into_iter()
            .map(|height| {
                let placed = (top, height);
                top += height + gap;
                placed
            })
            .collect();
        Self {
            viewport_height,
            sections,
        }
    }

    /// `count` sections of equal height with no gap.
    pub fn uniform(viewport_height: f64, count: usize, section_height: f64) -> Self {
        Self::stacked(
            viewport_height,
            core::iter::repeat_n(section_height, count),
            0.0,
        )
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Viewport height.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Top of a section in document coordinates.
    pub fn section_top(&self, id: SectionId) -> Option<f64> {
        self.sections.get(id.0).map(|&(top, _)| top)
    }

    /// Scroll offset that brings a section's top to the top of the viewport.
    pub fn scroll_to_section(&self, id: SectionId) -> Option<f64> {
        self.section_top(id)
    }

    /// Height of the whole document.
    pub fn total_height(&self) -> f64 {
        self.sections
            .last()
            .map_or(0.0, |&(top, height)| top + height)
    }

    /// Fraction of a section inside the viewport when scrolled to `scroll_y`.
    pub fn intersection_ratio(&self, id: SectionId, scroll_y: f64) -> Option<f64> {
        let &(top, height) = self.sections.get(id.0)?;
        if height <= 0.0 {
            return Some(0.0);
        }
        let visible_top = top.max(scroll_y);
        let visible_bottom = (top + height).min(scroll_y + self.viewport_height);
        Some(((visible_bottom - visible_top) / height).clamp(0.0, 1.0))
    }

    /// Geometry a scroll event reports for a section at `scroll_y`.
    pub fn metrics(&self, id: SectionId, scroll_y: f64) -> Option<ScrollMetrics> {
        let &(top, height) = self.sections.get(id.0)?;
        Some(ScrollMetrics {
            viewport_height: self.viewport_height,
            section_top: top - scroll_y,
            section_height: height,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn ratios_follow_the_viewport() {
        let layout = PageLayout::uniform(800.0, 3, 1000.0);
        assert_eq!(layout.total_height(), 3000.0);
        assert_eq!(layout.intersection_ratio(SectionId(0), 0.0), Some(0.8));
        assert_eq!(layout.intersection_ratio(SectionId(1), 0.0), Some(0.0));
        assert_eq!(layout.intersection_ratio(SectionId(1), 500.0), Some(0.3));
        assert_eq!(layout.intersection_ratio(SectionId(3), 0.0), None, "no such section");
    }

    #[test]
    fn gaps_push_sections_down() {
        let layout = PageLayout::stacked(600.0, [400.0, 200.0], 100.0);
        assert_eq!(layout.section_top(SectionId(1)), Some(500.0));
        let m = layout.metrics(SectionId(1), 300.0).unwrap();
        assert_eq!(m.section_top, 200.0);
        assert_eq!(m.section_height, 200.0);
        assert_eq!(m.viewport_height, 600.0);
    }
}
