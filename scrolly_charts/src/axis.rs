// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis generation.
//!
//! Axes here are deliberately plain: a domain line, ticks, tick labels and an optional title.
//! Layout is the caller's job; an axis only needs the scene coordinate it sits at.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::{Brush, Color};

#[cfg(not(feature = "std"))]
#[allow(
    unused_imports,
    reason = "newer toolchains provide some of these methods on `f64` in `core`"
)]
use crate::float::FloatExt;
use crate::mark::{Mark, MarkId, TextAnchor, TextBaseline};
use crate::rule_mark::RuleMarkSpec;
use crate::scale::ScaleLinear;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A paint + width pair for stroked paths.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the title.
    pub title_fill: Brush,
    /// Font size for the title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let grey = Color::from_rgba8(0x55, 0x55, 0x55, 0xff);
        Self {
            rule: StrokeStyle::solid(grey, 1.0),
            label_fill: grey.into(),
            label_font_size: 10.0,
            title_fill: Color::BLACK.into(),
            title_font_size: 12.0,
        }
    }
}

/// Which side of the plot the axis labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis below the plot.
    Bottom,
    /// Vertical axis left of the plot.
    Left,
}

/// An axis specification.
///
/// Mark ids: the domain line uses `id_base`; tick `i` uses `id_base.child(2 * i)` for the rule
/// and `id_base.child(2 * i + 1)` for the label; the title uses `id_base.child(TITLE_SLOT)`.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    /// Stable-id base.
    pub id_base: MarkId,
    /// Scale the axis labels.
    pub scale: ScaleLinear,
    /// Placement.
    pub orient: AxisOrient,
    /// Cross-axis scene coordinate of the domain line (a `y` for bottom axes, an `x` for left).
    pub position: f64,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick length.
    pub tick_size: f64,
    /// Gap between tick end and label.
    pub tick_padding: f64,
    /// Styling.
    pub style: AxisStyle,
    /// Optional title.
    pub title: Option<String>,
    /// Distance from the domain line to the title.
    pub title_offset: f64,
}

impl AxisSpec {
    /// Title id offset from `id_base`. Ticks beyond `TITLE_SLOT / 2` are dropped.
    pub const TITLE_SLOT: u64 = 255;

    /// Creates an axis with five ticks and no title.
    pub fn new(id_base: MarkId, scale: ScaleLinear, orient: AxisOrient, position: f64) -> Self {
        Self {
            id_base,
            scale,
            orient,
            position,
            tick_count: 5,
            tick_size: 5.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            title: None,
            title_offset: 32.0,
        }
    }

    /// Convenience constructor for a bottom axis at scene `y`.
    pub fn bottom(id_base: MarkId, scale: ScaleLinear, y: f64) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom, y)
    }

    /// Convenience constructor for a left axis at scene `x`.
    pub fn left(id_base: MarkId, scale: ScaleLinear, x: f64) -> Self {
        Self::new(id_base, scale, AxisOrient::Left, x)
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the styling.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Generates the axis marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let (r0, r1) = self.scale.range();
        let rule = &self.style.rule;
        let domain = match self.orient {
            AxisOrient::Bottom => RuleMarkSpec::horizontal(self.id_base, self.position, r0, r1),
            AxisOrient::Left => RuleMarkSpec::vertical(self.id_base, self.position, r0, r1),
        };
        out.push(
            domain
                .with_stroke(rule.brush.clone(), rule.stroke_width)
                .with_z_index(z_order::AXIS_RULES)
                .mark(),
        );

        let ticks = self.scale.ticks(self.tick_count);
        let step = match ticks.as_slice() {
            [a, b, ..] => b - a,
            _ => 0.0,
        };
        let max_ticks = usize::try_from(Self::TITLE_SLOT / 2).unwrap_or(usize::MAX);
        for (value, i) in ticks.iter().take(max_ticks).zip(0_u64..) {
            let at = self.scale.map(*value);
            let label_gap = self.tick_size + self.tick_padding;
            let (tick, pos, anchor, baseline) = match self.orient {
                AxisOrient::Bottom => (
                    RuleMarkSpec::vertical(
                        self.id_base.child(2 * i),
                        at,
                        self.position,
                        self.position + self.tick_size,
                    ),
                    Point::new(at, self.position + label_gap),
                    TextAnchor::Middle,
                    TextBaseline::Hanging,
                ),
                AxisOrient::Left => (
                    RuleMarkSpec::horizontal(
                        self.id_base.child(2 * i),
                        at,
                        self.position - self.tick_size,
                        self.position,
                    ),
                    Point::new(self.position - label_gap, at),
                    TextAnchor::End,
                    TextBaseline::Middle,
                ),
            };
            out.push(
                tick.with_stroke(rule.brush.clone(), rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES)
                    .mark(),
            );
            out.push(
                TextMarkSpec::new(self.id_base.child(2 * i + 1), pos, format_tick(*value, step))
                    .with_font_size(self.style.label_font_size)
                    .with_fill(self.style.label_fill.clone())
                    .with_anchor(anchor)
                    .with_baseline(baseline)
                    .with_z_index(z_order::AXIS_LABELS)
                    .mark(),
            );
        }

        if let Some(title) = &self.title {
            let mid = 0.5 * (r0 + r1);
            let (pos, angle) = match self.orient {
                AxisOrient::Bottom => (Point::new(mid, self.position + self.title_offset), 0.0),
                AxisOrient::Left => (Point::new(self.position - self.title_offset, mid), -90.0),
            };
            out.push(
                TextMarkSpec::new(self.id_base.child(Self::TITLE_SLOT), pos, title.clone())
                    .with_font_size(self.style.title_font_size)
                    .with_fill(self.style.title_fill.clone())
                    .with_anchor(TextAnchor::Middle)
                    .with_angle(angle)
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            );
        }
        out
    }
}

/// Formats a tick with as many decimals as the tick step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return format!("{value}");
    }
    // Nudge so a step of exactly 0.1 never rounds to two decimals.
    let decimals = -(step.log10() + 1e-9).floor();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "step is in (0, 1), so decimals is a small positive integer"
    )]
    let decimals = decimals.min(12.0) as usize;
    format!("{value:.decimals$}")
}
