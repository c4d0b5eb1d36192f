// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared chart layout and palette.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;
use scrolly_charts::{
    AxisSpec, AxisStyle, Mark, MarkId, PLOT_BACKGROUND, RectMarkSpec, ScaleLinear, StrokeStyle,
};

/// Colors shared by the demos; the page is light text on a dark background.
pub mod palette {
    use peniko::Color;

    /// Page background.
    pub const BACKGROUND: Color = Color::from_rgba8(0x11, 0x11, 0x11, 0xff);
    /// Primary ink.
    pub const INK: Color = Color::WHITE;
    /// Secondary series.
    pub const MUTED: Color = Color::from_rgba8(0x88, 0x88, 0x88, 0xff);
    /// Axis lines and labels.
    pub const AXIS: Color = Color::from_rgba8(0x99, 0x99, 0x99, 0xff);
    /// Faint reference lines.
    pub const GRID: Color = Color::from_rgba8(0x33, 0x33, 0x33, 0xff);
    /// First class / first series.
    pub const CLASS_A: Color = Color::from_rgba8(0x66, 0x66, 0x66, 0xff);
    /// First class outline.
    pub const CLASS_A_EDGE: Color = Color::from_rgba8(0x44, 0x44, 0x44, 0xff);
    /// Second class / second series.
    pub const CLASS_B: Color = Color::from_rgba8(0x99, 0x99, 0x99, 0xff);
    /// Second class outline.
    pub const CLASS_B_EDGE: Color = Color::from_rgba8(0x77, 0x77, 0x77, 0xff);
    /// Highlight for the quantity being optimized.
    pub const ACCENT: Color = Color::from_rgba8(0xe0, 0x6c, 0x4f, 0xff);
}

/// Ids reserved by [`ChartArea::decorations`].
pub(crate) const BACKGROUND_ID: MarkId = MarkId(1);
pub(crate) const X_AXIS_ID: MarkId = MarkId(1_000);
pub(crate) const Y_AXIS_ID: MarkId = MarkId(2_000);

/// Space around the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

/// A chart's view and plot rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartArea {
    /// Full chart area.
    pub view: Rect,
    /// Space reserved for axes.
    pub margin: Margin,
}

impl Default for ChartArea {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 700.0, 500.0), Margin::default())
    }
}

impl ChartArea {
    /// Creates a chart area.
    pub fn new(view: Rect, margin: Margin) -> Self {
        Self { view, margin }
    }

    /// Sets the margin.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// The plot rectangle inside the margins.
    pub fn plot(&self) -> Rect {
        Rect::new(
            self.view.x0 + self.margin.left,
            self.view.y0 + self.margin.top,
            self.view.x1 - self.margin.right,
            self.view.y1 - self.margin.bottom,
        )
    }

    /// Horizontal scale over the plot.
    pub fn x_scale(&self, domain: (f64, f64)) -> ScaleLinear {
        let plot = self.plot();
        ScaleLinear::new(domain, (plot.x0, plot.x1))
    }

    /// Vertical scale over the plot, increasing upwards.
    pub fn y_scale(&self, domain: (f64, f64)) -> ScaleLinear {
        let plot = self.plot();
        ScaleLinear::new(domain, (plot.y1, plot.y0))
    }

    /// Background plus bottom and left axes with titles.
    pub fn decorations(
        &self,
        x: ScaleLinear,
        y: ScaleLinear,
        x_title: &str,
        y_title: &str,
    ) -> Vec<Mark> {
        let plot = self.plot();
        let style = AxisStyle {
            rule: StrokeStyle::solid(palette::AXIS, 1.0),
            label_fill: palette::AXIS.into(),
            title_fill: Color::from_rgba8(0x66, 0x66, 0x66, 0xff).into(),
            title_font_size: 11.0,
            ..AxisStyle::default()
        };
        let mut marks = alloc::vec![
            RectMarkSpec::new(BACKGROUND_ID, self.view)
                .with_fill(palette::BACKGROUND)
                .with_z_index(PLOT_BACKGROUND)
                .mark(),
        ];
        marks.extend(
            AxisSpec::bottom(X_AXIS_ID, x, plot.y1)
                .with_title(x_title)
                .with_style(style.clone())
                .marks(),
        );
        marks.extend(
            AxisSpec::left(Y_AXIS_ID, y, plot.x0)
                .with_title(y_title)
                .with_style(style)
                .marks(),
        );
        marks
    }
}
