// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Training and validation loss, scrubbed by scrolling.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use peniko::Color;
use scrolly_charts::{
    ANNOTATIONS, Frame, GRID_LINES, LineMarkSpec, MarkId, RuleMarkSpec, StrokeStyle, TextAnchor,
    TextMarkSpec,
};
use scrolly_core::{ScrollLinked, ScrollMetrics};

use crate::chart::{ChartArea, Margin, palette};
use crate::demo::Draw;
#[cfg(not(feature = "std"))]
#[allow(
    unused_imports,
    reason = "newer toolchains provide some of these methods on `f64` in `core`"
)]
use crate::float::FloatExt;

/// Last epoch on the x axis.
pub const MAX_EPOCH: usize = 100;
/// Past this epoch the gap between the curves is called out.
pub const OVERFIT_EPOCH: usize = 50;

/// Training loss keeps falling.
pub fn training_loss(epoch: f64) -> f64 {
    1.2 * (-0.04 * epoch).exp() + 0.05
}

/// Validation loss falls, then turns upward at epoch 40.
pub fn validation_loss(epoch: f64) -> f64 {
    if epoch < 40.0 {
        1.3 * (-0.035 * epoch).exp() + 0.08
    } else {
        0.25 + 0.008 * (epoch - 40.0)
    }
}

const TRAIN_ID: MarkId = MarkId(10_000);
const VALIDATION_ID: MarkId = MarkId(10_001);
const GRID_ID: MarkId = MarkId(11_000);
const LEGEND_ID: MarkId = MarkId(12_000);
const OVERFIT_ID: MarkId = MarkId(13_000);

/// Draws both curves up to the displayed epoch.
#[derive(Clone, Debug)]
pub struct LossChart {
    area: ChartArea,
}

/// Margins leaving room for the legend on the right.
pub const LOSS_MARGIN: Margin = Margin {
    top: 40.0,
    right: 120.0,
    bottom: 50.0,
    left: 60.0,
};

impl Default for LossChart {
    fn default() -> Self {
        Self::new(ChartArea::default().with_margin(LOSS_MARGIN))
    }
}

impl LossChart {
    /// Creates the chart.
    pub fn new(area: ChartArea) -> Self {
        Self { area }
    }
}

impl Draw<usize> for LossChart {
    fn draw(&self, epoch: &usize) -> Frame {
        let epoch = (*epoch).min(MAX_EPOCH);
        let x = self.area.x_scale((0.0, MAX_EPOCH as f64));
        let y = self.area.y_scale((0.0, 1.5));
        let plot = self.area.plot();
        let mut frame = Frame::new(self.area.view);
        frame.extend(self.area.decorations(x, y, "Epoch", "Loss"));

        let mut grid_id = GRID_ID.0;
        for t in x.ticks(5) {
            frame.push(
                RuleMarkSpec::vertical(MarkId(grid_id), x.map(t), plot.y0, plot.y1)
                    .with_stroke(palette::GRID, 1.0)
                    .with_z_index(GRID_LINES)
                    .mark(),
            );
            grid_id += 1;
        }
        for t in y.ticks(5) {
            frame.push(
                RuleMarkSpec::horizontal(MarkId(grid_id), y.map(t), plot.x0, plot.x1)
                    .with_stroke(palette::GRID, 1.0)
                    .with_z_index(GRID_LINES)
                    .mark(),
            );
            grid_id += 1;
        }

        let epochs = 0..=epoch;
        let series: [(MarkId, &str, Color, fn(f64) -> f64); 2] = [
            (TRAIN_ID, "Training", palette::MUTED, training_loss),
            (VALIDATION_ID, "Validation", palette::INK, validation_loss),
        ];
        for ((id, name, color, f), row) in series.into_iter().zip(0_u64..) {
            let points = epochs.clone().map(|e| {
                let e = e as f64;
                (e, f(e))
            });
            frame.push(
                LineMarkSpec::new(id, points, x, y)
                    .with_stroke(StrokeStyle::solid(color, 2.0))
                    .mark(),
            );
            let legend_x = self.area.view.x1 - 110.0;
            let legend_y = plot.y0 + 20.0 * row as f64;
            frame.push(
                RuleMarkSpec::horizontal(
                    MarkId(LEGEND_ID.0 + 2 * row),
                    legend_y,
                    legend_x,
                    legend_x + 30.0,
                )
                .with_stroke(color, 2.0)
                .with_z_index(ANNOTATIONS)
                .mark(),
            );
            frame.push(
                TextMarkSpec::new(
                    MarkId(LEGEND_ID.0 + 2 * row + 1),
                    (legend_x + 35.0, legend_y),
                    name,
                )
                .with_font_size(11.0)
                .with_fill(palette::AXIS)
                .mark(),
            );
        }

        let overfit_opacity = if epoch > OVERFIT_EPOCH { 0.9 } else { 0.0 };
        frame.push(
            TextMarkSpec::new(OVERFIT_ID, (x.map(60.0), y.map(0.8)), "Overfitting")
                .with_anchor(TextAnchor::Middle)
                .with_fill(palette::INK)
                .mark()
                .with_opacity(overfit_opacity),
        );
        frame
    }
}

/// The scroll-linked loss demo: visibility tracking, displayed epoch and its frame.
#[derive(Clone, Debug)]
pub struct LossCurve {
    linked: ScrollLinked,
    chart: LossChart,
    frame: Frame,
}

impl Default for LossCurve {
    fn default() -> Self {
        Self::new(LossChart::default())
    }
}

impl LossCurve {
    /// Creates the demo at epoch zero and draws it.
    pub fn new(chart: LossChart) -> Self {
        let frame = chart.draw(&0);
        Self {
            linked: ScrollLinked::new(MAX_EPOCH),
            chart,
            frame,
        }
    }

    /// Displayed epoch.
    pub fn epoch(&self) -> usize {
        self.linked.epoch()
    }

    /// Whether scroll events are applied.
    pub fn is_visible(&self) -> bool {
        self.linked.is_visible()
    }

    /// Follows the section in and out of view.
    pub fn set_visible(&mut self, visible: bool) {
        self.linked.set_visible(visible);
    }

    /// Latest frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Handles a scroll event; redraws and returns the epoch while visible.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<usize> {
        let epoch = self.linked.on_scroll(metrics)?;
        self.frame = self.chart.draw(&epoch);
        log::trace!("loss curve at epoch {epoch}");
        Some(epoch)
    }

    /// Short human-readable status.
    pub fn status(&self) -> String {
        let e = self.epoch() as f64;
        format!(
            "epoch {}: training {:.3}, validation {:.3}",
            self.epoch(),
            training_loss(e),
            validation_loss(e)
        )
    }
}
