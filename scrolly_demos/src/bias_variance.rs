// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bias–variance tradeoff as model complexity grows.
//!
//! The error curves are illustrative closed forms, not fitted to anything.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use core::time::Duration;

use scrolly_charts::{
    ANNOTATIONS, CURSOR, Frame, LineMarkSpec, MarkId, PointMarkSpec, RuleMarkSpec, StrokeStyle,
    TextAnchor, TextMarkSpec,
};
use scrolly_core::{Button, Controls, Model, SliderSpec};

use crate::chart::{ChartArea, palette};
use crate::demo::{DemoModel, Draw};
#[cfg(not(feature = "std"))]
#[allow(
    unused_imports,
    reason = "newer toolchains provide some of these methods on `f64` in `core`"
)]
use crate::float::FloatExt;

/// Irreducible noise floor.
pub const NOISE: f64 = 0.05;

/// Squared bias at a complexity: high for simple models.
pub fn bias_squared(complexity: f64) -> f64 {
    1.2 / complexity
}

/// Variance at a complexity: high for flexible models.
pub fn variance(complexity: f64) -> f64 {
    0.012 * complexity * complexity
}

/// Expected test error.
pub fn total_error(complexity: f64) -> f64 {
    bias_squared(complexity) + variance(complexity) + NOISE
}

/// How a complexity is usually described.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Bias dominates.
    Underfitting,
    /// Near the error minimum.
    Balanced,
    /// Variance dominates.
    Overfitting,
}

impl Regime {
    /// Classifies a complexity.
    pub fn of(complexity: usize) -> Self {
        match complexity {
            0..=2 => Self::Underfitting,
            3..=6 => Self::Balanced,
            _ => Self::Overfitting,
        }
    }

    /// Caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Underfitting => "Underfitting",
            Self::Balanced => "Sweet spot",
            Self::Overfitting => "Overfitting",
        }
    }
}

/// Tunables of the bias–variance demo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiasVarianceConfig {
    /// Lowest complexity.
    pub min_complexity: usize,
    /// Highest complexity; autoplay stops here.
    pub max_complexity: usize,
    /// Delay between autoplay ticks.
    pub tick: Duration,
}

impl Default for BiasVarianceConfig {
    fn default() -> Self {
        Self {
            min_complexity: 1,
            max_complexity: 10,
            tick: Duration::from_millis(250),
        }
    }
}

/// Steps model complexity up one notch per tick.
#[derive(Clone, Debug, Default)]
pub struct BiasVariance {
    config: BiasVarianceConfig,
}

impl BiasVariance {
    /// Creates the model.
    pub fn new(config: BiasVarianceConfig) -> Self {
        Self { config }
    }
}

impl Model for BiasVariance {
    type State = usize;

    fn initial(&self) -> usize {
        self.config.min_complexity
    }

    fn step(&self, complexity: &mut usize) {
        *complexity = (*complexity + 1).min(self.config.max_complexity);
    }

    fn is_finished(&self, complexity: &usize, _step_index: usize) -> bool {
        *complexity >= self.config.max_complexity
    }

    fn apply_slider(&self, complexity: &mut usize, value: f64) {
        let lo = self.config.min_complexity as f64;
        let hi = self.config.max_complexity as f64;
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "rounded and clamped into the complexity range"
        )]
        let c = value.round().clamp(lo, hi) as usize;
        *complexity = c;
    }

    fn tick_interval(&self) -> Duration {
        self.config.tick
    }
}

impl DemoModel for BiasVariance {
    fn controls(&self) -> Controls {
        Controls {
            slider: Some(SliderSpec {
                label: "Model complexity",
                min: self.config.min_complexity as f64,
                max: self.config.max_complexity as f64,
                step: 1.0,
                value: self.config.min_complexity as f64,
            }),
            buttons: vec![Button::Reset],
        }
    }

    fn slider_value(&self, complexity: &usize) -> Option<f64> {
        Some(*complexity as f64)
    }

    fn status(&self, complexity: &usize) -> String {
        let c = *complexity as f64;
        format!(
            "complexity {complexity}: bias² {:.2}, variance {:.2}, error {:.2} ({})",
            bias_squared(c),
            variance(c),
            total_error(c),
            Regime::of(*complexity).label()
        )
    }
}

const CURVES_ID: MarkId = MarkId(10_000);
const MARKER_ID: MarkId = MarkId(20_000);
const DOTS_ID: MarkId = MarkId(20_100);
const LABELS_ID: MarkId = MarkId(30_000);

/// Draws the three error curves and a marker at the current complexity.
#[derive(Clone, Debug, Default)]
pub struct BiasVarianceChart {
    area: ChartArea,
}

impl BiasVarianceChart {
    /// Creates the chart.
    pub fn new(area: ChartArea) -> Self {
        Self { area }
    }
}

impl Draw<usize> for BiasVarianceChart {
    fn draw(&self, complexity: &usize) -> Frame {
        let x = self.area.x_scale((1.0, 10.0));
        let y = self.area.y_scale((0.0, 1.4));
        let plot = self.area.plot();
        let mut frame = Frame::new(self.area.view);
        frame.extend(self.area.decorations(x, y, "Model complexity", "Error"));

        let curves: [(&str, fn(f64) -> f64, _); 3] = [
            ("Bias²", bias_squared, palette::CLASS_B),
            ("Variance", variance, palette::MUTED),
            ("Total error", total_error, palette::INK),
        ];
        let c = *complexity as f64;
        for ((name, f, color), i) in curves.into_iter().zip(0_u64..) {
            let samples = (10_u32..=100).map(|k| {
                let t = f64::from(k) / 10.0;
                (t, f(t))
            });
            let mut line = LineMarkSpec::new(MarkId(CURVES_ID.0 + i), samples, x, y)
                .with_stroke(StrokeStyle::solid(color, 2.0));
            if i < 2 {
                line = line.with_dashes(6.0, 4.0);
            }
            frame.push(line.mark());
            frame.extend(
                PointMarkSpec::new(MarkId(DOTS_ID.0 + 10 * i), [(c, f(c))], x, y)
                    .with_size(8.0)
                    .with_fill(color)
                    .with_z_index(CURSOR)
                    .marks(),
            );
            frame.push(
                TextMarkSpec::new(
                    MarkId(LABELS_ID.0 + i),
                    (x.map(10.0) - 4.0, y.map(f(10.0)) - 10.0),
                    name,
                )
                .with_anchor(TextAnchor::End)
                .with_font_size(11.0)
                .with_fill(color)
                .mark(),
            );
        }

        frame.push(
            RuleMarkSpec::vertical(MARKER_ID, x.map(c), plot.y0, plot.y1)
                .with_stroke(palette::AXIS, 1.0)
                .with_dashes(2.0, 3.0)
                .mark(),
        );
        frame.push(
            TextMarkSpec::new(
                MarkId(LABELS_ID.0 + 10),
                (x.map(c), plot.y0 + 8.0),
                Regime::of(*complexity).label(),
            )
            .with_anchor(TextAnchor::Middle)
            .with_fill(palette::INK)
            .with_z_index(ANNOTATIONS)
            .mark(),
        );
        frame
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn error_is_lowest_in_the_middle() {
        let best = (1_u32..=10)
            .min_by(|a, b| total_error(f64::from(*a)).total_cmp(&total_error(f64::from(*b))))
            .unwrap();
        assert_eq!(best, 4);
        assert_eq!(Regime::of(4), Regime::Balanced);
        assert!(total_error(1.0) > total_error(4.0) && total_error(10.0) > total_error(4.0));
    }

    #[test]
    fn complexity_steps_up_to_the_maximum() {
        let model = BiasVariance::default();
        let mut c = model.initial();
        assert_eq!(c, 1);
        for _ in 0..9 {
            assert!(!model.is_finished(&c, 0));
            model.step(&mut c);
        }
        assert_eq!(c, 10);
        assert!(model.is_finished(&c, 9));
        model.apply_slider(&mut c, 0.0);
        assert_eq!(c, 1, "slider is clamped to the declared range");
    }
}
