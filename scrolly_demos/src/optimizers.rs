// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optimizers racing down the bowl `f(x, y) = x² + y²`.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use peniko::Color;
use scrolly_charts::{
    CURSOR, Frame, GRID_LINES, LineMarkSpec, MarkId, PointMarkSpec, StrokeStyle, TextMarkSpec,
};
use scrolly_core::{Button, Controls, Model};

use crate::chart::{ChartArea, palette};
use crate::demo::{DemoModel, Draw};
#[cfg(not(feature = "std"))]
#[allow(
    unused_imports,
    reason = "newer toolchains provide some of these methods on `f64` in `core`"
)]
use crate::float::FloatExt;

/// Gradient of the bowl at `p`.
pub fn bowl_gradient(p: (f64, f64)) -> (f64, f64) {
    (2.0 * p.0, 2.0 * p.1)
}

/// An update rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Optimizer {
    /// Plain gradient descent.
    Sgd {
        /// Step size.
        learning_rate: f64,
    },
    /// Heavy-ball momentum.
    Momentum {
        /// Step size.
        learning_rate: f64,
        /// Velocity decay.
        beta: f64,
    },
}

impl Optimizer {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sgd { .. } => "SGD",
            Self::Momentum { .. } => "Momentum",
        }
    }

    fn update(&self, position: &mut (f64, f64), velocity: &mut (f64, f64)) {
        let g = bowl_gradient(*position);
        match *self {
            Self::Sgd { learning_rate } => {
                position.0 -= learning_rate * g.0;
                position.1 -= learning_rate * g.1;
            }
            Self::Momentum {
                learning_rate,
                beta,
            } => {
                velocity.0 = beta * velocity.0 - learning_rate * g.0;
                velocity.1 = beta * velocity.1 - learning_rate * g.1;
                position.0 += velocity.0;
                position.1 += velocity.1;
            }
        }
    }
}

/// One optimizer's progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// Update rule.
    pub optimizer: Optimizer,
    /// Current position.
    pub position: (f64, f64),
    /// Velocity accumulator; unused by SGD.
    pub velocity: (f64, f64),
    /// Visited positions, start first.
    pub trail: Vec<(f64, f64)>,
}

impl Trajectory {
    /// Distance to the optimum at the origin.
    pub fn distance(&self) -> f64 {
        self.position.0.hypot(self.position.1)
    }
}

/// Tunables of the optimizer comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizerConfig {
    /// Shared starting point.
    pub start: (f64, f64),
    /// Optimizers to race.
    pub optimizers: Vec<Optimizer>,
    /// Every optimizer must be this close to the origin to stop.
    pub tolerance: f64,
    /// Stop after this many steps regardless.
    pub max_steps: usize,
    /// Delay between autoplay ticks.
    pub tick: Duration,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            start: (-1.5, 1.2),
            optimizers: vec![
                Optimizer::Sgd { learning_rate: 0.1 },
                Optimizer::Momentum {
                    learning_rate: 0.05,
                    beta: 0.8,
                },
            ],
            tolerance: 0.1,
            max_steps: 200,
            tick: Duration::from_millis(80),
        }
    }
}

/// The optimizer comparison model.
#[derive(Clone, Debug, Default)]
pub struct OptimizerRace {
    config: OptimizerConfig,
}

impl OptimizerRace {
    /// Creates the model.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Whether `trajectory` is within tolerance of the optimum.
    pub fn has_converged(&self, trajectory: &Trajectory) -> bool {
        trajectory.distance() < self.config.tolerance
    }
}

impl Model for OptimizerRace {
    type State = Vec<Trajectory>;

    fn initial(&self) -> Vec<Trajectory> {
        self.config
            .optimizers
            .iter()
            .map(|&optimizer| Trajectory {
                optimizer,
                position: self.config.start,
                velocity: (0.0, 0.0),
                trail: vec![self.config.start],
            })
            .collect()
    }

    fn step(&self, state: &mut Vec<Trajectory>) {
        for t in state {
            t.optimizer.update(&mut t.position, &mut t.velocity);
            t.trail.push(t.position);
        }
    }

    fn is_finished(&self, state: &Vec<Trajectory>, step_index: usize) -> bool {
        step_index >= self.config.max_steps || state.iter().all(|t| self.has_converged(t))
    }

    fn tick_interval(&self) -> Duration {
        self.config.tick
    }
}

impl DemoModel for OptimizerRace {
    fn controls(&self) -> Controls {
        Controls {
            slider: None,
            buttons: vec![Button::Reset, Button::Step],
        }
    }

    fn slider_value(&self, _state: &Vec<Trajectory>) -> Option<f64> {
        None
    }

    fn status(&self, state: &Vec<Trajectory>) -> String {
        let mut out = String::new();
        for (i, t) in state.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!("{}: {:.3}", t.optimizer.name(), t.distance()));
        }
        out
    }
}

const CONTOURS_ID: MarkId = MarkId(10_000);
const TRAILS_ID: MarkId = MarkId(20_000);
const HEADS_ID: MarkId = MarkId(30_000);
const LEGEND_ID: MarkId = MarkId(40_000);
const CONTOUR_LEVELS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

fn series_color(index: usize) -> Color {
    match index {
        0 => palette::INK,
        1 => palette::ACCENT,
        _ => palette::MUTED,
    }
}

/// Draws contour rings, each optimizer's trail and its current position.
#[derive(Clone, Debug, Default)]
pub struct OptimizerChart {
    area: ChartArea,
}

impl OptimizerChart {
    /// Creates the chart.
    pub fn new(area: ChartArea) -> Self {
        Self { area }
    }
}

impl Draw<Vec<Trajectory>> for OptimizerChart {
    fn draw(&self, state: &Vec<Trajectory>) -> Frame {
        let x = self.area.x_scale((-2.0, 2.0));
        let y = self.area.y_scale((-2.0, 2.0));
        let mut frame = Frame::new(self.area.view);
        frame.extend(self.area.decorations(x, y, "x", "y"));

        for (radius, i) in CONTOUR_LEVELS.iter().zip(0_u64..) {
            let ring = (0_u32..64).map(|k| {
                let a = core::f64::consts::TAU * f64::from(k) / 64.0;
                (radius * a.cos(), radius * a.sin())
            });
            frame.push(
                LineMarkSpec::new(MarkId(CONTOURS_ID.0 + i), ring, x, y)
                    .with_stroke(StrokeStyle::solid(palette::GRID, 1.0))
                    .with_fill(Color::TRANSPARENT)
                    .with_z_index(GRID_LINES)
                    .mark(),
            );
        }

        let plot = self.area.plot();
        for (index, t) in state.iter().enumerate() {
            let color = series_color(index);
            let i = index as u64;
            frame.push(
                LineMarkSpec::new(MarkId(TRAILS_ID.0 + i), t.trail.iter().copied(), x, y)
                    .with_stroke(StrokeStyle::solid(color, 1.5))
                    .mark(),
            );
            frame.extend(
                PointMarkSpec::new(MarkId(HEADS_ID.0 + 10 * i), [t.position], x, y)
                    .with_size(10.0)
                    .with_fill(color)
                    .with_z_index(CURSOR)
                    .marks(),
            );
            frame.push(
                TextMarkSpec::new(
                    MarkId(LEGEND_ID.0 + i),
                    (plot.x1 - 90.0, plot.y0 + 12.0 + 18.0 * index as f64),
                    t.optimizer.name(),
                )
                .with_font_size(11.0)
                .with_fill(color)
                .mark(),
            );
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn sgd_contracts_by_a_constant_factor() {
        let race = OptimizerRace::default();
        let mut s = race.initial();
        race.step(&mut s);
        let sgd = &s[0];
        assert!((sgd.position.0 - -1.2).abs() < 1e-12, "{:?}", sgd.position);
        assert!((sgd.position.1 - 0.96).abs() < 1e-12, "{:?}", sgd.position);
        assert_eq!(sgd.trail.len(), 2);
    }

    #[test]
    fn momentum_accumulates_velocity() {
        let race = OptimizerRace::default();
        let mut s = race.initial();
        race.step(&mut s);
        race.step(&mut s);
        let m = &s[1];
        assert_ne!(m.velocity, (0.0, 0.0));
        assert!(m.distance() < 1.92, "moving towards the optimum");
    }

    #[test]
    fn finishes_only_when_every_optimizer_has_converged() {
        let race = OptimizerRace::default();
        let mut s = race.initial();
        let mut steps = 0;
        while !race.is_finished(&s, steps) {
            race.step(&mut s);
            steps += 1;
            if !race.is_finished(&s, steps) {
                assert!(
                    s.iter().any(|t| !race.has_converged(t)),
                    "stop condition false while all converged at step {steps}"
                );
            }
        }
        assert!(steps < 200, "converges well within the budget, took {steps}");
        assert!(s.iter().all(|t| race.has_converged(t)));
    }
}
