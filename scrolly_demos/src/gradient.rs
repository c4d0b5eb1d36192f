// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-parameter gradient descent on `f(θ) = ½θ² + 1`.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use core::time::Duration;

use scrolly_charts::{
    CURSOR, Frame, LineMarkSpec, MarkId, PointMarkSpec, SERIES_STROKE, StrokeStyle,
};
use scrolly_core::{Button, Controls, Model, SliderSpec};

use crate::chart::{ChartArea, palette};
use crate::demo::{DemoModel, Draw};

/// The loss surface.
pub fn loss(theta: f64) -> f64 {
    0.5 * theta * theta + 1.0
}

/// Its derivative.
pub fn gradient(theta: f64) -> f64 {
    theta
}

/// Tunables of the gradient descent demo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientConfig {
    /// Starting parameter.
    pub start: f64,
    /// Initial learning rate.
    pub learning_rate: f64,
    /// Slider range for the learning rate.
    pub learning_rate_range: (f64, f64),
    /// Stop once `|θ|` is below this.
    pub tolerance: f64,
    /// Stop after this many steps regardless.
    pub max_steps: usize,
    /// `θ` is kept within `[-bound, bound]`.
    pub bound: f64,
    /// Number of visited positions kept for the trail.
    pub history: usize,
    /// Delay between autoplay ticks.
    pub tick: Duration,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            start: 4.0,
            learning_rate: 0.1,
            learning_rate_range: (0.01, 1.0),
            tolerance: 0.01,
            max_steps: 40,
            bound: 5.0,
            history: 50,
            tick: Duration::from_millis(300),
        }
    }
}

/// Simulation state.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientState {
    /// Current parameter.
    pub theta: f64,
    /// Step size; set by the slider and kept across resets.
    pub learning_rate: f64,
    /// Recently visited `(θ, f(θ))`, oldest first.
    pub path: VecDeque<(f64, f64)>,
}

/// The gradient descent model.
#[derive(Clone, Debug, Default)]
pub struct GradientDescent {
    config: GradientConfig,
}

impl GradientDescent {
    /// Creates the model.
    pub fn new(config: GradientConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &GradientConfig {
        &self.config
    }

    fn converged(&self, state: &GradientState) -> bool {
        state.theta.abs() < self.config.tolerance
    }

    fn start_with(&self, learning_rate: f64) -> GradientState {
        let theta = self.config.start;
        GradientState {
            theta,
            learning_rate,
            path: VecDeque::from([(theta, loss(theta))]),
        }
    }
}

impl Model for GradientDescent {
    type State = GradientState;

    fn initial(&self) -> GradientState {
        self.start_with(self.config.learning_rate)
    }

    fn reset_state(&self, current: &GradientState) -> GradientState {
        self.start_with(current.learning_rate)
    }

    fn step(&self, state: &mut GradientState) {
        let bound = self.config.bound;
        state.theta =
            (state.theta - state.learning_rate * gradient(state.theta)).clamp(-bound, bound);
        state.path.push_back((state.theta, loss(state.theta)));
        while state.path.len() > self.config.history {
            state.path.pop_front();
        }
    }

    fn is_finished(&self, state: &GradientState, step_index: usize) -> bool {
        self.converged(state) || step_index >= self.config.max_steps
    }

    /// The "Animate" toggle ignores the step budget and runs until convergence.
    fn playback_finished(&self, state: &GradientState, _steps: usize) -> bool {
        self.converged(state)
    }

    fn apply_slider(&self, state: &mut GradientState, value: f64) {
        state.learning_rate = value;
    }

    fn tick_interval(&self) -> Duration {
        self.config.tick
    }
}

impl DemoModel for GradientDescent {
    fn controls(&self) -> Controls {
        let (min, max) = self.config.learning_rate_range;
        Controls {
            slider: Some(SliderSpec {
                label: "Learning rate",
                min,
                max,
                step: 0.01,
                value: self.config.learning_rate,
            }),
            buttons: vec![Button::Reset, Button::Step, Button::PlayPause],
        }
    }

    fn slider_value(&self, state: &GradientState) -> Option<f64> {
        Some(state.learning_rate)
    }

    fn status(&self, state: &GradientState) -> String {
        format!(
            "θ = {:.3}, loss = {:.3}, learning rate = {:.2}",
            state.theta,
            loss(state.theta),
            state.learning_rate
        )
    }
}

const CURVE_ID: MarkId = MarkId(10_000);
const TRAIL_ID: MarkId = MarkId(10_001);
const CURSOR_ID: MarkId = MarkId(10_002);

/// Draws the loss curve, the dashed trail and the current position.
#[derive(Clone, Debug, Default)]
pub struct GradientChart {
    area: ChartArea,
}

impl GradientChart {
    /// Creates the chart.
    pub fn new(area: ChartArea) -> Self {
        Self { area }
    }
}

impl Draw<GradientState> for GradientChart {
    fn draw(&self, state: &GradientState) -> Frame {
        let x = self.area.x_scale((-5.0, 5.0));
        let y = self.area.y_scale((0.0, 25.0));
        let mut frame = Frame::new(self.area.view);
        frame.extend(self.area.decorations(x, y, "Parameter (θ)", "Loss"));

        let curve = (0_u32..=100).map(|i| {
            let t = -5.0 + 0.1 * f64::from(i);
            (t, loss(t))
        });
        frame.push(
            LineMarkSpec::new(CURVE_ID, curve, x, y)
                .with_stroke(StrokeStyle::solid(palette::CLASS_A_EDGE, 2.0))
                .mark(),
        );
        frame.push(
            LineMarkSpec::new(TRAIL_ID, state.path.iter().copied(), x, y)
                .with_stroke(StrokeStyle::solid(palette::MUTED, 1.5))
                .with_dashes(4.0, 4.0)
                .with_z_index(SERIES_STROKE + 1)
                .mark()
                .with_opacity(0.5),
        );
        frame.extend(
            PointMarkSpec::new(CURSOR_ID, [(state.theta, loss(state.theta))], x, y)
                .with_size(12.0)
                .with_fill(palette::INK)
                .with_stroke(palette::ACCENT, 2.0)
                .with_z_index(CURSOR)
                .marks(),
        );
        frame
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn one_step_from_four_lands_on_three_point_six() {
        let model = GradientDescent::default();
        let mut s = model.initial();
        model.step(&mut s);
        assert!((s.theta - 3.6).abs() < 1e-12, "got {}", s.theta);
        assert_eq!(s.path.len(), 2, "start plus one step");
    }

    #[test]
    fn theta_is_clamped_and_history_is_capped() {
        let model = GradientDescent::default();
        let mut s = model.initial();
        model.apply_slider(&mut s, -3.0);
        for _ in 0..60 {
            model.step(&mut s);
        }
        assert_eq!(s.theta, 5.0, "diverging steps stop at the bound");
        assert_eq!(s.path.len(), 50);
    }

    #[test]
    fn reset_keeps_the_learning_rate() {
        let model = GradientDescent::default();
        let mut s = model.initial();
        model.apply_slider(&mut s, 0.5);
        model.step(&mut s);
        let r = model.reset_state(&s);
        assert_eq!(r.theta, 4.0);
        assert_eq!(r.learning_rate, 0.5);
        assert_eq!(r.path.len(), 1);
    }

    #[test]
    fn stops_on_tolerance_or_budget() {
        let model = GradientDescent::default();
        let mut s = model.initial();
        assert!(!model.is_finished(&s, 39));
        assert!(model.is_finished(&s, 40));
        s.theta = 0.005;
        assert!(model.is_finished(&s, 1));
    }

    #[test]
    fn playback_ignores_the_step_budget() {
        let model = GradientDescent::default();
        let mut s = model.initial();
        assert!(!model.playback_finished(&s, 400), "far from the minimum");
        s.theta = -0.005;
        assert!(model.playback_finished(&s, 1));
    }

    #[test]
    fn drawing_is_a_function_of_state() {
        let chart = GradientChart::default();
        let s = GradientDescent::default().initial();
        assert_eq!(chart.draw(&s), chart.draw(&s));
        assert!(chart.draw(&s).get(CURSOR_ID.child(0)).is_some());
    }
}
