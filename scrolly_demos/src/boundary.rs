// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A linear decision boundary sweeping into place over training epochs.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use peniko::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scrolly_charts::{Frame, MarkId, PointMarkSpec, RuleMarkSpec, SERIES_STROKE};
use scrolly_core::{Button, Controls, Model, SliderSpec};

use crate::chart::{ChartArea, palette};
use crate::demo::{DemoModel, Draw};
#[cfg(not(feature = "std"))]
#[allow(
    unused_imports,
    reason = "newer toolchains provide some of these methods on `f64` in `core`"
)]
use crate::float::FloatExt;

/// `(slope, intercept)` of the boundary line `y = slope·x + intercept` at each epoch.
pub const EPOCH_LINES: [(f64, f64); 11] = [
    (0.2, 2.0),
    (0.3, 2.5),
    (0.4, 3.0),
    (0.5, 3.5),
    (0.6, 4.0),
    (0.7, 4.5),
    (0.8, 5.0),
    (0.9, 5.5),
    (0.95, 6.0),
    (1.0, 6.5),
    (1.0, 7.0),
];

/// Class of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Class {
    /// The lower-left cluster.
    A,
    /// The upper-right cluster.
    B,
}

/// A labeled 2-D sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// First feature.
    pub x: f64,
    /// Second feature.
    pub y: f64,
    /// Label.
    pub class: Class,
}

/// Draws `per_class` samples uniformly from `[1, 4]²` (class A) and `[6, 9]²` (class B).
pub fn two_clusters(seed: u64, per_class: usize) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(2 * per_class);
    for (class, lo) in [(Class::A, 1.0), (Class::B, 6.0)] {
        for _ in 0..per_class {
            out.push(Sample {
                x: rng.gen_range(lo..lo + 3.0),
                y: rng.gen_range(lo..lo + 3.0),
                class,
            });
        }
    }
    out
}

/// Tunables of the decision boundary demo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryConfig {
    /// Seed for the sample clusters.
    pub seed: u64,
    /// Samples per class.
    pub per_class: usize,
    /// Delay between autoplay ticks.
    pub tick: Duration,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            per_class: 30,
            tick: Duration::from_millis(300),
        }
    }
}

/// Walks the precomputed epochs in order.
#[derive(Clone, Debug)]
pub struct EpochSweep {
    last_epoch: usize,
    tick: Duration,
    label: &'static str,
}

impl EpochSweep {
    /// A sweep over `0..=last_epoch`.
    pub fn new(last_epoch: usize, tick: Duration) -> Self {
        Self {
            last_epoch,
            tick,
            label: "Epoch",
        }
    }

    /// Sets the slider label.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Last epoch index.
    pub fn last_epoch(&self) -> usize {
        self.last_epoch
    }
}

impl Model for EpochSweep {
    type State = usize;

    fn initial(&self) -> usize {
        0
    }

    fn step(&self, epoch: &mut usize) {
        *epoch = (*epoch + 1).min(self.last_epoch);
    }

    fn is_finished(&self, epoch: &usize, _step_index: usize) -> bool {
        *epoch >= self.last_epoch
    }

    fn apply_slider(&self, epoch: &mut usize, value: f64) {
        let value = value.round();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped into 0..=last_epoch first"
        )]
        let index = value.clamp(0.0, self.last_epoch as f64) as usize;
        *epoch = index;
    }

    fn tick_interval(&self) -> Duration {
        self.tick
    }
}

impl DemoModel for EpochSweep {
    fn controls(&self) -> Controls {
        Controls {
            slider: Some(SliderSpec {
                label: self.label,
                min: 0.0,
                max: self.last_epoch as f64,
                step: 1.0,
                value: 0.0,
            }),
            buttons: vec![Button::Reset],
        }
    }

    fn slider_value(&self, epoch: &usize) -> Option<f64> {
        Some(*epoch as f64)
    }

    fn status(&self, epoch: &usize) -> String {
        format!("{} {} / {}", self.label, epoch, self.last_epoch)
    }
}

const SAMPLES_ID: MarkId = MarkId(10_000);
const BOUNDARY_ID: MarkId = MarkId(20_000);

/// Draws the samples and the boundary for the current epoch.
#[derive(Clone, Debug)]
pub struct BoundaryChart {
    area: ChartArea,
    samples: Vec<Sample>,
}

impl BoundaryChart {
    /// Creates the chart for `samples`.
    pub fn new(area: ChartArea, samples: Vec<Sample>) -> Self {
        Self { area, samples }
    }

    /// The plotted samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Where the boundary of `epoch` crosses `y = 0` and `y = 10`, as `(x0, x1)`.
pub fn boundary_crossings(epoch: usize) -> (f64, f64) {
    let (slope, intercept) = EPOCH_LINES[epoch.min(EPOCH_LINES.len() - 1)];
    ((0.0 - intercept) / slope, (10.0 - intercept) / slope)
}

impl Draw<usize> for BoundaryChart {
    fn draw(&self, epoch: &usize) -> Frame {
        let x = self.area.x_scale((0.0, 10.0));
        let y = self.area.y_scale((0.0, 10.0));
        let mut frame = Frame::new(self.area.view);
        frame.extend(self.area.decorations(x, y, "Feature 1", "Feature 2"));

        for (class, fill, edge, offset) in [
            (Class::A, palette::CLASS_A, palette::CLASS_A_EDGE, 0),
            (Class::B, palette::CLASS_B, palette::CLASS_B_EDGE, 5_000),
        ] {
            let points = self
                .samples
                .iter()
                .filter(|s| s.class == class)
                .map(|s| (s.x, s.y));
            let marks = PointMarkSpec::new(MarkId(SAMPLES_ID.0 + offset), points, x, y)
                .with_size(8.0)
                .with_fill(fill)
                .with_stroke(edge, 1.0)
                .marks();
            frame.extend(marks.into_iter().map(|m| m.with_opacity(0.6)));
        }

        let (x0, x1) = boundary_crossings(*epoch);
        frame.push(
            RuleMarkSpec::new(BOUNDARY_ID, x.map(x0), y.map(0.0), x.map(x1), y.map(10.0))
                .with_stroke(Color::WHITE, 2.0)
                .with_z_index(SERIES_STROKE)
                .mark()
                .with_opacity(0.8),
        );
        frame
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn clusters_are_reproducible_and_in_range() {
        let a = two_clusters(7, 30);
        assert_eq!(a, two_clusters(7, 30), "same seed, same samples");
        assert_eq!(a.len(), 60);
        for s in &a {
            let lo = match s.class {
                Class::A => 1.0,
                Class::B => 6.0,
            };
            assert!((lo..lo + 3.0).contains(&s.x) && (lo..lo + 3.0).contains(&s.y), "{s:?}");
        }
    }

    #[test]
    fn sweep_stops_on_the_last_epoch() {
        let sweep = EpochSweep::new(10, Duration::from_millis(300));
        let mut e = sweep.initial();
        for _ in 0..20 {
            sweep.step(&mut e);
        }
        assert_eq!(e, 10);
        assert!(sweep.is_finished(&e, 20));
    }

    #[test]
    fn slider_snaps_to_whole_epochs() {
        let sweep = EpochSweep::new(10, Duration::from_millis(300));
        let mut e = 0;
        sweep.apply_slider(&mut e, 3.6);
        assert_eq!(e, 4);
        sweep.apply_slider(&mut e, 99.0);
        assert_eq!(e, 10);
    }

    #[test]
    fn final_boundary_is_the_diagonal_through_seven() {
        let (x0, x1) = boundary_crossings(10);
        assert_eq!((x0, x1), (-7.0, 3.0));
    }
}
