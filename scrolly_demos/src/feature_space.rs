// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Learned features pulling two classes apart over training.
//!
//! Every sample starts somewhere in a shared blob and drifts toward its class center; the
//! snapshots are precomputed per epoch so scrubbing is a table lookup.

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scrolly_charts::{Frame, MarkId, PointMarkSpec, TextMarkSpec};

use crate::boundary::Class;
use crate::chart::{ChartArea, palette};
use crate::demo::Draw;
#[cfg(not(feature = "std"))]
#[allow(
    unused_imports,
    reason = "newer toolchains provide some of these methods on `f64` in `core`"
)]
use crate::float::FloatExt;

/// Tunables of the feature space demo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureSpaceConfig {
    /// Seed for sample placement.
    pub seed: u64,
    /// Samples per class.
    pub per_class: usize,
    /// Last epoch; there are `last_epoch + 1` snapshots.
    pub last_epoch: usize,
}

impl Default for FeatureSpaceConfig {
    fn default() -> Self {
        Self {
            seed: 11,
            per_class: 25,
            last_epoch: 50,
        }
    }
}

/// Positions of every sample at one epoch.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// `(x, y, class)` per sample, in a fixed order across snapshots.
    pub points: Vec<(f64, f64, Class)>,
}

impl Snapshot {
    /// Distance between the two class centroids.
    pub fn separation(&self) -> f64 {
        let centroid = |class: Class| {
            let (sx, sy, n) = self
                .points
                .iter()
                .filter(|p| p.2 == class)
                .fold((0.0, 0.0, 0.0), |(sx, sy, n), p| (sx + p.0, sy + p.1, n + 1.0));
            if n == 0.0 { (0.0, 0.0) } else { (sx / n, sy / n) }
        };
        let (a, b) = (centroid(Class::A), centroid(Class::B));
        (a.0 - b.0).hypot(a.1 - b.1)
    }
}

/// Smoothstep easing so separation accelerates then settles.
fn ease(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Precomputes `config.last_epoch + 1` snapshots.
pub fn snapshots(config: &FeatureSpaceConfig) -> Vec<Snapshot> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tracks = Vec::with_capacity(2 * config.per_class);
    for (class, center) in [(Class::A, (2.5, 2.5)), (Class::B, (7.5, 7.5))] {
        for _ in 0..config.per_class {
            let start = (rng.gen_range(3.5..6.5), rng.gen_range(3.5..6.5));
            let angle = rng.gen_range(0.0..core::f64::consts::TAU);
            let radius = rng.gen_range(0.0..1.2);
            let end = (
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            );
            tracks.push((start, end, class));
        }
    }
    let last = config.last_epoch.max(1) as f64;
    (0..=config.last_epoch)
        .map(|epoch| {
            let t = ease(epoch as f64 / last);
            Snapshot {
                points: tracks
                    .iter()
                    .map(|&(s, e, class)| (s.0 + (e.0 - s.0) * t, s.1 + (e.1 - s.1) * t, class))
                    .collect(),
            }
        })
        .collect()
}

const CLASS_A_ID: MarkId = MarkId(10_000);
const CLASS_B_ID: MarkId = MarkId(15_000);
const CAPTION_ID: MarkId = MarkId(20_000);

/// Draws the snapshot of the current epoch.
///
/// Pair it with an [`EpochSweep`](crate::EpochSweep) over `0..=last_epoch`.
#[derive(Clone, Debug)]
pub struct FeatureSpaceChart {
    area: ChartArea,
    snapshots: Vec<Snapshot>,
}

impl FeatureSpaceChart {
    /// Creates the chart, precomputing its snapshots.
    pub fn new(area: ChartArea, config: &FeatureSpaceConfig) -> Self {
        Self {
            area,
            snapshots: snapshots(config),
        }
    }

    /// The precomputed snapshots.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

impl Draw<usize> for FeatureSpaceChart {
    fn draw(&self, epoch: &usize) -> Frame {
        let x = self.area.x_scale((0.0, 10.0));
        let y = self.area.y_scale((0.0, 10.0));
        let mut frame = Frame::new(self.area.view);
        frame.extend(self.area.decorations(x, y, "Feature 1", "Feature 2"));
        let Some(snapshot) = self.snapshots.get(*epoch).or(self.snapshots.last()) else {
            return frame;
        };
        for (class, id, fill, edge) in [
            (Class::A, CLASS_A_ID, palette::CLASS_A, palette::CLASS_A_EDGE),
            (Class::B, CLASS_B_ID, palette::CLASS_B, palette::CLASS_B_EDGE),
        ] {
            let points = snapshot
                .points
                .iter()
                .filter(|p| p.2 == class)
                .map(|p| (p.0, p.1));
            frame.extend(
                PointMarkSpec::new(id, points, x, y)
                    .with_size(8.0)
                    .with_fill(fill)
                    .with_stroke(edge, 1.0)
                    .marks(),
            );
        }
        let plot = self.area.plot();
        frame.push(
            TextMarkSpec::new(
                CAPTION_ID,
                (plot.x0 + 10.0, plot.y0 + 10.0),
                format!("separation {:.2}", snapshot.separation()),
            )
            .with_font_size(11.0)
            .with_fill(palette::AXIS)
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
    fn fifty_one_snapshots_drifting_apart() {
        let snaps = snapshots(&FeatureSpaceConfig::default());
        assert_eq!(snaps.len(), 51);
        let first = snaps[0].separation();
        let last = snaps[50].separation();
        assert!(first < 1.5, "classes start mixed, got {first}");
        assert!(last > 6.0, "classes end apart, got {last}");
        let mid = snaps[25].separation();
        assert!(first < mid && mid < last, "{first} < {mid} < {last}");
    }

    #[test]
    fn every_snapshot_keeps_the_sample_order() {
        let snaps = snapshots(&FeatureSpaceConfig::default());
        for s in &snaps {
            assert_eq!(s.points.len(), 50);
            assert!(s.points[..25].iter().all(|p| p.2 == Class::A));
        }
    }
}
