// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scales.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
#[allow(
    unused_imports,
    reason = "newer toolchains provide some of these methods on `f64` in `core`"
)]
use crate::float::FloatExt;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        Self::new(self.range, self.domain).map(y)
    }

    /// Domain as authored.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Range as authored.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns "nice-ish" tick values covering the domain.
    ///
    /// Ticks outside the domain are dropped, so the axis never overhangs the plot.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let eps = (hi - lo).abs() * 1e-9;
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|t| *t >= lo - eps && *t <= hi + eps)
            .collect()
    }
}

pub(crate) fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f.min(10_000.0) as u64
        }
    } else {
        0
    };
    (0..=n)
        .map(|i| {
            let t = start + step * i as f64;
            // Snap accumulated error so labels print as `0.3`, not `0.30000000000000004`.
            (t / step).round() * step
        })
        .collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn maps_and_inverts_a_flipped_range() {
        let y = ScaleLinear::new((0.0, 10.0), (300.0, 0.0));
        assert_eq!(y.map(0.0), 300.0);
        assert_eq!(y.map(10.0), 0.0);
        assert_eq!(y.invert(150.0), 5.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = ScaleLinear::new((2.0, 2.0), (10.0, 20.0));
        assert_eq!(s.map(5.0), 10.0);
    }

    #[test]
    fn ticks_are_nice_and_stay_inside_the_domain() {
        let s = ScaleLinear::new((-5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.ticks(5), [-4.0, -2.0, 0.0, 2.0, 4.0]);
        let s = ScaleLinear::new((0.0, 1.3), (0.0, 100.0));
        let ticks = s.ticks(5);
        assert_eq!(ticks.first(), Some(&0.0), "{ticks:?}");
        assert!(ticks.iter().all(|t| *t <= 1.3), "{ticks:?}");
    }
}
