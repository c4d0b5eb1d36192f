// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::vec::Vec;

use peniko::{Brush, Color};

use crate::mark::{Mark, MarkId, MarkPayload, PathMark};
use crate::scale::ScaleLinear;
use crate::symbol::Symbol;
use crate::z_order;

/// One glyph per data point.
///
/// Point `i` gets id `id.child(i)`, so callers must leave `points.len()` ids free after `id`.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Base id.
    pub id: MarkId,
    /// Points in data space.
    pub points: Vec<(f64, f64)>,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleLinear,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleLinear,
    /// Glyph size (diameter/side) in scene coordinates.
    pub size: f64,
    /// Glyph shape.
    pub symbol: Symbol,
    /// Fill paint.
    pub fill: Brush,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width; `0` disables the outline.
    pub stroke_width: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates black circles of size 6.
    pub fn new(
        id: MarkId,
        points: impl IntoIterator<Item = (f64, f64)>,
        x_scale: ScaleLinear,
        y_scale: ScaleLinear,
    ) -> Self {
        Self {
            id,
            points: points.into_iter().collect(),
            x_scale,
            y_scale,
            size: 6.0,
            symbol: Symbol::Circle,
            fill: Color::BLACK.into(),
            stroke: Color::TRANSPARENT.into(),
            stroke_width: 0.0,
            z_index: z_order::SERIES_POINTS,
        }
    }

    /// Sets the glyph size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the glyph shape.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Outlines every glyph.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates one mark per point.
    pub fn marks(&self) -> Vec<Mark> {
        self.points
            .iter()
            .zip(0_u64..)
            .map(|(&(x, y), i)| {
                let path = self
                    .symbol
                    .path(self.x_scale.map(x), self.y_scale.map(y), self.size);
                Mark::new(
                    self.id.child(i),
                    self.z_index,
                    MarkPayload::Path(PathMark {
                        path,
                        fill: self.fill.clone(),
                        stroke: self.stroke.clone(),
                        stroke_width: self.stroke_width,
                        dashes: None,
                    }),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn one_child_id_per_point() {
        let s = ScaleLinear::new((0.0, 1.0), (0.0, 10.0));
        let marks = PointMarkSpec::new(MarkId(100), [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)], s, s)
            .with_symbol(Symbol::Square)
            .marks();
        let ids: Vec<u64> = marks.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, [101, 102, 103]);
        let b = marks[1].payload.bounds().unwrap();
        assert_eq!((b.center().x, b.center().y), (5.0, 5.0));
    }
}
