// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::BezPath;
use peniko::{Brush, Color};

use crate::axis::StrokeStyle;
use crate::mark::{Mark, MarkId, MarkPayload, PathMark};
use crate::scale::ScaleLinear;
use crate::z_order;

/// A polyline through data points.
///
/// Generates a single path mark; an empty point list still yields a mark with an empty path,
/// so the id stays stable across frames.
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Stable id for the mark emitted by this spec.
    pub id: MarkId,
    /// Points in data space.
    pub points: Vec<(f64, f64)>,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleLinear,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleLinear,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Optional `(dash, gap)` pattern.
    pub dashes: Option<(f64, f64)>,
    /// Fill for closed outlines; transparent by default.
    pub fill: Brush,
    /// Close the path back to its first point.
    pub closed: bool,
    /// Rendering order hint.
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a line mark spec with a black stroke at width 1.
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
            stroke: StrokeStyle::default(),
            dashes: None,
            fill: Color::TRANSPARENT.into(),
            closed: false,
            z_index: z_order::SERIES_STROKE,
        }
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Dashes the stroke.
    pub fn with_dashes(mut self, dash: f64, gap: f64) -> Self {
        self.dashes = Some((dash, gap));
        self
    }

    /// Closes the outline and fills it.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self.closed = true;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut path = BezPath::new();
        for (i, &(x, y)) in self.points.iter().enumerate() {
            let pt = (self.x_scale.map(x), self.y_scale.map(y));
            if i == 0 {
                path.move_to(pt);
            } else {
                path.line_to(pt);
            }
        }
        if self.closed && !self.points.is_empty() {
            path.close_path();
        }
        Mark::new(
            self.id,
            self.z_index,
            MarkPayload::Path(PathMark {
                path,
                fill: self.fill.clone(),
                stroke: self.stroke.brush.clone(),
                stroke_width: self.stroke.stroke_width,
                dashes: self.dashes,
            }),
        )
    }
}
