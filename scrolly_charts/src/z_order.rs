// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for demo marks.
//!
//! Renderers sort by `(z_index, MarkId)`, so marks sharing a layer still paint
//! deterministically.

/// Plot background fills.
pub const PLOT_BACKGROUND: i32 = -100;
/// Gridlines and reference contours behind series.
pub const GRID_LINES: i32 = -50;

/// Filled regions (decision areas, bias/variance bands).
pub const SERIES_FILL: i32 = 0;
/// Stroked series (curves, trails, boundaries).
pub const SERIES_STROKE: i32 = 10;
/// Points drawn above lines.
pub const SERIES_POINTS: i32 = 20;
/// The marker for the current position of an animated quantity.
pub const CURSOR: i32 = 25;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Annotations such as the "Overfitting" label.
pub const ANNOTATIONS: i32 = 80;
