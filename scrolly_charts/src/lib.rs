// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing vocabulary for scrolly render adapters.
//!
//! A render adapter maps simulation state to a [`Frame`]:
//! - **Scales** map data values into scene coordinates.
//! - **Mark specs** (lines, points, rules, rects, text, axes) generate [`Mark`]s with stable ids.
//! - A [`WipeReveal`] computes the one-shot clip that uncovers a chart.
//! - [`to_svg_string`] serializes a frame for hosts that paint with SVG.
//!
//! Text shaping is out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
#[cfg(not(feature = "std"))]
mod float;
mod line_mark;
mod mark;
mod point_mark;
mod rect_mark;
mod reveal;
mod rule_mark;
mod scale;
mod svg;
mod symbol;
mod text_mark;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, StrokeStyle, format_tick};
pub use line_mark::LineMarkSpec;
pub use mark::{
    Frame, Mark, MarkId, MarkPayload, PathMark, RectMark, TextAnchor, TextBaseline, TextMark,
};
pub use point_mark::PointMarkSpec;
pub use rect_mark::RectMarkSpec;
pub use reveal::{Easing, WipeReveal};
pub use rule_mark::RuleMarkSpec;
pub use scale::ScaleLinear;
pub use svg::{escape_xml, path_data, to_svg_string};
pub use symbol::Symbol;
pub use text_mark::TextMarkSpec;
pub use z_order::*;
