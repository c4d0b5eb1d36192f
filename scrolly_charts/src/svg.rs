// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of frames.
//!
//! Used by the headless report and by the browser host, which swaps the serialized markup
//! into the chart container on every render.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use kurbo::{BezPath, PathEl, Rect};
use peniko::Brush;

use crate::mark::{Frame, MarkPayload, TextAnchor, TextBaseline};

/// Serializes `frame` into a standalone `<svg>` element.
///
/// Marks are written in paint order. When `clip` is given, everything is clipped to it;
/// `clip_id` must then be unique within the host document.
pub fn to_svg_string(frame: &Frame, clip: Option<(Rect, &str)>) -> String {
    let view = frame.view;
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    ));
    out.push('\n');

    if let Some((rect, id)) = clip {
        out.push_str(&format!(
            r#"<defs><clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            escape_xml(id),
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        ));
        out.push('\n');
        out.push_str(&format!(r#"<g clip-path="url(#{})">"#, escape_xml(id)));
        out.push('\n');
    }

    for mark in frame.paint_order() {
        let opacity = if mark.opacity < 1.0 {
            format!(r#" opacity="{}""#, mark.opacity)
        } else {
            String::new()
        };
        match &mark.payload {
            MarkPayload::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                out.push_str(&opacity);
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push_str(&opacity);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
            MarkPayload::Path(p) => {
                out.push_str(&format!(r#"<path d="{}""#, path_data(&p.path)));
                write_paint_attr(&mut out, "fill", &p.fill);
                if p.stroke_width > 0.0 {
                    write_paint_attr(&mut out, "stroke", &p.stroke);
                    out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                    if let Some((dash, gap)) = p.dashes {
                        out.push_str(&format!(r#" stroke-dasharray="{dash} {gap}""#));
                    }
                }
                out.push_str(&opacity);
                out.push_str("/>\n");
            }
        }
    }

    if clip.is_some() {
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n");
    out
}

/// SVG path data for `path`.
pub fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        match el {
            PathEl::MoveTo(p) => d.push_str(&format!("M{} {}", p.x, p.y)),
            PathEl::LineTo(p) => d.push_str(&format!("L{} {}", p.x, p.y)),
            PathEl::QuadTo(p1, p2) => d.push_str(&format!("Q{} {} {} {}", p1.x, p1.y, p2.x, p2.y)),
            PathEl::CurveTo(p1, p2, p3) => d.push_str(&format!(
                "C{} {} {} {} {} {}",
                p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
            )),
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            if rgba.a == 0 {
                return ("none".to_string(), None);
            }
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

/// Escapes text for use in XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
