// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolls through the explainer page on a virtual clock and writes an HTML report of what
//! each chart shows along the way.
//!
//! Usage: `scrolly_page_demo [OUTPUT]` (default `scrolly_page_demo.html`). Set `RUST_LOG=debug`
//! to follow the reveal and autoplay lifecycle.

mod html;

use std::time::Duration;

use anyhow::{Context, Result};
use scrolly_charts::to_svg_string;
use scrolly_core::{AutoplayState, Button, InputEvent};
use scrolly_demos::{
    HeadlessPage, PageConfig, PageLayout, SECTION_NAMES, SectionId, standard_page,
};

use crate::html::HtmlSection;

const VIEWPORT_HEIGHT: f64 = 800.0;
const SECTION_HEIGHT: f64 = 1_000.0;

fn main() -> Result<()> {
    env_logger::init();
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scrolly_page_demo.html".to_owned());

    let page = standard_page(&PageConfig::default()).context("wiring the standard page")?;
    let layout = PageLayout::uniform(VIEWPORT_HEIGHT, SECTION_NAMES.len(), SECTION_HEIGHT);
    let mut headless = HeadlessPage::new(page, layout)?;
    let mut report = Report::default();

    for index in 0..SECTION_NAMES.len() {
        let id = SectionId(index);
        headless.scroll_to_section(id)?;
        report.capture(&headless, id, "revealed")?;
        headless.run_for(Duration::from_millis(1_000))?;
        report.capture(&headless, id, "one second in")?;
        settle(&mut headless, id)?;
        report.capture(&headless, id, "settled")?;
    }

    // Take the gradient demo over by hand: a larger learning rate, then a few steps.
    let gradient = SectionId(0);
    headless.scroll_to_section(gradient)?;
    headless.input(gradient, InputEvent::Slider(0.9))?;
    headless.input(gradient, InputEvent::Button(Button::Reset))?;
    for _ in 0..3 {
        headless.input(gradient, InputEvent::Button(Button::Step))?;
    }
    report.capture(&headless, gradient, "three manual steps at learning rate 0.9")?;

    // Scroll part way past the loss chart so its curves grow.
    let loss = SectionId(SECTION_NAMES.len() - 1);
    let top = headless.layout().section_top(loss).unwrap_or_default();
    for offset in [-400.0, 0.0, 300.0] {
        headless.scroll_to(top + offset)?;
        report.capture(&headless, loss, &format!("scrolled to {offset:+} px"))?;
    }

    let html = html::render_report("Scrolly explainer page", &report.sections);
    std::fs::write(&output, html).with_context(|| format!("writing {output}"))?;
    println!("wrote {output} ({} captures)", report.sections.len());
    Ok(())
}

/// Runs the clock until the section's autoplay is no longer running and its wipe is done.
fn settle(headless: &mut HeadlessPage, id: SectionId) -> Result<()> {
    const SLICE: Duration = Duration::from_millis(500);
    const LIMIT: Duration = Duration::from_secs(120);
    let deadline = headless.now() + LIMIT;
    while headless.now() < deadline {
        let snapshot = headless.snapshot(id)?;
        let running = snapshot.autoplay == Some(AutoplayState::Running);
        let wiping = snapshot.clip != snapshot.frame.view;
        if !running && !wiping {
            return Ok(());
        }
        headless.run_for(SLICE)?;
    }
    log::warn!("section {} did not settle within {LIMIT:?}", id.0);
    Ok(())
}

#[derive(Debug, Default)]
struct Report {
    sections: Vec<HtmlSection>,
}

impl Report {
    fn capture(&mut self, headless: &HeadlessPage, id: SectionId, moment: &str) -> Result<()> {
        let snapshot = headless.snapshot(id)?;
        let clip_id = format!("clip-{}-{}", snapshot.name, self.sections.len());
        let svg = to_svg_string(&snapshot.frame, Some((snapshot.clip, &clip_id)));
        let heading = if snapshot.heading.is_empty() {
            snapshot.name.to_owned()
        } else {
            snapshot.heading.clone()
        };
        let state = snapshot
            .autoplay
            .map(|s| format!("{s:?}, "))
            .unwrap_or_default();
        self.sections.push(HtmlSection {
            title: format!("{heading} ({moment})"),
            description: format!(
                "t = {} ms. {state}{}. Controls {:?}.",
                headless.now().as_millis(),
                snapshot.status,
                snapshot.controls_phase
            ),
            svg,
        });
        log::info!("captured {} at {:?}", snapshot.name, headless.now());
        Ok(())
    }
}
