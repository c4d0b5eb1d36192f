// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glue between demo models and the drawing layer.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use scrolly_charts::Frame;
use scrolly_core::{Autoplay, AutoplaySession, Controls, Model, RenderAdapter, WiringError};

/// Draws a frame from simulation state.
///
/// Drawing is a pure function of the state, so rendering the same state twice yields the
/// same frame.
pub trait Draw<S: ?Sized> {
    /// Builds the frame for `state`.
    fn draw(&self, state: &S) -> Frame;
}

/// A render adapter that keeps the most recently drawn frame.
#[derive(Debug)]
pub struct FrameRenderer<D> {
    chart: D,
    frame: Frame,
    renders: usize,
}

impl<D> FrameRenderer<D> {
    /// Wraps `chart`. Nothing is drawn until the first render.
    pub fn new(chart: D) -> Self {
        Self {
            chart,
            frame: Frame::default(),
            renders: 0,
        }
    }

    /// The chart that draws the frames.
    pub fn chart(&self) -> &D {
        &self.chart
    }

    /// Latest frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// How many times the adapter has rendered.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl<S: ?Sized, D: Draw<S>> RenderAdapter<S> for FrameRenderer<D> {
    fn render(&mut self, state: &S) {
        self.frame = self.chart.draw(state);
        self.renders += 1;
    }
}

/// A [`Model`] that also describes its inputs and a one-line status.
pub trait DemoModel: Model {
    /// The inputs the demo exposes.
    fn controls(&self) -> Controls;

    /// Current slider position, if the demo has a slider.
    fn slider_value(&self, state: &Self::State) -> Option<f64>;

    /// Short human-readable status, e.g. the current parameter value.
    fn status(&self, state: &Self::State) -> String;
}

/// An autoplay session a page can hold without knowing its model.
pub trait DemoSession: Autoplay {
    /// Latest rendered frame.
    fn frame(&self) -> &Frame;

    /// The inputs the demo exposes.
    fn controls(&self) -> Controls;

    /// Current slider position, if the demo has a slider.
    fn slider_value(&self) -> Option<f64>;

    /// Short human-readable status.
    fn status(&self) -> String;
}

impl<M, D> DemoSession for AutoplaySession<M, FrameRenderer<D>>
where
    M: DemoModel,
    D: Draw<M::State>,
{
    fn frame(&self) -> &Frame {
        self.renderer().frame()
    }

    fn controls(&self) -> Controls {
        self.model().controls()
    }

    fn slider_value(&self) -> Option<f64> {
        self.model().slider_value(self.sim())
    }

    fn status(&self) -> String {
        self.model().status(self.sim())
    }
}

/// Wires `model` to `chart` and renders the initial frame.
pub fn session<M, D>(
    label: &'static str,
    model: M,
    chart: D,
) -> Result<Box<dyn DemoSession>, WiringError>
where
    M: DemoModel + 'static,
    D: Draw<M::State> + 'static,
{
    let session = AutoplaySession::builder(model)
        .label(label)
        .renderer(FrameRenderer::new(chart))
        .build()?;
    Ok(Box::new(session))
}
