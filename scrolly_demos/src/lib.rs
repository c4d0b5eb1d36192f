// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The explainer page: six demos and the orchestrator that drives them.
//!
//! Each demo pairs a [`scrolly_core::Model`] (the toy simulation) with a [`Draw`]
//! implementation (its chart). [`session`] wires the two into a type-erased
//! [`DemoSession`] that a [`Page`] section can own.
//!
//! The [`Page`] is the single entry point for host events:
//! - intersection ratios start text reveals, chart wipes and autoplays;
//! - scroll geometry drives the scroll-linked loss chart;
//! - user input is routed to a section's demo and pre-empts its autoplay;
//! - fired [`PageTimer`] tokens are dispatched back to the section that scheduled them.
//!
//! [`HeadlessPage`] runs a page against a virtual clock and a scripted scroll position.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bias_variance;
mod boundary;
mod catalogue;
mod chart;
mod demo;
mod feature_space;
#[cfg(not(feature = "std"))]
mod float;
mod gradient;
mod headless;
mod layout;
mod loss_curve;
mod optimizers;
mod page;
#[cfg(test)]
mod scenario_tests;

pub use bias_variance::{
    BiasVariance, BiasVarianceChart, BiasVarianceConfig, NOISE, Regime, bias_squared,
    total_error, variance,
};
pub use boundary::{
    BoundaryChart, BoundaryConfig, Class, EPOCH_LINES, EpochSweep, Sample, boundary_crossings,
    two_clusters,
};
pub use catalogue::{PageConfig, SECTION_NAMES, standard_page};
pub use chart::{ChartArea, Margin, palette};
pub use demo::{DemoModel, DemoSession, Draw, FrameRenderer, session};
pub use feature_space::{FeatureSpaceChart, FeatureSpaceConfig, Snapshot, snapshots};
pub use gradient::{GradientChart, GradientConfig, GradientDescent, GradientState, gradient, loss};
pub use headless::HeadlessPage;
pub use layout::PageLayout;
pub use loss_curve::{
    LOSS_MARGIN, LossChart, LossCurve, MAX_EPOCH, OVERFIT_EPOCH, training_loss, validation_loss,
};
pub use optimizers::{
    Optimizer, OptimizerChart, OptimizerConfig, OptimizerRace, Trajectory, bowl_gradient,
};
pub use page::{
    CHART_THRESHOLD, DemoSlot, Page, PageError, PageTimer, SCROLL_CHART_THRESHOLD, Section,
    SectionId, SectionSnapshot, SectionText, TEXT_THRESHOLD,
};
