// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The standard explainer page: six demo sections in reading order.

use core::time::Duration;

use scrolly_charts::WipeReveal;
use scrolly_core::{RevealTiming, WiringError};

use crate::bias_variance::{BiasVariance, BiasVarianceChart, BiasVarianceConfig};
use crate::boundary::{BoundaryChart, BoundaryConfig, EPOCH_LINES, EpochSweep, two_clusters};
use crate::chart::ChartArea;
use crate::demo::session;
use crate::feature_space::{FeatureSpaceChart, FeatureSpaceConfig};
use crate::gradient::{GradientChart, GradientConfig, GradientDescent};
use crate::loss_curve::{LOSS_MARGIN, LossChart, LossCurve};
use crate::optimizers::{OptimizerChart, OptimizerConfig, OptimizerRace};
use crate::page::{DemoSlot, Page, Section, SectionText};

/// Slugs of the standard sections, in document order.
pub const SECTION_NAMES: [&str; 6] = [
    "gradient",
    "boundary",
    "optimizers",
    "bias-variance",
    "feature-space",
    "loss",
];

/// Everything tunable about the standard page.
#[derive(Clone, Debug)]
pub struct PageConfig {
    /// Typing and fade delays shared by every section.
    pub timing: RevealTiming,
    /// Chart wipe shared by every section.
    pub wipe: WipeReveal,
    /// Chart geometry.
    pub area: ChartArea,
    /// Gradient descent demo.
    pub gradient: GradientConfig,
    /// Decision boundary demo.
    pub boundary: BoundaryConfig,
    /// Optimizer race.
    pub optimizers: OptimizerConfig,
    /// Bias and variance sweep.
    pub bias_variance: BiasVarianceConfig,
    /// Feature space demo.
    pub feature_space: FeatureSpaceConfig,
    /// Tick of the feature space sweep.
    pub feature_space_tick: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            timing: RevealTiming::default(),
            wipe: WipeReveal::default(),
            area: ChartArea::default(),
            gradient: GradientConfig::default(),
            boundary: BoundaryConfig::default(),
            optimizers: OptimizerConfig::default(),
            bias_variance: BiasVarianceConfig::default(),
            feature_space: FeatureSpaceConfig::default(),
            feature_space_tick: Duration::from_millis(120),
        }
    }
}

/// Builds the standard page.
pub fn standard_page(config: &PageConfig) -> Result<Page, WiringError> {
    let area = config.area;
    let mut page = Page::new();
    let mut add = |name, text, demo| {
        page.push(Section::new(name, text, demo, config.timing).with_wipe(config.wipe));
    };

    add(
        SECTION_NAMES[0],
        SectionText::new(
            "Gradient descent",
            "Training is a walk downhill. At every step the parameter moves against the slope \
             of the loss, by an amount set by the learning rate.",
        )
        .expandable(),
        DemoSlot::Autoplay(session(
            "gradient descent",
            GradientDescent::new(config.gradient),
            GradientChart::new(area),
        )?),
    );

    let last_line = EPOCH_LINES.len() - 1;
    add(
        SECTION_NAMES[1],
        SectionText::new(
            "Decision boundaries",
            "A classifier draws a line between two groups of points. Each epoch nudges the \
             line until it separates them.",
        ),
        DemoSlot::Autoplay(session(
            "decision boundary",
            EpochSweep::new(last_line, config.boundary.tick),
            BoundaryChart::new(
                area,
                two_clusters(config.boundary.seed, config.boundary.per_class),
            ),
        )?),
    );

    add(
        SECTION_NAMES[2],
        SectionText::new(
            "Optimizers",
            "Plain gradient descent and momentum start from the same point on the same bowl. \
             Momentum overshoots, then catches up.",
        ),
        DemoSlot::Autoplay(session(
            "optimizer race",
            OptimizerRace::new(config.optimizers.clone()),
            OptimizerChart::new(area),
        )?),
    );

    add(
        SECTION_NAMES[3],
        SectionText::new(
            "Bias and variance",
            "Simple models miss the pattern. Complex models memorise the noise. The best model \
             sits in between.",
        )
        .expandable(),
        DemoSlot::Autoplay(session(
            "bias variance",
            BiasVariance::new(config.bias_variance),
            BiasVarianceChart::new(area),
        )?),
    );

    add(
        SECTION_NAMES[4],
        SectionText::new(
            "Learned features",
            "A network does not just draw a line. It moves the points themselves until a line \
             is enough.",
        ),
        DemoSlot::Autoplay(session(
            "feature space",
            EpochSweep::new(config.feature_space.last_epoch, config.feature_space_tick),
            FeatureSpaceChart::new(area, &config.feature_space),
        )?),
    );

    add(
        SECTION_NAMES[5],
        SectionText::new(
            "Knowing when to stop",
            "Scroll to train. Training loss keeps falling, but past a point the validation \
             loss turns back up.",
        ),
        DemoSlot::ScrollLinked(LossCurve::new(LossChart::new(area.with_margin(LOSS_MARGIN)))),
    );

    Ok(page)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn standard_page_has_every_section_in_order() {
        let page = standard_page(&PageConfig::default()).unwrap();
        assert_eq!(page.len(), SECTION_NAMES.len());
        for (id, name) in page.ids().zip(SECTION_NAMES) {
            assert_eq!(page.section(id).unwrap().name(), name);
            assert_eq!(page.find(name), Some(id));
        }
    }

    #[test]
    fn only_the_loss_section_is_scroll_linked() {
        let page = standard_page(&PageConfig::default()).unwrap();
        for id in page.ids() {
            let section = page.section(id).unwrap();
            let scroll_linked = matches!(section.demo(), DemoSlot::ScrollLinked(_));
            assert_eq!(scroll_linked, section.name() == "loss", "{}", section.name());
        }
    }
}
