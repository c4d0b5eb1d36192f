// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element naming shared by the host page's markup and the listeners.

use scrolly_core::{Button, ControlsPhase};

/// Element ids of one section, derived from its slug.
///
/// A section named `gradient` lives in `#scrolly-gradient` and its chart in
/// `#scrolly-gradient-chart`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementIds {
    /// Section container; the element the intersection observer watches.
    pub section: String,
    /// Heading being typed.
    pub heading: String,
    /// Paragraph being typed.
    pub paragraph: String,
    /// Container the serialized chart is swapped into.
    pub chart: String,
    /// Controls container; buttons inside it carry a `data-action` attribute.
    pub controls: String,
    /// Range input.
    pub slider: String,
    /// Status line.
    pub status: String,
    /// "Expand details" affordance.
    pub expand: String,
    /// Clip path id used inside the chart markup.
    pub clip: String,
}

impl ElementIds {
    /// Ids for the section named `name`.
    pub fn for_section(name: &str) -> Self {
        let base = format!("scrolly-{name}");
        Self {
            heading: format!("{base}-heading"),
            paragraph: format!("{base}-paragraph"),
            chart: format!("{base}-chart"),
            controls: format!("{base}-controls"),
            slider: format!("{base}-slider"),
            status: format!("{base}-status"),
            expand: format!("{base}-expand"),
            clip: format!("{base}-clip"),
            section: base,
        }
    }

    /// Recovers the slug from a section container id.
    pub fn section_name(element_id: &str) -> Option<&str> {
        element_id
            .strip_prefix("scrolly-")
            .filter(|name| !name.is_empty())
    }
}

/// The `data-action` value of a button.
pub fn button_action(button: Button) -> &'static str {
    match button {
        Button::Reset => "reset",
        Button::Step => "step",
        Button::PlayPause => "play",
    }
}

/// Parses a `data-action` value.
pub fn parse_button(action: &str) -> Option<Button> {
    match action.trim() {
        "reset" => Some(Button::Reset),
        "step" => Some(Button::Step),
        "play" => Some(Button::PlayPause),
        _ => None,
    }
}

/// Parses a range input's value. Non-finite and malformed values are rejected.
pub fn parse_slider(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Class list of the controls container for a phase.
///
/// The stylesheet transitions opacity between `fading-in` and `shown`.
pub fn controls_class(phase: ControlsPhase) -> &'static str {
    match phase {
        ControlsPhase::Hidden => "controls hidden",
        ControlsPhase::FadingIn => "controls fading-in",
        ControlsPhase::Shown => "controls shown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_the_section_slug() {
        let ids = ElementIds::for_section("bias-variance");
        assert_eq!(ids.section, "scrolly-bias-variance");
        assert_eq!(ids.chart, "scrolly-bias-variance-chart");
        assert_eq!(ElementIds::section_name(&ids.section), Some("bias-variance"));
        assert_eq!(ElementIds::section_name("scrolly-"), None);
        assert_eq!(ElementIds::section_name("other"), None);
    }

    #[test]
    fn button_actions_parse_back() {
        for button in [Button::Reset, Button::Step, Button::PlayPause] {
            assert_eq!(parse_button(button_action(button)), Some(button));
        }
        assert_eq!(parse_button("jump"), None, "unknown actions are ignored");
    }

    #[test]
    fn slider_values_must_be_finite_numbers() {
        assert_eq!(parse_slider(" 0.25 "), Some(0.25));
        assert_eq!(parse_slider("NaN"), None);
        assert_eq!(parse_slider("inf"), None);
        assert_eq!(parse_slider(""), None);
    }
}
