// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility gates.
//!
//! A gate watches one region and reports its first qualifying intersection exactly once.
//! Intersection delivery is at-least-once and may repeat for the same crossing (scrolling
//! back and forth); the write-once `revealed` flag absorbs the repeats.

use core::hash::Hash;

use hashbrown::HashMap;

/// Tracks the visibility of one observed region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityGate {
    threshold: f64,
    revealed: bool,
    visible: bool,
}

impl VisibilityGate {
    /// Creates a gate that qualifies once at least `threshold` of the region is visible.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            revealed: false,
            visible: false,
        }
    }

    /// The visible fraction required to qualify.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the gate has fired.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Whether the most recent notification qualified.
    ///
    /// Unlike [`VisibilityGate::is_revealed`], this follows the region in and out of view.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Delivers one intersection notification.
    ///
    /// Returns `true` exactly once: on the first notification whose `ratio` is non-zero and
    /// at least the threshold.
    #[must_use]
    pub fn notify(&mut self, ratio: f64) -> bool {
        self.visible = ratio > 0.0 && ratio >= self.threshold;
        if self.visible && !self.revealed {
            self.revealed = true;
            return true;
        }
        false
    }

    /// Like [`VisibilityGate::notify`], invoking `on_first_visible` synchronously when the
    /// gate fires.
    pub fn notify_with(&mut self, ratio: f64, on_first_visible: impl FnOnce()) {
        if self.notify(ratio) {
            on_first_visible();
        }
    }
}

/// A set of gates keyed by region.
///
/// Notifications for regions that were never observed, or have since been removed, are
/// ignored: a missing region simply never fires.
#[derive(Clone, Debug)]
pub struct GateSet<K> {
    gates: HashMap<K, VisibilityGate>,
}

impl<K> Default for GateSet<K> {
    fn default() -> Self {
        Self {
            gates: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> GateSet<K> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts observing `region`. Re-observing an existing region keeps its state.
    pub fn observe(&mut self, region: K, threshold: f64) {
        self.gates
            .entry(region)
            .or_insert_with(|| VisibilityGate::new(threshold));
    }

    /// Stops observing `region`.
    pub fn unobserve(&mut self, region: &K) -> Option<VisibilityGate> {
        self.gates.remove(region)
    }

    /// Returns the gate for `region`.
    pub fn get(&self, region: &K) -> Option<&VisibilityGate> {
        self.gates.get(region)
    }

    /// Delivers a notification for `region`; see [`VisibilityGate::notify`].
    #[must_use]
    pub fn notify(&mut self, region: &K, ratio: f64) -> bool {
        self.gates
            .get_mut(region)
            .is_some_and(|gate| gate.notify(ratio))
    }
}
