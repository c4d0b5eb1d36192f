// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for the explainer page.
//!
//! The host wires browser capabilities to a [`scrolly_demos::Page`]:
//! - one `IntersectionObserver` feeds visibility ratios;
//! - a `scroll` listener feeds section geometry;
//! - `input` and `click` listeners feed slider and button events;
//! - a `requestAnimationFrame` loop advances a virtual clock from `performance.now()`,
//!   fires due timers and repaints the sections whose snapshot changed.
//!
//! Notes:
//! - `web-sys`/`wasm-bindgen` are only used on `wasm32` targets.
//! - [`Pump`] and the element naming helpers are plain Rust and build everywhere.

mod dom_ids;
#[cfg(target_arch = "wasm32")]
mod host;
mod pump;

pub use dom_ids::{ElementIds, button_action, controls_class, parse_button, parse_slider};
#[cfg(target_arch = "wasm32")]
pub use host::start;
pub use pump::Pump;
