// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM wiring. Only built for `wasm32`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scrolly_charts::to_svg_string;
use scrolly_core::{InputEvent, ScrollMetrics};
use scrolly_demos::{PageConfig, SectionId, SectionSnapshot, standard_page};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlInputElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::dom_ids::{ElementIds, controls_class, parse_button, parse_slider};
use crate::pump::Pump;

/// Visibility ratios the observer reports; they bracket every gate threshold.
const OBSERVER_THRESHOLDS: [f64; 7] = [0.0, 0.1, 0.15, 0.2, 0.4, 0.7, 1.0];

struct Host {
    window: Window,
    document: Document,
    pump: RefCell<Pump>,
    /// Section slug and element ids, indexed by `SectionId`.
    sections: Vec<(&'static str, ElementIds)>,
}

fn js_error(err: impl core::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Builds the standard page and binds it to the sections present in the document.
///
/// Sections whose container is missing are skipped: they never become visible.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("scrolly_web: missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| js_error("scrolly_web: missing document"))?;
    let page = standard_page(&PageConfig::default()).map_err(js_error)?;
    let sections = page
        .ids()
        .filter_map(|id| page.section(id).ok())
        .map(|s| (s.name(), ElementIds::for_section(s.name())))
        .collect();
    let host = Rc::new(Host {
        window,
        document,
        pump: RefCell::new(Pump::new(page)),
        sections,
    });

    observe_sections(&host)?;
    listen_scroll(&host)?;
    listen_inputs(&host)?;
    run_frames(&host)?;
    log::debug!("scrolly_web started with {} sections", host.sections.len());
    Ok(())
}

impl Host {
    fn now(&self) -> Duration {
        let ms = self.window.performance().map_or(0.0, |p| p.now());
        Duration::from_secs_f64(ms.max(0.0) / 1_000.0)
    }

    fn section_id(&self, element_id: &str) -> Option<SectionId> {
        let name = ElementIds::section_name(element_id)?;
        self.sections
            .iter()
            .position(|(n, _)| *n == name)
            .map(SectionId)
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Brings the clock up to date before an event is applied.
    fn catch_up(&self) -> Result<(), JsValue> {
        let now = self.now();
        self.pump.borrow_mut().advance(now).map_err(js_error)?;
        Ok(())
    }

    fn dispatch(&self, id: SectionId, event: InputEvent) {
        if let Err(err) = self.catch_up() {
            log::warn!("input: {err:?}");
        }
        match self.pump.borrow_mut().on_input(id, event) {
            Ok(outcome) => log::debug!("{id}: {event:?} -> {outcome:?}"),
            Err(err) => log::warn!("input: {err}"),
        }
    }

    fn paint(&self, snapshot: &SectionSnapshot) {
        let Some((_, ids)) = self.sections.get(snapshot.id.0) else {
            return;
        };
        if let Some(el) = self.element(&ids.heading) {
            el.set_text_content(Some(&snapshot.heading));
        }
        if let Some(el) = self.element(&ids.paragraph) {
            el.set_text_content(Some(&snapshot.paragraph));
        }
        if let Some(el) = self.element(&ids.chart)
            && !snapshot.frame.is_empty()
        {
            let svg = to_svg_string(&snapshot.frame, Some((snapshot.clip, &ids.clip)));
            el.set_inner_html(&svg);
        }
        if let Some(el) = self.element(&ids.controls) {
            el.set_class_name(controls_class(snapshot.controls_phase));
        }
        if let Some(el) = self.element(&ids.expand) {
            el.set_class_name(if snapshot.expand_visible {
                "expand shown"
            } else {
                "expand hidden"
            });
        }
        if let Some(el) = self.element(&ids.status) {
            el.set_text_content(Some(&snapshot.status));
        }
        if let (Some(value), Some(el)) = (snapshot.slider_value, self.element(&ids.slider))
            && let Ok(input) = el.dyn_into::<HtmlInputElement>()
        {
            input.set_value(&value.to_string());
        }
    }
}

fn observe_sections(host: &Rc<Host>) -> Result<(), JsValue> {
    let h = host.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        if let Err(err) = h.catch_up() {
            log::warn!("intersection: {err:?}");
        }
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let Some(id) = h.section_id(&entry.target().id()) else {
                continue;
            };
            let ratio = entry.intersection_ratio();
            if let Err(err) = h.pump.borrow_mut().on_intersection(id, ratio) {
                log::warn!("intersection: {err}");
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let thresholds: js_sys::Array = OBSERVER_THRESHOLDS.iter().map(|&t| JsValue::from(t)).collect();
    let options = IntersectionObserverInit::new();
    options.set_threshold(&thresholds);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for (_, ids) in &host.sections {
        match host.element(&ids.section) {
            Some(el) => observer.observe(&el),
            None => log::warn!("#{} is missing; section never reveals", ids.section),
        }
    }
    callback.forget();
    Ok(())
}

fn listen_scroll(host: &Rc<Host>) -> Result<(), JsValue> {
    let h = host.clone();
    let callback = Closure::wrap(Box::new(move |_: Event| {
        let viewport_height = h
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or_default();
        for (index, (_, ids)) in h.sections.iter().enumerate() {
            let Some(el) = h.element(&ids.section) else {
                continue;
            };
            let rect = el.get_bounding_client_rect();
            let metrics = ScrollMetrics {
                viewport_height,
                section_top: rect.top(),
                section_height: rect.height(),
            };
            if let Err(err) = h.pump.borrow_mut().on_scroll(SectionId(index), metrics) {
                log::warn!("scroll: {err}");
            }
        }
    }) as Box<dyn FnMut(Event)>);
    host.window
        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn listen_inputs(host: &Rc<Host>) -> Result<(), JsValue> {
    for (index, (_, ids)) in host.sections.iter().enumerate() {
        let id = SectionId(index);

        if let Some(slider) = host.element(&ids.slider) {
            let h = host.clone();
            let callback = Closure::wrap(Box::new(move |e: Event| {
                let Some(target) = e.target() else {
                    return;
                };
                let input: &HtmlInputElement = target.unchecked_ref();
                if let Some(value) = parse_slider(&input.value()) {
                    h.dispatch(id, InputEvent::Slider(value));
                }
            }) as Box<dyn FnMut(Event)>);
            slider.add_event_listener_with_callback("input", callback.as_ref().unchecked_ref())?;
            callback.forget();
        }

        let buttons = host
            .document
            .query_selector_all(&format!("#{} [data-action]", ids.controls))?;
        for i in 0..buttons.length() {
            let Some(node) = buttons.item(i) else {
                continue;
            };
            let Ok(el) = node.dyn_into::<Element>() else {
                continue;
            };
            let Some(button) = el.get_attribute("data-action").and_then(|a| parse_button(&a))
            else {
                log::warn!("#{}: unknown button action", ids.controls);
                continue;
            };
            let h = host.clone();
            let callback = Closure::wrap(Box::new(move |_: Event| {
                h.dispatch(id, InputEvent::Button(button));
            }) as Box<dyn FnMut(Event)>);
            el.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
            callback.forget();
        }
    }
    Ok(())
}

fn run_frames(host: &Rc<Host>) -> Result<(), JsValue> {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let h = host.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = h.now();
        let dirty = {
            let mut pump = h.pump.borrow_mut();
            pump.advance(now).and_then(|_| pump.dirty())
        };
        match dirty {
            Ok(dirty) => {
                for snapshot in &dirty {
                    h.paint(snapshot);
                }
            }
            Err(err) => log::warn!("frame: {err}"),
        }
        if let Some(next) = f.borrow().as_ref()
            && let Err(err) = h
                .window
                .request_animation_frame(next.as_ref().unchecked_ref())
        {
            log::warn!("requestAnimationFrame: {err:?}");
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        host.window
            .request_animation_frame(first.as_ref().unchecked_ref())?;
    }
    Ok(())
}
