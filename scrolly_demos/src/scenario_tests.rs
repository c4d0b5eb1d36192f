// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec::Vec;
use core::time::Duration;
use std::cell::RefCell;
use std::rc::Rc;

use scrolly_core::{
    AutoplaySession, AutoplayState, Button, ControlsPhase, InputEvent, ManualScheduler,
    RevealTiming, Tick,
};

use crate::{
    DemoSlot, EpochSweep, HeadlessPage, OptimizerRace, Page, PageConfig, PageError, PageLayout,
    SECTION_NAMES, Section, SectionId, SectionText, Trajectory, standard_page,
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// The standard page with 1000px sections under an 800px viewport.
fn standard() -> HeadlessPage {
    let page = standard_page(&PageConfig::default()).unwrap();
    let layout = PageLayout::uniform(800.0, SECTION_NAMES.len(), 1000.0);
    HeadlessPage::new(page, layout).unwrap()
}

fn id(h: &HeadlessPage, name: &str) -> SectionId {
    h.page().find(name).unwrap()
}

fn autoplay(h: &HeadlessPage, id: SectionId) -> AutoplayState {
    h.snapshot(id).unwrap().autoplay.unwrap()
}

fn step_index(h: &HeadlessPage, id: SectionId) -> usize {
    h.page().section(id).unwrap().session().unwrap().step_index()
}

fn run_session<M, R>(s: &mut AutoplaySession<M, R>, sched: &mut ManualScheduler<Tick>, until: u64)
where
    M: scrolly_core::Model,
    R: scrolly_core::RenderAdapter<M::State>,
{
    let deadline = ms(until);
    while let Some(f) = sched.pop_due(deadline) {
        s.on_timer(f.handle, sched);
    }
    sched.advance_to(deadline);
}

#[test]
fn revealing_a_chart_starts_only_its_own_autoplay() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    let boundary = id(&h, "boundary");
    assert_eq!(autoplay(&h, gradient), AutoplayState::Idle);

    h.scroll_to(0.0).unwrap();
    assert_eq!(autoplay(&h, gradient), AutoplayState::Running);
    assert_eq!(autoplay(&h, boundary), AutoplayState::Idle, "still below the fold");
}

#[test]
fn gates_fire_once_when_scrolling_back_and_forth() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    h.scroll_to(0.0).unwrap();
    let pending = h.scheduler().pending();

    h.scroll_to(100.0).unwrap();
    h.scroll_to(0.0).unwrap();
    h.scroll_to(50.0).unwrap();
    assert_eq!(h.scheduler().pending(), pending, "no duplicate timers");
    assert_eq!(step_index(&h, gradient), 0);

    h.run_until(ms(300)).unwrap();
    assert_eq!(step_index(&h, gradient), 1, "one tick, not several");
}

#[test]
fn gradient_autoplay_steps_then_completes_at_forty() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    h.scroll_to(0.0).unwrap();

    h.run_until(ms(299)).unwrap();
    assert_eq!(step_index(&h, gradient), 0, "first tick after one interval");
    h.run_until(ms(300)).unwrap();
    let status = h.snapshot(gradient).unwrap().status;
    assert!(status.starts_with("θ = 3.600"), "{status}");

    h.run_until(ms(39 * 300)).unwrap();
    assert_eq!(autoplay(&h, gradient), AutoplayState::Running);
    h.run_until(ms(40 * 300)).unwrap();
    assert_eq!(autoplay(&h, gradient), AutoplayState::Completed);
    assert_eq!(step_index(&h, gradient), 40, "the step budget ends the run");

    h.run_until(ms(60_000)).unwrap();
    assert_eq!(step_index(&h, gradient), 40, "no ticks after completion");
}

#[test]
fn wipe_uncovers_the_chart_over_two_seconds() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    assert_eq!(h.snapshot(gradient).unwrap().clip.height(), 0.0, "hidden before reveal");

    h.scroll_to(0.0).unwrap();
    h.run_until(ms(1_000)).unwrap();
    let snap = h.snapshot(gradient).unwrap();
    assert!((snap.clip.height() - 250.0).abs() < 1e-9, "{:?}", snap.clip);

    h.run_until(ms(2_000)).unwrap();
    let snap = h.snapshot(gradient).unwrap();
    assert_eq!(snap.clip, snap.frame.view);
}

#[test]
fn input_preempts_autoplay_for_good() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    h.scroll_to(0.0).unwrap();
    h.run_until(ms(600)).unwrap();
    assert_eq!(step_index(&h, gradient), 2);

    let outcome = h.input(gradient, InputEvent::Button(Button::Step)).unwrap();
    assert!(outcome.preempted);
    assert!(!outcome.playing);
    assert_eq!(autoplay(&h, gradient), AutoplayState::Cancelled);
    assert_eq!(step_index(&h, gradient), 3, "the input still applies");

    h.run_until(ms(10_000)).unwrap();
    assert_eq!(step_index(&h, gradient), 3, "the pending tick was dropped");

    h.scroll_to(500.0).unwrap();
    h.scroll_to(0.0).unwrap();
    h.run_until(ms(20_000)).unwrap();
    assert_eq!(autoplay(&h, gradient), AutoplayState::Cancelled, "never re-armed");

    let again = h.input(gradient, InputEvent::Button(Button::Step)).unwrap();
    assert!(!again.preempted, "only a running autoplay is pre-empted");
}

#[test]
fn slider_survives_an_idempotent_reset() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    h.scroll_to(0.0).unwrap();
    h.run_until(ms(900)).unwrap();

    h.input(gradient, InputEvent::Slider(0.5)).unwrap();
    assert_eq!(h.snapshot(gradient).unwrap().slider_value, Some(0.5));

    h.input(gradient, InputEvent::Button(Button::Reset)).unwrap();
    let first = h.snapshot(gradient).unwrap();
    h.input(gradient, InputEvent::Button(Button::Reset)).unwrap();
    let second = h.snapshot(gradient).unwrap();
    assert_eq!(first, second, "reset twice is reset once");
    assert_eq!(first.status, "θ = 4.000, loss = 9.000, learning rate = 0.50");
    assert_eq!(first.autoplay, Some(AutoplayState::Cancelled));
}

#[test]
fn completed_autoplay_is_terminal() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    h.scroll_to(0.0).unwrap();
    h.run_until(ms(40 * 300)).unwrap();

    let outcome = h.input(gradient, InputEvent::Button(Button::Reset)).unwrap();
    assert!(!outcome.preempted);
    assert_eq!(autoplay(&h, gradient), AutoplayState::Completed);
    assert_eq!(step_index(&h, gradient), 0, "reset still restores the start");
}

#[test]
fn animate_after_a_completed_run_continues_to_convergence() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    h.scroll_to(0.0).unwrap();
    h.run_until(ms(40 * 300)).unwrap();
    assert_eq!(autoplay(&h, gradient), AutoplayState::Completed);

    let outcome = h.input(gradient, InputEvent::Button(Button::PlayPause)).unwrap();
    assert!(outcome.playing);
    h.run_until(ms(40 * 300 + 300)).unwrap();
    assert!(h.snapshot(gradient).unwrap().playing, "past the autoplay budget");

    h.run_until(ms(60_000)).unwrap();
    let snap = h.snapshot(gradient).unwrap();
    assert!(!snap.playing, "stopped once |θ| < 0.01");
    // 4 * 0.9^57 is the first iterate under the tolerance.
    assert_eq!(step_index(&h, gradient), 57);
    assert_eq!(snap.autoplay, Some(AutoplayState::Completed));
}

#[test]
fn playback_runs_after_autoplay_is_cancelled() {
    let mut h = standard();
    let gradient = id(&h, "gradient");
    h.scroll_to(0.0).unwrap();
    h.run_until(ms(300)).unwrap();

    let outcome = h.input(gradient, InputEvent::Button(Button::PlayPause)).unwrap();
    assert!(outcome.preempted);
    assert!(outcome.playing);
    h.run_until(ms(300 + 3 * 300)).unwrap();
    assert_eq!(step_index(&h, gradient), 4);
    assert_eq!(autoplay(&h, gradient), AutoplayState::Cancelled);

    let outcome = h.input(gradient, InputEvent::Button(Button::PlayPause)).unwrap();
    assert!(!outcome.playing);
    h.run_until(ms(10_000)).unwrap();
    assert_eq!(step_index(&h, gradient), 4);
}

#[test]
fn epoch_sweep_visits_every_epoch_in_order() {
    let renders: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = renders.clone();
    let mut s = AutoplaySession::builder(EpochSweep::new(50, ms(120)))
        .renderer(move |epoch: &usize| sink.borrow_mut().push(*epoch))
        .build()
        .unwrap();
    let mut sched = ManualScheduler::<Tick>::new();
    assert!(s.run_once(&mut sched));

    run_session(&mut s, &mut sched, 50 * 120 - 1);
    assert_eq!(s.state(), AutoplayState::Running);
    run_session(&mut s, &mut sched, 50 * 120);
    assert_eq!(s.state(), AutoplayState::Completed);
    assert_eq!(s.step_index(), 50);
    let expected: Vec<usize> = (0..=50).collect();
    assert_eq!(*renders.borrow(), expected, "initial render, then one per epoch");
    assert_eq!(sched.pending(), 0);
}

#[test]
fn optimizer_race_waits_for_the_slowest() {
    let mut s = AutoplaySession::builder(OptimizerRace::default())
        .renderer(|_: &Vec<Trajectory>| {})
        .build()
        .unwrap();
    let mut sched = ManualScheduler::<Tick>::new();
    s.run_once(&mut sched);

    run_session(&mut s, &mut sched, 14 * 80);
    assert_eq!(s.state(), AutoplayState::Running);
    let converged: Vec<bool> = s.sim().iter().map(|t| s.model().has_converged(t)).collect();
    assert_eq!(converged, [true, false], "SGD arrives first");

    run_session(&mut s, &mut sched, 15 * 80);
    assert_eq!(s.state(), AutoplayState::Completed);
    assert_eq!(s.step_index(), 15);
}

#[test]
fn section_controls_wait_for_both_texts() {
    let mut page = Page::new();
    let section = page.push(Section::new(
        "timing",
        SectionText::new("0123456789", "abcdefghijklmnopqrst"),
        DemoSlot::Empty,
        RevealTiming::default(),
    ));
    let mut h = HeadlessPage::new(page, PageLayout::uniform(800.0, 1, 1000.0)).unwrap();
    h.scroll_to(0.0).unwrap();

    h.run_until(ms(1_289)).unwrap();
    let snap = h.snapshot(section).unwrap();
    assert_eq!(snap.controls_phase, ControlsPhase::Hidden, "never before 1290ms");
    assert_eq!(snap.heading, "0123456789");
    assert_eq!(snap.paragraph, "abcdefghijklmnopqrs");

    h.run_until(ms(1_290 + 2 * 16)).unwrap();
    assert_eq!(h.snapshot(section).unwrap().controls_phase, ControlsPhase::FadingIn);
    h.run_until(ms(1_290 + 2 * 16 + 500)).unwrap();
    assert_eq!(h.snapshot(section).unwrap().controls_phase, ControlsPhase::Shown);
}

#[test]
fn loss_curve_follows_scroll_only_while_visible() {
    let mut h = standard();
    let loss = id(&h, "loss");

    h.scroll_to(4_200.0).unwrap();
    assert!(h.snapshot(loss).unwrap().status.starts_with("epoch 0:"));

    h.scroll_to(4_500.0).unwrap();
    let status = h.snapshot(loss).unwrap().status;
    assert!(status.starts_with("epoch 26:"), "{status}");

    h.scroll_to(0.0).unwrap();
    let status = h.snapshot(loss).unwrap().status;
    assert!(status.starts_with("epoch 26:"), "hidden sections ignore scrolling: {status}");
}

#[test]
fn host_errors_name_the_section() {
    let mut h = standard();
    let missing = SectionId(99);
    assert_eq!(
        h.input(missing, InputEvent::Button(Button::Step)),
        Err(PageError::UnknownSection(missing))
    );
    let loss = id(&h, "loss");
    assert_eq!(
        h.input(loss, InputEvent::Button(Button::Reset)),
        Err(PageError::NotInteractive(loss))
    );
}
