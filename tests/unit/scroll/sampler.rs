use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{animation::ease::Ease, host::ManualScrollSource};

fn linear(ms: u64) -> SmoothingConfig {
    SmoothingConfig {
        duration_ms: ms,
        ease: Ease::Linear,
    }
}

fn running(ms: u64) -> ScrollSampler<ManualScrollSource> {
    let mut s = ScrollSampler::new(ManualScrollSource::new(0.0), &linear(ms));
    assert!(s.start(TimeMs(0)));
    s
}

#[test]
fn duplicate_start_is_a_noop() {
    let mut s = ScrollSampler::new(ManualScrollSource::new(120.0), &linear(100));
    assert!(s.start(TimeMs(0)));
    assert!(!s.start(TimeMs(1)));
    assert_eq!(s.source().attach_calls(), 1);
    assert_eq!(s.source().attached_count(), 1);
    assert_eq!(s.offset().px(), 120.0);
}

#[test]
fn first_frame_after_start_emits_source_position() {
    let mut s = ScrollSampler::new(ManualScrollSource::new(64.0), &linear(100));
    assert_eq!(s.frame(TimeMs(0)), None);
    s.start(TimeMs(0));
    assert_eq!(s.frame(TimeMs(16)), Some(ScrollOffset::new(64.0)));
    assert_eq!(s.frame(TimeMs(32)), None);
}

#[test]
fn many_events_coalesce_into_one_callback_per_frame() {
    let mut s = running(100);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    s.subscribe(move |o| sink.borrow_mut().push(o.px()));

    s.frame(TimeMs(0));
    for y in [10.0, 20.0, 30.0, 40.0] {
        s.on_scroll(y, TimeMs(5));
    }
    assert!(s.frame(TimeMs(16)).is_some());
    assert_eq!(s.frame(TimeMs(16)), None);

    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn smoothing_keeps_emitting_until_settled() {
    let mut s = running(100);
    s.frame(TimeMs(0));
    s.on_scroll(100.0, TimeMs(0));

    assert_eq!(s.frame(TimeMs(50)).map(|o| o.px()), Some(50.0));
    assert_eq!(s.frame(TimeMs(100)).map(|o| o.px()), Some(100.0));
    assert_eq!(s.frame(TimeMs(150)), None);
}

#[test]
fn stop_suspends_emission_and_resume_retargets() {
    let mut s = running(100);
    s.frame(TimeMs(0));

    assert!(s.stop(TimeMs(0)));
    assert!(!s.stop(TimeMs(1)));
    s.on_scroll(300.0, TimeMs(10));
    assert_eq!(s.frame(TimeMs(16)), None);
    assert_eq!(s.raw(), 300.0);
    assert_eq!(s.offset().px(), 0.0);

    assert!(s.start(TimeMs(100)));
    assert_eq!(s.frame(TimeMs(150)).map(|o| o.px()), Some(150.0));
    assert_eq!(s.frame(TimeMs(200)).map(|o| o.px()), Some(300.0));
}

#[test]
fn destroy_detaches_and_is_terminal() {
    let mut s = running(100);
    s.destroy();
    assert_eq!(s.state(), SamplerState::Destroyed);
    assert_eq!(s.source().attached_count(), 0);

    assert!(!s.start(TimeMs(5)));
    s.on_scroll(10.0, TimeMs(6));
    assert_eq!(s.frame(TimeMs(16)), None);
    s.destroy();
}

#[test]
fn stopped_time_does_not_advance_the_glide() {
    let mut s = running(100);
    s.frame(TimeMs(0));
    s.on_scroll(100.0, TimeMs(0));
    assert_eq!(s.frame(TimeMs(50)).map(|o| o.px()), Some(50.0));

    assert!(s.stop(TimeMs(50)));
    assert_eq!(s.offset().px(), 50.0);

    assert!(s.start(TimeMs(80)));
    assert_eq!(s.frame(TimeMs(80)).map(|o| o.px()), Some(50.0));
    assert_eq!(s.frame(TimeMs(105)).map(|o| o.px()), Some(75.0));
    assert_eq!(s.frame(TimeMs(130)).map(|o| o.px()), Some(100.0));
}
