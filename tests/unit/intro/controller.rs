use super::*;
use crate::{host::StaticReadiness, intro::scheduler::VirtualClock};

#[derive(Debug, Default)]
struct GateLog {
    running: bool,
    calls: Vec<(&'static str, TimeMs)>,
}

impl ScrollGate for GateLog {
    fn suspend(&mut self, now: TimeMs) {
        self.running = false;
        self.calls.push(("suspend", now));
    }

    fn resume(&mut self, now: TimeMs) {
        self.running = true;
        self.calls.push(("resume", now));
    }
}

struct Rig {
    ctrl: IntroController,
    clock: VirtualClock,
    gate: GateLog,
}

impl Rig {
    fn new() -> Self {
        Self {
            ctrl: IntroController::new(&IntroConfig::default()),
            clock: VirtualClock::new(),
            gate: GateLog {
                running: true,
                calls: Vec::new(),
            },
        }
    }

    fn mount(&mut self, now: u64, loaded: bool, playable: bool) -> IntroPhase {
        let ready = StaticReadiness { loaded, playable };
        self.ctrl
            .mount(TimeMs(now), &ready, &ready, &mut self.clock, &mut self.gate)
    }

    fn event(&mut self, event: IntroEvent, at: u64) -> Option<IntroPhase> {
        self.ctrl
            .handle(event, TimeMs(at), &mut self.clock, &mut self.gate)
    }

    fn run_until(&mut self, now: u64) {
        while let Some(fired) = self.clock.pop_due(TimeMs(now)) {
            self.ctrl.handle(
                IntroEvent::Timer(fired.kind),
                fired.due,
                &mut self.clock,
                &mut self.gate,
            );
        }
    }
}

#[test]
fn transition_table_is_forward_only() {
    let ready = ReadinessFlags {
        dom_ready: true,
        media_ready: true,
    };
    let half = ReadinessFlags {
        dom_ready: true,
        media_ready: false,
    };
    assert_eq!(
        next_phase(IntroPhase::Idle, ready, IntroEvent::DomReady),
        Some(IntroPhase::FadingToBlack)
    );
    assert_eq!(next_phase(IntroPhase::Idle, half, IntroEvent::DomReady), None);
    assert_eq!(
        next_phase(IntroPhase::Idle, ready, IntroEvent::Timer(TimerKind::FadeDone)),
        None
    );
    assert_eq!(
        next_phase(
            IntroPhase::FadingToBlack,
            ready,
            IntroEvent::Timer(TimerKind::FadeDone)
        ),
        Some(IntroPhase::RevealingMedia)
    );
    assert_eq!(
        next_phase(
            IntroPhase::RevealingMedia,
            ready,
            IntroEvent::Timer(TimerKind::RevealDone)
        ),
        Some(IntroPhase::Complete)
    );
    for event in [
        IntroEvent::DomReady,
        IntroEvent::MediaReady,
        IntroEvent::Timer(TimerKind::MediaFallback),
        IntroEvent::Timer(TimerKind::FadeDone),
        IntroEvent::Timer(TimerKind::RevealDone),
    ] {
        assert_eq!(next_phase(IntroPhase::Complete, ready, event), None);
    }
}

#[test]
fn ready_at_mount_runs_exact_timeline() {
    let mut rig = Rig::new();
    assert_eq!(rig.mount(0, true, true), IntroPhase::FadingToBlack);
    assert!(!rig.gate.running);

    rig.run_until(999);
    assert_eq!(rig.ctrl.phase(), IntroPhase::FadingToBlack);
    rig.run_until(1000);
    assert_eq!(rig.ctrl.phase(), IntroPhase::RevealingMedia);
    assert!(!rig.gate.running);

    rig.run_until(2199);
    assert_eq!(rig.ctrl.phase(), IntroPhase::RevealingMedia);
    assert!(!rig.gate.running);
    rig.run_until(2200);
    assert_eq!(rig.ctrl.phase(), IntroPhase::Complete);
    assert!(rig.gate.running);

    assert_eq!(
        rig.gate.calls,
        vec![("suspend", TimeMs(0)), ("resume", TimeMs(2200))]
    );
    assert_eq!(rig.ctrl.entered_at(IntroPhase::RevealingMedia), Some(TimeMs(1000)));
    assert_eq!(rig.ctrl.entered_at(IntroPhase::Complete), Some(TimeMs(2200)));
}

#[test]
fn late_polling_keeps_the_cadence() {
    let mut rig = Rig::new();
    rig.mount(0, true, true);
    rig.run_until(10_000);
    assert!(rig.ctrl.is_complete());
    assert_eq!(rig.ctrl.entered_at(IntroPhase::Complete), Some(TimeMs(2200)));
    assert_eq!(rig.gate.calls.last(), Some(&("resume", TimeMs(2200))));
}

#[test]
fn waits_in_idle_for_both_signals() {
    let mut rig = Rig::new();
    assert_eq!(rig.mount(0, false, false), IntroPhase::Idle);
    rig.run_until(60_000);
    assert_eq!(rig.ctrl.phase(), IntroPhase::Idle);
    assert!(rig.gate.running);

    assert_eq!(rig.event(IntroEvent::MediaReady, 100), None);
    assert_eq!(rig.event(IntroEvent::DomReady, 300), Some(IntroPhase::FadingToBlack));
    assert_eq!(rig.clock.pending_count(), 1);
}

#[test]
fn media_fallback_fires_exactly_after_dom_ready() {
    let mut rig = Rig::new();
    rig.mount(0, false, false);
    rig.event(IntroEvent::DomReady, 400);
    assert!(!rig.ctrl.flags().media_ready);

    rig.run_until(2899);
    assert!(!rig.ctrl.flags().media_ready);
    assert_eq!(rig.ctrl.phase(), IntroPhase::Idle);

    rig.run_until(2900);
    assert!(rig.ctrl.flags().media_ready);
    assert_eq!(rig.ctrl.entered_at(IntroPhase::FadingToBlack), Some(TimeMs(2900)));
}

#[test]
fn media_signal_cancels_fallback() {
    let mut rig = Rig::new();
    rig.mount(0, true, false);
    assert_eq!(rig.clock.pending_count(), 1);

    assert_eq!(rig.event(IntroEvent::MediaReady, 700), Some(IntroPhase::FadingToBlack));
    // Only the fade timer is left.
    assert_eq!(rig.clock.pending_count(), 1);
    assert_eq!(rig.clock.next_due(), Some(TimeMs(1700)));
}

#[test]
fn duplicate_signals_and_mounts_are_noops() {
    let mut rig = Rig::new();
    rig.mount(0, true, true);
    assert_eq!(rig.mount(5, true, true), IntroPhase::FadingToBlack);
    assert_eq!(rig.event(IntroEvent::DomReady, 10), None);
    assert_eq!(rig.event(IntroEvent::MediaReady, 10), None);
    assert_eq!(rig.gate.calls.len(), 1);
    assert_eq!(rig.clock.pending_count(), 1);
}

#[test]
fn complete_never_regresses() {
    let mut rig = Rig::new();
    rig.mount(0, true, true);
    rig.run_until(3000);
    assert!(rig.ctrl.is_complete());

    assert_eq!(rig.event(IntroEvent::Timer(TimerKind::FadeDone), 3001), None);
    assert_eq!(rig.event(IntroEvent::Timer(TimerKind::RevealDone), 3002), None);
    assert_eq!(rig.event(IntroEvent::MediaReady, 3003), None);
    assert!(rig.ctrl.is_complete());
    assert_eq!(rig.gate.calls.len(), 2);
}

#[test]
fn teardown_cancels_pending_timers() {
    let mut rig = Rig::new();
    rig.mount(0, true, true);
    assert_eq!(rig.clock.pending_count(), 1);

    rig.ctrl.teardown(&mut rig.clock);
    assert_eq!(rig.clock.pending_count(), 0);
    rig.run_until(10_000);
    assert_eq!(rig.ctrl.phase(), IntroPhase::FadingToBlack);
    assert_eq!(rig.event(IntroEvent::Timer(TimerKind::FadeDone), 1000), None);
}

#[test]
fn progress_tracks_the_current_phase() {
    let mut rig = Rig::new();
    rig.mount(0, true, true);
    assert_eq!(rig.ctrl.fade_progress(TimeMs(500)), 0.5);
    assert_eq!(rig.ctrl.reveal_progress(TimeMs(500)), 0.0);

    rig.run_until(1000);
    assert_eq!(rig.ctrl.fade_progress(TimeMs(1000)), 1.0);
    assert_eq!(rig.ctrl.reveal_progress(TimeMs(1600)), 0.5);

    rig.run_until(2200);
    assert_eq!(rig.ctrl.reveal_progress(TimeMs(2200)), 1.0);
}

#[test]
fn readiness_before_mount_is_applied_at_mount() {
    let mut rig = Rig::new();
    assert_eq!(rig.event(IntroEvent::DomReady, 5), None);
    assert_eq!(rig.event(IntroEvent::MediaReady, 6), None);
    assert_eq!(rig.ctrl.phase(), IntroPhase::Idle);
    assert_eq!(rig.ctrl.entered_at(IntroPhase::Idle), None);
    assert_eq!(rig.clock.pending_count(), 0);
    assert!(rig.gate.calls.is_empty());

    assert_eq!(rig.mount(10, false, false), IntroPhase::FadingToBlack);
    assert_eq!(rig.ctrl.entered_at(IntroPhase::Idle), Some(TimeMs(10)));
    assert_eq!(rig.ctrl.entered_at(IntroPhase::FadingToBlack), Some(TimeMs(10)));
    assert_eq!(rig.clock.next_due(), Some(TimeMs(1010)));
}

#[test]
fn early_document_ready_arms_fallback_from_mount() {
    let mut rig = Rig::new();
    rig.event(IntroEvent::DomReady, 5);
    assert_eq!(rig.mount(10, false, false), IntroPhase::Idle);
    assert_eq!(rig.clock.next_due(), Some(TimeMs(2510)));
}
