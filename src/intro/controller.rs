use crate::{
    config::IntroConfig,
    foundation::core::TimeMs,
    host::{DocumentState, MediaElement, ScrollSource},
    intro::{
        phase::{IntroPhase, ReadinessFlags},
        scheduler::{Scheduler, TimerId, TimerKind},
    },
    scroll::sampler::ScrollSampler,
};

/// What the intro may do to scrolling: pause it and resume it, nothing else.
pub trait ScrollGate {
    fn suspend(&mut self, now: TimeMs);
    fn resume(&mut self, now: TimeMs);
}

impl<S: ScrollSource> ScrollGate for ScrollSampler<S> {
    fn suspend(&mut self, now: TimeMs) {
        self.stop(now);
    }

    fn resume(&mut self, now: TimeMs) {
        self.start(now);
    }
}

impl<G: ScrollGate> ScrollGate for Option<G> {
    fn suspend(&mut self, now: TimeMs) {
        if let Some(g) = self {
            g.suspend(now);
        }
    }

    fn resume(&mut self, now: TimeMs) {
        if let Some(g) = self {
            g.resume(now);
        }
    }
}

/// Input to the intro state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum IntroEvent {
    DomReady,
    MediaReady,
    Timer(TimerKind),
}

/// The transition function: where `event` takes `phase`, given the readiness already recorded.
pub fn next_phase(phase: IntroPhase, flags: ReadinessFlags, event: IntroEvent) -> Option<IntroPhase> {
    match (phase, event) {
        (
            IntroPhase::Idle,
            IntroEvent::DomReady | IntroEvent::MediaReady | IntroEvent::Timer(TimerKind::MediaFallback),
        ) if flags.all() => Some(IntroPhase::FadingToBlack),
        (IntroPhase::FadingToBlack, IntroEvent::Timer(TimerKind::FadeDone)) => {
            Some(IntroPhase::RevealingMedia)
        }
        (IntroPhase::RevealingMedia, IntroEvent::Timer(TimerKind::RevealDone)) => {
            Some(IntroPhase::Complete)
        }
        _ => None,
    }
}

/// Runs the one-time intro: wait for readiness, fade, reveal, then hand scrolling back.
#[derive(Debug)]
pub struct IntroController {
    cfg: IntroConfig,
    phase: IntroPhase,
    flags: ReadinessFlags,
    fallback: Option<TimerId>,
    phase_timer: Option<TimerId>,
    entered_at: [Option<TimeMs>; 4],
    early: Vec<IntroEvent>,
    mounted: bool,
    torn_down: bool,
}

impl IntroController {
    pub fn new(cfg: &IntroConfig) -> Self {
        Self {
            cfg: cfg.clone(),
            phase: IntroPhase::Idle,
            flags: ReadinessFlags::default(),
            fallback: None,
            phase_timer: None,
            entered_at: [None; 4],
            early: Vec::new(),
            mounted: false,
            torn_down: false,
        }
    }

    /// Enter `Idle` and pick up readiness that already happened before mount, both from the
    /// queries and from signals handed to [`IntroController::handle`] earlier. Those count as
    /// observed at `now`.
    ///
    /// A second call is a no-op.
    #[tracing::instrument(skip_all, fields(now = now.0))]
    pub fn mount(
        &mut self,
        now: TimeMs,
        document: &impl DocumentState,
        media: &impl MediaElement,
        sched: &mut impl Scheduler,
        gate: &mut impl ScrollGate,
    ) -> IntroPhase {
        if self.mounted {
            tracing::warn!("intro controller already mounted");
            return self.phase;
        }
        self.mounted = true;
        self.entered_at[IntroPhase::Idle.index()] = Some(now);

        let early = std::mem::take(&mut self.early);
        let media_ready = media.has_playable_data() || early.contains(&IntroEvent::MediaReady);
        let dom_ready = document.is_loaded() || early.contains(&IntroEvent::DomReady);
        if media_ready {
            self.handle(IntroEvent::MediaReady, now, sched, gate);
        }
        if dom_ready {
            self.handle(IntroEvent::DomReady, now, sched, gate);
        }
        self.phase
    }

    /// Feed one event observed at `at`. Returns the phase entered, if any.
    ///
    /// Before mount, readiness signals are only remembered and nothing is entered.
    pub fn handle(
        &mut self,
        event: IntroEvent,
        at: TimeMs,
        sched: &mut impl Scheduler,
        gate: &mut impl ScrollGate,
    ) -> Option<IntroPhase> {
        if self.torn_down {
            tracing::warn!(?event, "intro event after teardown ignored");
            return None;
        }
        if !self.mounted {
            if matches!(event, IntroEvent::DomReady | IntroEvent::MediaReady)
                && !self.early.contains(&event)
            {
                tracing::debug!(?event, at = at.0, "readiness recorded before mount");
                self.early.push(event);
            }
            return None;
        }

        match event {
            IntroEvent::DomReady => {
                if !self.flags.mark_dom_ready() {
                    return None;
                }
                tracing::debug!(at = at.0, "document ready");
                if !self.flags.media_ready {
                    let due = at.after(self.cfg.media_fallback_ms);
                    self.fallback = Some(sched.schedule_at(due, TimerKind::MediaFallback));
                    tracing::debug!(due = due.0, "media fallback armed");
                }
            }
            IntroEvent::MediaReady => {
                if !self.flags.mark_media_ready() {
                    return None;
                }
                tracing::debug!(at = at.0, "media ready");
                if let Some(id) = self.fallback.take() {
                    sched.cancel(id);
                }
            }
            IntroEvent::Timer(TimerKind::MediaFallback) => {
                self.fallback = None;
                if !self.flags.mark_media_ready() {
                    return None;
                }
                tracing::debug!(at = at.0, "media readiness by fallback");
            }
            IntroEvent::Timer(TimerKind::FadeDone | TimerKind::RevealDone) => {
                self.phase_timer = None;
            }
        }

        let next = next_phase(self.phase, self.flags, event)?;
        self.enter(next, at, sched, gate);
        Some(next)
    }

    fn enter(
        &mut self,
        phase: IntroPhase,
        at: TimeMs,
        sched: &mut impl Scheduler,
        gate: &mut impl ScrollGate,
    ) {
        self.phase = phase;
        self.entered_at[phase.index()] = Some(at);
        tracing::debug!(?phase, at = at.0, "intro phase entered");

        match phase {
            IntroPhase::Idle => {}
            IntroPhase::FadingToBlack => {
                gate.suspend(at);
                let due = at.after(self.cfg.fade_ms);
                self.phase_timer = Some(sched.schedule_at(due, TimerKind::FadeDone));
            }
            IntroPhase::RevealingMedia => {
                let due = at.after(self.cfg.reveal_ms);
                self.phase_timer = Some(sched.schedule_at(due, TimerKind::RevealDone));
            }
            IntroPhase::Complete => gate.resume(at),
        }
    }

    /// Cancel pending timers; later events are ignored.
    #[tracing::instrument(skip_all)]
    pub fn teardown(&mut self, sched: &mut impl Scheduler) {
        for id in [self.fallback.take(), self.phase_timer.take()].into_iter().flatten() {
            sched.cancel(id);
        }
        self.torn_down = true;
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn flags(&self) -> ReadinessFlags {
        self.flags
    }

    pub fn is_complete(&self) -> bool {
        self.phase == IntroPhase::Complete
    }

    /// When `phase` was entered, if it has been.
    pub fn entered_at(&self, phase: IntroPhase) -> Option<TimeMs> {
        self.entered_at[phase.index()]
    }

    /// Progress of the caption fade in `[0, 1]`.
    pub fn fade_progress(&self, now: TimeMs) -> f64 {
        self.phase_progress(IntroPhase::FadingToBlack, self.cfg.fade_ms, now)
    }

    /// Progress of the hero expand animation in `[0, 1]`.
    pub fn reveal_progress(&self, now: TimeMs) -> f64 {
        self.phase_progress(IntroPhase::RevealingMedia, self.cfg.reveal_ms, now)
    }

    fn phase_progress(&self, phase: IntroPhase, duration_ms: u64, now: TimeMs) -> f64 {
        if self.phase > phase {
            return 1.0;
        }
        match (self.phase == phase, self.entered_at(phase)) {
            (true, Some(start)) => (now.since(start) as f64 / duration_ms.max(1) as f64).min(1.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/controller.rs"]
mod tests;
