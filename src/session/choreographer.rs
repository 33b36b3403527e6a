use crate::{
    config::ScrollworkConfig,
    foundation::{
        core::{Size, TimeMs},
        error::ScrollworkResult,
    },
    host::{BlockMeasure, DocumentState, MediaElement, ScrollSource},
    intro::{
        controller::{IntroController, IntroEvent},
        phase::IntroPhase,
        scheduler::Scheduler,
    },
    scroll::sampler::ScrollSampler,
    viewport::metrics::{MetricsCache, ViewportMetrics},
    visual::calculator::{Calculator, DerivedVisualState},
};

/// Page-instance lifecycle of a [`Choreographer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Lifecycle {
    Fresh,
    Mounted,
    TornDown,
}

type VisualSubscriber = Box<dyn FnMut(&DerivedVisualState)>;
type PhaseSubscriber = Box<dyn FnMut(IntroPhase)>;

/// Composition root for one page view.
///
/// Owns the scroll sampler, the metrics cache and the intro controller, routes host events
/// to them, and pushes [`DerivedVisualState`] and [`IntroPhase`] snapshots to subscribers.
pub struct Choreographer<S: ScrollSource, K: Scheduler> {
    cfg: ScrollworkConfig,
    source: Option<S>,
    sampler: Option<ScrollSampler<S>>,
    scheduler: K,
    metrics: MetricsCache,
    intro: IntroController,
    lifecycle: Lifecycle,
    state: DerivedVisualState,
    needs_derive: bool,
    visual_subs: Vec<VisualSubscriber>,
    phase_subs: Vec<PhaseSubscriber>,
}

impl<S: ScrollSource, K: Scheduler> std::fmt::Debug for Choreographer<S, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Choreographer")
            .field("lifecycle", &self.lifecycle)
            .field("phase", &self.intro.phase())
            .field("metrics", &self.metrics.current())
            .field("sampler", &self.sampler)
            .finish()
    }
}

impl<S: ScrollSource, K: Scheduler> Choreographer<S, K> {
    /// Validate `cfg` and build an unmounted instance.
    pub fn new(cfg: ScrollworkConfig, source: S, scheduler: K) -> ScrollworkResult<Self> {
        cfg.validate()?;
        let metrics = MetricsCache::new(&cfg);
        let intro = IntroController::new(&cfg.intro);
        let state = Calculator::derive(&cfg, Default::default(), &metrics.current());
        Ok(Self {
            cfg,
            source: Some(source),
            sampler: None,
            scheduler,
            metrics,
            intro,
            lifecycle: Lifecycle::Fresh,
            state,
            needs_derive: false,
            visual_subs: Vec::new(),
            phase_subs: Vec::new(),
        })
    }

    pub fn subscribe_visual(&mut self, cb: impl FnMut(&DerivedVisualState) + 'static) {
        self.visual_subs.push(Box::new(cb));
    }

    pub fn subscribe_phase(&mut self, cb: impl FnMut(IntroPhase) + 'static) {
        self.phase_subs.push(Box::new(cb));
    }

    /// Attach to the page: build and start the sampler, start the intro.
    ///
    /// The sampler is built at most once per instance; later calls, including after
    /// [`Choreographer::teardown`], return `false` and change nothing.
    #[tracing::instrument(skip_all, fields(now = now.0))]
    pub fn mount(
        &mut self,
        now: TimeMs,
        document: &impl DocumentState,
        media: &impl MediaElement,
    ) -> bool {
        if self.lifecycle != Lifecycle::Fresh {
            tracing::warn!(lifecycle = ?self.lifecycle, "duplicate mount ignored");
            return false;
        }
        let Some(source) = self.source.take() else {
            return false;
        };
        self.lifecycle = Lifecycle::Mounted;

        let mut sampler = ScrollSampler::new(source, &self.cfg.smoothing);
        sampler.start(now);
        self.sampler = Some(sampler);

        self.intro
            .mount(now, document, media, &mut self.scheduler, &mut self.sampler);
        // Readiness applied at mount may already have moved past `Idle`; report every entry.
        for phase in IntroPhase::ALL {
            if self.intro.entered_at(phase).is_some() {
                self.publish_phase(phase);
            }
        }
        true
    }

    /// Raw scroll position from the host.
    pub fn on_scroll(&mut self, raw_y: f64, now: TimeMs) {
        if let Some(sampler) = &mut self.sampler {
            sampler.on_scroll(raw_y, now);
        }
    }

    /// Window resize; the tagline block is remeasured too since it reflows.
    pub fn on_resize(&mut self, size: Size, measure: &impl BlockMeasure) {
        let resized = self.metrics.resize(size);
        let remeasured = self.metrics.remeasure(measure);
        self.needs_derive |= resized || remeasured;
    }

    /// Tagline content, font or breakpoint change.
    pub fn on_content_changed(&mut self, measure: &impl BlockMeasure) {
        self.needs_derive |= self.metrics.remeasure(measure);
    }

    /// Whole-document load completed.
    pub fn on_document_loaded(&mut self, now: TimeMs) {
        self.dispatch(IntroEvent::DomReady, now);
    }

    /// The presentation layer saw the hero media become playable.
    pub fn notify_media_ready(&mut self, now: TimeMs) {
        self.dispatch(IntroEvent::MediaReady, now);
    }

    /// Animation frame: fire due intro timers, then sample scroll and re-derive if anything
    /// moved. Returns the new snapshot when one was pushed.
    pub fn on_frame(&mut self, now: TimeMs) -> Option<&DerivedVisualState> {
        if self.lifecycle != Lifecycle::Mounted {
            return None;
        }
        self.pump_timers(now);

        let sampled = self.sampler.as_mut().and_then(|s| s.frame(now));
        let offset = match (sampled, self.needs_derive) {
            (Some(offset), _) => offset,
            (None, true) => self.sampler.as_ref().map(|s| s.offset()).unwrap_or_default(),
            (None, false) => return None,
        };
        self.needs_derive = false;

        Calculator::derive_into(&self.cfg, offset, &self.metrics.current(), &mut self.state);
        for cb in &mut self.visual_subs {
            cb(&self.state);
        }
        Some(&self.state)
    }

    /// Fire every intro timer due at or before `now`.
    pub fn pump_timers(&mut self, now: TimeMs) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            self.dispatch(IntroEvent::Timer(fired.kind), fired.due);
        }
    }

    fn dispatch(&mut self, event: IntroEvent, at: TimeMs) {
        if self.lifecycle == Lifecycle::TornDown {
            tracing::warn!(?event, "event after teardown ignored");
            return;
        }
        if let Some(phase) = self
            .intro
            .handle(event, at, &mut self.scheduler, &mut self.sampler)
        {
            self.publish_phase(phase);
        }
    }

    fn publish_phase(&mut self, phase: IntroPhase) {
        for cb in &mut self.phase_subs {
            cb(phase);
        }
    }

    /// Detach from the page: cancel intro timers, destroy the sampler, drop subscribers.
    #[tracing::instrument(skip_all)]
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.intro.teardown(&mut self.scheduler);
        if let Some(sampler) = &mut self.sampler {
            sampler.destroy();
        }
        self.visual_subs.clear();
        self.phase_subs.clear();
        self.lifecycle = Lifecycle::TornDown;
    }

    /// Latest pushed visual state.
    pub fn state(&self) -> &DerivedVisualState {
        &self.state
    }

    pub fn phase(&self) -> IntroPhase {
        self.intro.phase()
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics.current()
    }

    pub fn intro(&self) -> &IntroController {
        &self.intro
    }

    pub fn sampler(&self) -> Option<&ScrollSampler<S>> {
        self.sampler.as_ref()
    }

    pub fn scheduler(&self) -> &K {
        &self.scheduler
    }

    pub fn config(&self) -> &ScrollworkConfig {
        &self.cfg
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/choreographer.rs"]
mod tests;
