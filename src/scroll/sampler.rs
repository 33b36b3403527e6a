use crate::{
    config::SmoothingConfig,
    foundation::core::{ScrollOffset, TimeMs, sanitize_px},
    host::{ListenerHandle, ScrollSource},
    scroll::smoother::ScrollSmoother,
};

/// Lifecycle of a [`ScrollSampler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SamplerState {
    /// Constructed, listeners not yet attached.
    Idle,
    Running,
    /// Emission suspended; raw positions are still recorded.
    Stopped,
    /// Listeners released. Terminal.
    Destroyed,
}

/// Per-frame consumer of the smoothed offset.
pub type ScrollCallback = Box<dyn FnMut(ScrollOffset)>;

/// Turns raw scroll events into at most one smoothed sample per rendered frame.
pub struct ScrollSampler<S: ScrollSource> {
    source: S,
    smoother: ScrollSmoother,
    state: SamplerState,
    listener: Option<ListenerHandle>,
    raw: f64,
    dirty: bool,
    last_frame: Option<TimeMs>,
    last_emitted: Option<ScrollOffset>,
    callbacks: Vec<ScrollCallback>,
}

impl<S: ScrollSource> std::fmt::Debug for ScrollSampler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSampler")
            .field("state", &self.state)
            .field("raw", &self.raw)
            .field("smoothed", &self.smoother.current())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl<S: ScrollSource> ScrollSampler<S> {
    pub fn new(source: S, cfg: &SmoothingConfig) -> Self {
        let raw = sanitize_px(source.position());
        Self {
            source,
            smoother: ScrollSmoother::from_config(cfg, raw),
            state: SamplerState::Idle,
            listener: None,
            raw,
            dirty: false,
            last_frame: None,
            last_emitted: None,
            callbacks: Vec::new(),
        }
    }

    /// Register a per-frame callback.
    pub fn subscribe(&mut self, cb: impl FnMut(ScrollOffset) + 'static) {
        self.callbacks.push(Box::new(cb));
    }

    /// Begin (or resume) emission. Returns `false` when nothing changed.
    ///
    /// The first call attaches listeners and syncs to the source position. Calling it while
    /// running, or after [`ScrollSampler::destroy`], is a no-op.
    pub fn start(&mut self, now: TimeMs) -> bool {
        match self.state {
            SamplerState::Running => {
                tracing::debug!("scroll sampler already running");
                false
            }
            SamplerState::Destroyed => {
                tracing::warn!("start() on a destroyed scroll sampler ignored");
                false
            }
            SamplerState::Idle => {
                self.listener = Some(self.source.attach());
                self.raw = sanitize_px(self.source.position());
                self.smoother.jump_to(self.raw);
                self.state = SamplerState::Running;
                self.dirty = true;
                tracing::debug!(raw = self.raw, "scroll sampler started");
                true
            }
            SamplerState::Stopped => {
                self.smoother.resume(now);
                self.smoother.set_target(self.raw, now);
                self.state = SamplerState::Running;
                self.dirty = true;
                tracing::debug!(raw = self.raw, "scroll sampler resumed");
                true
            }
        }
    }

    /// Suspend emission at `now`. The smoother freezes where it is and picks up from the same
    /// value on the next [`ScrollSampler::start`]. Returns `false` if not running.
    pub fn stop(&mut self, now: TimeMs) -> bool {
        if self.state != SamplerState::Running {
            return false;
        }
        self.smoother.pause(now);
        self.state = SamplerState::Stopped;
        tracing::debug!("scroll sampler stopped");
        true
    }

    /// Release listeners and callbacks. Idempotent.
    pub fn destroy(&mut self) {
        if self.state == SamplerState::Destroyed {
            return;
        }
        if let Some(handle) = self.listener.take() {
            self.source.detach(handle);
        }
        self.callbacks.clear();
        self.state = SamplerState::Destroyed;
        tracing::debug!("scroll sampler destroyed");
    }

    /// Raw scroll event from the source.
    pub fn on_scroll(&mut self, raw_y: f64, now: TimeMs) {
        match self.state {
            SamplerState::Running => {
                self.raw = sanitize_px(raw_y);
                self.smoother.set_target(self.raw, now);
                self.dirty = true;
            }
            SamplerState::Stopped => {
                self.raw = sanitize_px(raw_y);
            }
            SamplerState::Idle | SamplerState::Destroyed => {}
        }
    }

    /// Animation-frame tick. Emits at most once per distinct frame timestamp, and only
    /// when input arrived or the smoothed value moved since the last emission.
    pub fn frame(&mut self, now: TimeMs) -> Option<ScrollOffset> {
        if self.state != SamplerState::Running || self.last_frame == Some(now) {
            return None;
        }
        self.last_frame = Some(now);

        let offset = ScrollOffset::new(self.smoother.advance(now));
        let moved = self.last_emitted != Some(offset);
        if !(self.dirty || moved) {
            return None;
        }
        self.dirty = false;
        self.last_emitted = Some(offset);

        tracing::trace!(offset = offset.px(), "scroll frame");
        for cb in &mut self.callbacks {
            cb(offset);
        }
        Some(offset)
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SamplerState::Running
    }

    /// Latest smoothed value, emitted or not.
    pub fn offset(&self) -> ScrollOffset {
        ScrollOffset::new(self.smoother.current())
    }

    /// Latest raw position seen while listening.
    pub fn raw(&self) -> f64 {
        self.raw
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: ScrollSource> Drop for ScrollSampler<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/sampler.rs"]
mod tests;
