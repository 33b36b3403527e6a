use crate::{
    animation::{ease::Ease, lerp::Lerp},
    config::SmoothingConfig,
    foundation::core::{TimeMs, sanitize_px},
};

/// Duration-based scroll smoothing.
///
/// Each new target restarts an ease from the value reached so far, so a burst of wheel
/// events produces one continuous glide. The value lands exactly on the target when the
/// ease completes.
#[derive(Clone, Debug)]
pub struct ScrollSmoother {
    current: f64,
    from: f64,
    target: f64,
    started_at: Option<TimeMs>, // None once settled
    paused_at: Option<TimeMs>,
    duration_ms: u64,
    ease: Ease,
}

impl ScrollSmoother {
    pub fn new(initial: f64, duration_ms: u64, ease: Ease) -> Self {
        let initial = sanitize_px(initial);
        Self {
            current: initial,
            from: initial,
            target: initial,
            started_at: None,
            paused_at: None,
            duration_ms: duration_ms.max(1),
            ease,
        }
    }

    pub fn from_config(cfg: &SmoothingConfig, initial: f64) -> Self {
        Self::new(initial, cfg.duration_ms, cfg.ease)
    }

    /// Glide toward `target` starting at `now`.
    pub fn set_target(&mut self, target: f64, now: TimeMs) {
        let target = sanitize_px(target);
        self.advance(now);
        if target == self.target && (self.started_at.is_some() || self.current == target) {
            return;
        }
        self.from = self.current;
        self.target = target;
        // A glide requested while paused starts on resume.
        self.started_at = Some(self.paused_at.unwrap_or(now));
    }

    /// Freeze the glide at `now`. Time spent paused does not count toward the ease.
    pub fn pause(&mut self, now: TimeMs) {
        if self.paused_at.is_some() {
            return;
        }
        self.advance(now);
        self.paused_at = Some(now);
    }

    /// Continue a paused glide from where it froze.
    pub fn resume(&mut self, now: TimeMs) {
        let Some(paused) = self.paused_at.take() else {
            return;
        };
        if let Some(start) = self.started_at {
            self.started_at = Some(start.after(now.since(paused)));
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Snap to `y` with no easing.
    pub fn jump_to(&mut self, y: f64) {
        let y = sanitize_px(y);
        self.current = y;
        self.from = y;
        self.target = y;
        self.started_at = None;
    }

    /// Move the eased value to time `now` and return it.
    pub fn advance(&mut self, now: TimeMs) -> f64 {
        if self.paused_at.is_some() {
            return self.current;
        }
        let Some(start) = self.started_at else {
            return self.current;
        };
        let t = now.since(start) as f64 / self.duration_ms as f64;
        if t >= 1.0 {
            self.current = self.target;
            self.from = self.target;
            self.started_at = None;
        } else {
            self.current = f64::lerp(&self.from, &self.target, self.ease.apply(t));
        }
        self.current
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.started_at.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smoother.rs"]
mod tests;
