/// Stage of the one-time intro sequence. Strictly forward; `Complete` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum IntroPhase {
    /// Waiting for document and media readiness.
    #[default]
    Idle,
    /// Scrolling suspended, caption fades in over black.
    FadingToBlack,
    /// Caption turns white while the hero media expands.
    RevealingMedia,
    /// Scroll-driven behavior owns the page.
    Complete,
}

impl IntroPhase {
    pub const ALL: [Self; 4] = [
        Self::Idle,
        Self::FadingToBlack,
        Self::RevealingMedia,
        Self::Complete,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::FadingToBlack => 1,
            Self::RevealingMedia => 2,
            Self::Complete => 3,
        }
    }

    pub fn caption(self) -> CaptionTone {
        match self {
            Self::Idle => CaptionTone::Hidden,
            Self::FadingToBlack => CaptionTone::Black,
            Self::RevealingMedia | Self::Complete => CaptionTone::White,
        }
    }

    /// Whether the intro holds the scroll sampler stopped in this phase.
    pub fn locks_scroll(self) -> bool {
        matches!(self, Self::FadingToBlack | Self::RevealingMedia)
    }
}

/// Color of the intro caption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum CaptionTone {
    Hidden,
    Black,
    White,
}

/// Readiness signals gating the intro. Each flips false -> true at most once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReadinessFlags {
    pub dom_ready: bool,
    pub media_ready: bool,
}

impl ReadinessFlags {
    /// Returns `true` only on the first call.
    pub fn mark_dom_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.dom_ready, true)
    }

    /// Returns `true` only on the first call.
    pub fn mark_media_ready(&mut self) -> bool {
        !std::mem::replace(&mut self.media_ready, true)
    }

    pub fn all(self) -> bool {
        self.dom_ready && self.media_ready
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/phase.rs"]
mod tests;
