//! Scrollwork drives the visual choreography of a single-page portfolio from one input: the
//! vertical scroll position.
//!
//! A raw scroll stream is smoothed once per rendered frame, combined with the current viewport
//! metrics, and turned into a [`DerivedVisualState`] snapshot (hero scale, per-letter tagline
//! colors, sticky offset, container height). A small one-shot intro sequence gates scrolling
//! until the page and its hero media are ready.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: raw scroll events -> [`ScrollSampler`] -> at most one smoothed offset per frame
//! 2. **Measure**: resize/content changes -> [`MetricsCache`] -> [`ViewportMetrics`]
//! 3. **Derive**: `offset + metrics` -> [`Calculator`] -> [`DerivedVisualState`]
//! 4. **Intro**: readiness signals + timers -> [`IntroController`] -> [`IntroPhase`]
//!
//! [`Choreographer`] wires the four together for one page view. The engine never touches a
//! browser: host adapters implement the traits in [`host`] and forward events.
//!
//! Derivation is pure and deterministic. Time is always passed in explicitly as [`TimeMs`],
//! so a whole page view can be replayed on a [`VirtualClock`].
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod intro;
mod scroll;
mod session;
mod viewport;
mod visual;

/// Tunable constants, loadable from JSON.
pub mod config;
/// Traits the embedding page implements, plus in-process implementations.
pub mod host;

pub use animation::ease::Ease;
pub use animation::lerp::{Lerp, sample_stops};
pub use config::{
    ContainerConfig, DEFAULT_TAGLINE, HeroConfig, IntroConfig, LetterFadeConfig, RippleConfig,
    ScrollworkConfig, SmoothingConfig, StickyConfig, TaglineConfig,
};
pub use foundation::core::{Rgba, ScrollOffset, Size, TimeMs, sanitize_px};
pub use foundation::error::{ScrollworkError, ScrollworkResult};
pub use host::{
    BlockMeasure, DocumentState, ListenerHandle, ManualScrollSource, MediaElement, ScrollSource,
    StaticReadiness,
};
pub use intro::controller::{IntroController, IntroEvent, ScrollGate, next_phase};
pub use intro::phase::{CaptionTone, IntroPhase, ReadinessFlags};
pub use intro::scheduler::{FiredTimer, Scheduler, TimerId, TimerKind, VirtualClock};
pub use scroll::sampler::{SamplerState, ScrollCallback, ScrollSampler};
pub use scroll::smoother::ScrollSmoother;
pub use session::choreographer::{Choreographer, Lifecycle};
pub use viewport::metrics::{MetricsCache, ViewportMetrics};
pub use visual::calculator::{
    Calculator, DerivedVisualState, container_height, fade_end_scroll, letter_alpha,
    letter_color, letter_colors, max_scale, scale, scale_above, sticky_offset, tagline_len,
    top_text_visible,
};
pub use visual::ripple::{RipplePose, ripple_label, ripple_pose, ripple_settle_ms};
