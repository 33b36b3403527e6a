//! Hover ripple across the letters of a navigation link.
//!
//! Letter `i` starts `i * letter_delay_ms` after the hover began, lifts by `lift_px` and
//! brightens toward the peak color at mid-run, then settles back. Outside its run a letter
//! sits at the rest pose.

use crate::{
    animation::lerp::sample_stops,
    config::RippleConfig,
    foundation::core::Rgba,
};

/// Pose of one letter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RipplePose {
    /// Vertical offset in px (negative is up).
    pub offset_y: f64,
    pub color: Rgba,
}

impl RipplePose {
    pub fn rest(cfg: &RippleConfig) -> Self {
        Self {
            offset_y: 0.0,
            color: Rgba::opaque(cfg.rest_rgb),
        }
    }
}

/// Pose of letter `index`, `elapsed_ms` after hover start. `None` elapsed means not hovered.
pub fn ripple_pose(elapsed_ms: Option<u64>, index: usize, cfg: &RippleConfig) -> RipplePose {
    let rest = RipplePose::rest(cfg);
    let Some(elapsed) = elapsed_ms else {
        return rest;
    };

    let delay = cfg.letter_delay_ms.saturating_mul(index as u64);
    if elapsed < delay {
        return rest;
    }
    let local = elapsed - delay;
    if local >= cfg.duration_ms {
        return rest;
    }
    let t = local as f64 / cfg.duration_ms as f64;

    let peak = Rgba::opaque(cfg.peak_rgb);
    let offsets = [(0.0, 0.0), (0.5, -cfg.lift_px), (1.0, 0.0)];
    let colors = [(0.0, rest.color), (0.5, peak), (1.0, rest.color)];

    RipplePose {
        offset_y: sample_stops(&offsets, cfg.ease, t).unwrap_or(0.0),
        color: sample_stops(&colors, cfg.ease, t).unwrap_or(rest.color),
    }
}

/// Poses for every letter of `label`.
pub fn ripple_label(elapsed_ms: Option<u64>, label: &str, cfg: &RippleConfig) -> Vec<RipplePose> {
    (0..label.chars().count())
        .map(|i| ripple_pose(elapsed_ms, i, cfg))
        .collect()
}

/// Time after hover start at which every letter of a `letters`-long label is back at rest.
pub fn ripple_settle_ms(letters: usize, cfg: &RippleConfig) -> u64 {
    if letters == 0 {
        return 0;
    }
    cfg.letter_delay_ms
        .saturating_mul(letters as u64 - 1)
        .saturating_add(cfg.duration_ms)
}

#[cfg(test)]
#[path = "../../tests/unit/visual/ripple.rs"]
mod tests;
