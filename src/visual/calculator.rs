//! Scroll offset + viewport metrics -> everything the presentation layer draws.
//!
//! Every function here is pure and cheap enough to run on every frame. Nothing is latched:
//! scrolling back above a threshold recomputes the earlier values.

use crate::{
    config::{ContainerConfig, HeroConfig, LetterFadeConfig, ScrollworkConfig, StickyConfig},
    foundation::core::{Rgba, ScrollOffset},
    viewport::metrics::ViewportMetrics,
};

/// Snapshot of the scroll-driven visual parameters for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DerivedVisualState {
    pub scroll_offset: f64,
    /// Hero media scale in `[max_scale, 1]`.
    pub scale: f64,
    /// Overlay name/title opacity: 0 or 1. Any fade between them belongs to the presentation.
    pub top_tagline_opacity: f64,
    /// One color per tagline character, spaces included.
    pub letter_colors: Vec<Rgba>,
    pub sticky_offset: f64,
    pub container_height: f64,
}

impl DerivedVisualState {
    /// Letter colors as CSS `rgba()` strings.
    pub fn letter_css(&self) -> Vec<String> {
        self.letter_colors.iter().map(|c| c.to_css()).collect()
    }
}

/// Stateless calculator over a configuration.
pub struct Calculator;

impl Calculator {
    /// Derive the full visual state for one frame.
    pub fn derive(
        cfg: &ScrollworkConfig,
        offset: ScrollOffset,
        metrics: &ViewportMetrics,
    ) -> DerivedVisualState {
        let mut out = DerivedVisualState {
            scroll_offset: 0.0,
            scale: 1.0,
            top_tagline_opacity: 1.0,
            letter_colors: Vec::new(),
            sticky_offset: 0.0,
            container_height: 0.0,
        };
        Self::derive_into(cfg, offset, metrics, &mut out);
        out
    }

    /// Same as [`Calculator::derive`], reusing `out`'s letter buffer.
    pub fn derive_into(
        cfg: &ScrollworkConfig,
        offset: ScrollOffset,
        metrics: &ViewportMetrics,
        out: &mut DerivedVisualState,
    ) {
        let y = offset.px();
        let text_len = tagline_len(&cfg.tagline.text);

        let s = scale_above(y, metrics.max_scale, &cfg.hero);
        out.scroll_offset = y;
        out.scale = s;
        out.top_tagline_opacity = if top_text_visible(s, &cfg.hero) {
            1.0
        } else {
            0.0
        };
        letter_colors_into(y, text_len, &cfg.letters, &mut out.letter_colors);
        out.sticky_offset = sticky_offset(
            metrics.height,
            metrics.tagline_block_height,
            &cfg.sticky,
        );
        out.container_height = container_height(y, metrics, text_len, &cfg.container);
    }
}

/// Character count of the tagline, spaces included.
pub fn tagline_len(text: &str) -> usize {
    text.chars().count()
}

/// Smallest hero scale for viewport width `vw`.
///
/// `(vw * min_width_fraction) / (vw - fixed_inset)`, capped at 1. Degenerate widths
/// (unmeasured, or not wider than the inset) give 1 so the hero simply never shrinks.
pub fn max_scale(vw: f64, hero: &HeroConfig) -> f64 {
    let usable = vw - hero.fixed_inset;
    if !(vw.is_finite() && vw > 0.0 && usable > 0.0) {
        return 1.0;
    }
    ((vw * hero.min_width_fraction) / usable).min(1.0)
}

/// `max(1 - y / shrink_distance, max_scale(vw))`.
pub fn scale(y: f64, vw: f64, hero: &HeroConfig) -> f64 {
    scale_above(y, max_scale(vw, hero), hero)
}

/// [`scale`] against a floor that was already computed for the current width.
pub fn scale_above(y: f64, floor: f64, hero: &HeroConfig) -> f64 {
    let y = y.max(0.0);
    (1.0 - y / hero.shrink_distance).max(floor).min(1.0)
}

/// Hard cutoff for the overlay text.
pub fn top_text_visible(scale: f64, hero: &HeroConfig) -> bool {
    scale >= hero.top_text_cutoff
}

/// Alpha of tagline character `index` at scroll `y`.
pub fn letter_alpha(y: f64, index: usize, letters: &LetterFadeConfig) -> f64 {
    let rel = y - letters.fade_start - index as f64 * letters.stagger;
    if rel <= 0.0 {
        return letters.faded_alpha;
    }
    if rel >= letters.fade_distance {
        return letters.full_alpha;
    }
    letters.faded_alpha + (letters.full_alpha - letters.faded_alpha) * (rel / letters.fade_distance)
}

pub fn letter_color(y: f64, index: usize, letters: &LetterFadeConfig) -> Rgba {
    let [r, g, b] = letters.rgb;
    Rgba::new(r, g, b, letter_alpha(y, index, letters))
}

pub fn letter_colors(y: f64, text_len: usize, letters: &LetterFadeConfig) -> Vec<Rgba> {
    let mut out = Vec::with_capacity(text_len);
    letter_colors_into(y, text_len, letters, &mut out);
    out
}

fn letter_colors_into(y: f64, text_len: usize, letters: &LetterFadeConfig, out: &mut Vec<Rgba>) {
    out.clear();
    out.extend((0..text_len).map(|i| letter_color(y, i, letters)));
}

/// Pin offset keeping the block's bottom `bottom_gap` px above the viewport bottom; never negative.
pub fn sticky_offset(vh: f64, block_height: f64, sticky: &StickyConfig) -> f64 {
    let v = vh - block_height - sticky.bottom_gap;
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Scroll position at which the container switches to its settled height.
pub fn fade_end_scroll(text_len: usize, container: &ContainerConfig) -> f64 {
    container.fade_start + container.fade_distance + text_len as f64 * container.stagger
}

/// Height of the region hosting the pinned tagline.
///
/// Before [`fade_end_scroll`]: `placeholder_viewports * vh`. From it on:
/// `fade_end + extra + block`, where `extra` is `vh * short_extra_fraction` unless the
/// viewport is tall. The jump at the threshold is intended.
pub fn container_height(
    y: f64,
    metrics: &ViewportMetrics,
    text_len: usize,
    container: &ContainerConfig,
) -> f64 {
    let fade_end = fade_end_scroll(text_len, container);
    if y < fade_end {
        return container.placeholder_viewports * metrics.height;
    }
    let extra = if metrics.is_tall_aspect {
        0.0
    } else {
        metrics.height * container.short_extra_fraction
    };
    fade_end + extra + metrics.tagline_block_height
}

#[cfg(test)]
#[path = "../../tests/unit/visual/calculator.rs"]
mod tests;
