//! Tunable constants for the whole choreography, as one JSON-loadable document.
//!
//! Every section is `#[serde(default)]`, so a partial document only overrides what it names.
//! The two fade thresholds (`letters.fade_start` and `container.fade_start`) are independent
//! keys; nothing ties one to the other.

use std::path::Path;

use crate::{
    animation::ease::Ease,
    foundation::error::{ScrollworkError, ScrollworkResult},
};

/// Default tagline paragraph.
pub const DEFAULT_TAGLINE: &str =
    "Product designer based in Sarajevo, turning complex ideas into simple experiences.";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollworkConfig {
    pub hero: HeroConfig,
    pub letters: LetterFadeConfig,
    pub sticky: StickyConfig,
    pub container: ContainerConfig,
    pub smoothing: SmoothingConfig,
    pub intro: IntroConfig,
    pub ripple: RippleConfig,
    pub tagline: TaglineConfig,
}

/// Hero media shrink.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Scroll distance (px) over which the hero goes from scale 1 to its floor.
    pub shrink_distance: f64,
    /// Horizontal inset (px) subtracted from the viewport width in the floor formula.
    pub fixed_inset: f64,
    /// Fraction of the viewport width the hero never shrinks below.
    pub min_width_fraction: f64,
    /// Overlay name/title text is shown while `scale >= top_text_cutoff`.
    pub top_text_cutoff: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            shrink_distance: 800.0,
            fixed_inset: 24.0,
            min_width_fraction: 0.25,
            top_text_cutoff: 0.75,
        }
    }
}

/// Per-character tagline fade.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LetterFadeConfig {
    pub fade_start: f64,
    pub fade_distance: f64,
    /// Extra scroll (px) each successive character waits before fading.
    pub stagger: f64,
    pub faded_alpha: f64,
    pub full_alpha: f64,
    pub rgb: [u8; 3],
}

impl Default for LetterFadeConfig {
    fn default() -> Self {
        Self {
            fade_start: 440.0,
            fade_distance: 60.0,
            stagger: 5.0,
            faded_alpha: 0.1,
            full_alpha: 1.0,
            rgb: [0, 0, 0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StickyConfig {
    /// Gap (px) kept between the pinned tagline block and the viewport bottom.
    pub bottom_gap: f64,
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self { bottom_gap: 60.0 }
    }
}

/// Dynamic height of the region that hosts the pinned tagline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub fade_start: f64,
    pub fade_distance: f64,
    pub stagger: f64,
    /// `height > width * tall_aspect_ratio` marks a tall viewport.
    pub tall_aspect_ratio: f64,
    /// Extra settle room on non-tall viewports, as a fraction of viewport height.
    pub short_extra_fraction: f64,
    /// Placeholder height before the fade ends, in viewport heights.
    pub placeholder_viewports: f64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            fade_start: 350.0,
            fade_distance: 60.0,
            stagger: 5.0,
            tall_aspect_ratio: 1.2,
            short_extra_fraction: 0.3,
            placeholder_viewports: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub duration_ms: u64,
    pub ease: Ease,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1150,
            ease: Ease::OutExpo,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub fade_ms: u64,
    pub reveal_ms: u64,
    /// Media counts as ready this long after document load even if it never signals.
    pub media_fallback_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            fade_ms: 1000,
            reveal_ms: 1200,
            media_fallback_ms: 2500,
        }
    }
}

/// Hover ripple over navigation link letters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub letter_delay_ms: u64,
    pub duration_ms: u64,
    pub lift_px: f64,
    pub rest_rgb: [u8; 3],
    pub peak_rgb: [u8; 3],
    pub ease: Ease,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            letter_delay_ms: 100,
            duration_ms: 600,
            lift_px: 4.0,
            rest_rgb: [156, 163, 175],
            peak_rgb: [209, 213, 219],
            // Stands in for CSS `ease`, cubic-bezier(.25, .1, .25, 1), which has no exact
            // counterpart among the curves here.
            ease: Ease::InOutQuad,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TaglineConfig {
    pub text: String,
}

impl Default for TaglineConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TAGLINE.to_owned(),
        }
    }
}

impl ScrollworkConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> ScrollworkResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON document from disk.
    #[tracing::instrument]
    pub fn from_json_path(path: &Path) -> ScrollworkResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            ScrollworkError::Other(
                anyhow::Error::new(e).context(format!("read config '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        positive("hero.shrink_distance", self.hero.shrink_distance)?;
        non_negative("hero.fixed_inset", self.hero.fixed_inset)?;
        unit_interval("hero.min_width_fraction", self.hero.min_width_fraction)?;
        unit_interval("hero.top_text_cutoff", self.hero.top_text_cutoff)?;

        let l = &self.letters;
        non_negative("letters.fade_start", l.fade_start)?;
        positive("letters.fade_distance", l.fade_distance)?;
        non_negative("letters.stagger", l.stagger)?;
        unit_interval("letters.faded_alpha", l.faded_alpha)?;
        unit_interval("letters.full_alpha", l.full_alpha)?;
        if l.faded_alpha > l.full_alpha {
            return Err(ScrollworkError::config(
                "letters.faded_alpha must be <= letters.full_alpha",
            ));
        }

        non_negative("sticky.bottom_gap", self.sticky.bottom_gap)?;

        let c = &self.container;
        non_negative("container.fade_start", c.fade_start)?;
        non_negative("container.fade_distance", c.fade_distance)?;
        non_negative("container.stagger", c.stagger)?;
        positive("container.tall_aspect_ratio", c.tall_aspect_ratio)?;
        non_negative("container.short_extra_fraction", c.short_extra_fraction)?;
        positive("container.placeholder_viewports", c.placeholder_viewports)?;

        if self.smoothing.duration_ms == 0 {
            return Err(ScrollworkError::config("smoothing.duration_ms must be > 0"));
        }
        if self.intro.fade_ms == 0 || self.intro.reveal_ms == 0 {
            return Err(ScrollworkError::config(
                "intro.fade_ms and intro.reveal_ms must be > 0",
            ));
        }
        if self.ripple.duration_ms == 0 {
            return Err(ScrollworkError::config("ripple.duration_ms must be > 0"));
        }
        non_negative("ripple.lift_px", self.ripple.lift_px)?;

        if self.tagline.text.trim().is_empty() {
            return Err(ScrollworkError::config("tagline.text must be non-empty"));
        }
        Ok(())
    }
}

fn positive(key: &str, v: f64) -> ScrollworkResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ScrollworkError::config(format!("{key} must be finite and > 0")))
    }
}

fn non_negative(key: &str, v: f64) -> ScrollworkResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ScrollworkError::config(format!("{key} must be finite and >= 0")))
    }
}

fn unit_interval(key: &str, v: f64) -> ScrollworkResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(ScrollworkError::config(format!("{key} must be within [0, 1]")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
