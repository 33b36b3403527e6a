use crate::{
    config::ScrollworkConfig,
    foundation::core::{Size, sanitize_px},
    host::BlockMeasure,
    visual::calculator::max_scale,
};

/// Viewport geometry plus the measured tagline block height.
///
/// The default stands for "not measured yet": zero geometry and an unscaled hero. Every
/// consumer treats it as neutral.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportMetrics {
    pub width: f64,
    pub height: f64,
    pub tagline_block_height: f64,
    /// `height > width * tall_aspect_ratio`.
    pub is_tall_aspect: bool,
    /// Hero scale floor for `width`, fixed when the geometry is measured.
    pub max_scale: f64,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            tagline_block_height: 0.0,
            is_tall_aspect: false,
            max_scale: 1.0,
        }
    }
}

impl ViewportMetrics {
    pub fn new(width: f64, height: f64, tagline_block_height: f64, cfg: &ScrollworkConfig) -> Self {
        let width = sanitize_px(width);
        let height = sanitize_px(height);
        Self {
            width,
            height,
            tagline_block_height: sanitize_px(tagline_block_height),
            is_tall_aspect: width > 0.0 && height > width * cfg.container.tall_aspect_ratio,
            max_scale: max_scale(width, &cfg.hero),
        }
    }
}

/// Latest committed [`ViewportMetrics`], refreshed on resize and content changes.
#[derive(Clone, Debug)]
pub struct MetricsCache {
    metrics: ViewportMetrics,
    cfg: ScrollworkConfig,
}

impl MetricsCache {
    pub fn new(cfg: &ScrollworkConfig) -> Self {
        Self {
            metrics: ViewportMetrics::default(),
            cfg: cfg.clone(),
        }
    }

    /// Safe to call before any measurement: returns the neutral state.
    pub fn current(&self) -> ViewportMetrics {
        self.metrics
    }

    /// Hero scale floor for the current width. Only [`MetricsCache::resize`] changes it.
    pub fn max_scale(&self) -> f64 {
        self.metrics.max_scale
    }

    /// Window resize. Returns whether anything changed.
    pub fn resize(&mut self, size: Size) -> bool {
        let next = ViewportMetrics::new(
            size.width,
            size.height,
            self.metrics.tagline_block_height,
            &self.cfg,
        );
        if next == self.metrics {
            return false;
        }
        self.metrics = next;
        tracing::debug!(
            width = next.width,
            height = next.height,
            tall = next.is_tall_aspect,
            max_scale = next.max_scale,
            "viewport resized"
        );
        true
    }

    /// Re-read the tagline block height (fonts loaded, breakpoint change, resize).
    ///
    /// An unavailable measurement keeps the previous height.
    pub fn remeasure(&mut self, measure: &impl BlockMeasure) -> bool {
        match measure.block_height() {
            Some(h) => self.set_block_height(h),
            None => false,
        }
    }

    pub fn set_block_height(&mut self, h: f64) -> bool {
        let h = sanitize_px(h);
        if h == self.metrics.tagline_block_height {
            return false;
        }
        self.metrics.tagline_block_height = h;
        tracing::debug!(height = h, "tagline block remeasured");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/metrics.rs"]
mod tests;
