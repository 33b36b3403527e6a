pub use kurbo::Size;

/// Monotonic host timestamp in whole milliseconds (page-relative, like `performance.now()`).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimeMs(pub u64);

impl TimeMs {
    /// Page-load origin.
    pub const ZERO: Self = Self(0);

    /// Timestamp `ms` milliseconds after `self`.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Smoothed vertical scroll position in px; never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct ScrollOffset(f64);

impl ScrollOffset {
    pub const ZERO: Self = Self(0.0);

    pub fn new(px: f64) -> Self {
        Self(sanitize_px(px))
    }

    pub fn px(self) -> f64 {
        self.0
    }
}

/// Straight (non-premultiplied) color with 8-bit channels and a real alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Build a color; alpha is clamped to `[0, 1]`.
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: clamp_unit(a),
        }
    }

    /// Opaque color from an `[r, g, b]` triple.
    pub fn opaque(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }

    /// CSS `rgba()` form; alpha is rounded to two decimals with trailing zeros trimmed.
    pub fn to_css(self) -> String {
        let mut alpha = format!("{:.2}", self.a);
        if alpha.contains('.') {
            let trimmed = alpha.trim_end_matches('0').trim_end_matches('.').len();
            alpha.truncate(trimmed);
        }
        format!("rgba({},{},{},{alpha})", self.r, self.g, self.b)
    }
}

/// Pixel measurement coming from the host; non-finite or negative values collapse to 0.
pub fn sanitize_px(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
