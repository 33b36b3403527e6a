use crate::foundation::core::Rgba;

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Rgba::new(
            lerp_u8(a.r, b.r, t),
            lerp_u8(a.g, b.g, t),
            lerp_u8(a.b, b.b, t),
            a.a + (b.a - a.a) * t,
        )
    }
}

/// Sample a piecewise-linear track of `(offset, value)` stops, offsets ascending in `[0, 1]`.
///
/// Each segment is shaped by `ease`. Outside the stops the nearest end value is held.
pub fn sample_stops<T>(stops: &[(f64, T)], ease: crate::animation::ease::Ease, t: f64) -> Option<T>
where
    T: Lerp + Clone,
{
    let first = stops.first()?;
    let idx = stops.partition_point(|(offset, _)| *offset <= t);
    if idx == 0 {
        return Some(first.1.clone());
    }
    if idx >= stops.len() {
        return stops.last().map(|(_, v)| v.clone());
    }

    let (a_off, a) = &stops[idx - 1];
    let (b_off, b) = &stops[idx];
    let span = b_off - a_off;
    if span <= 0.0 {
        return Some(a.clone());
    }
    let local = ease.apply((t - a_off) / span);
    Some(T::lerp(a, b, local))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
