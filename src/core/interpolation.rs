use crate::core::FrameValues;

/// Linear blend of two scalars.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Blends two frame value sets at fraction `t`.
///
/// - `t` is clamped into `[0, 1]`; a non-finite `t` counts as `0`.
/// - `t == 0` and `t == 1` return the endpoint values bit-for-bit.
/// - A label that is exactly zero at both ends stays exactly zero.
/// - A label missing from one endpoint is zero at that endpoint.
///
/// Output order is `from`'s labels followed by labels only present in `to`.
#[must_use]
pub fn interpolate(from: &FrameValues, to: &FrameValues, t: f64) -> FrameValues {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

    let mut blended = FrameValues::with_capacity(from.len().max(to.len()));
    for (label, a) in from {
        let b = to.get(label).copied().unwrap_or(0.0);
        blended.insert(label.clone(), blend_value(*a, b, t));
    }
    for (label, b) in to {
        if !from.contains_key(label) {
            blended.insert(label.clone(), blend_value(0.0, *b, t));
        }
    }
    blended
}

fn blend_value(a: f64, b: f64, t: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    if t == 0.0 {
        return a;
    }
    if t == 1.0 {
        return b;
    }
    lerp(a, b, t)
}
