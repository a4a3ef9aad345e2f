//! Scalar helpers shared by the field update.

/// Linearly rescale `value` from `[start1, end1]` to `[start2, end2]`.
///
/// Results below zero are clamped to zero. There is no upper clamp, so a value
/// past `end1` maps past `end2`. Callers must pass `start1 != end1`.
#[inline]
pub fn remap_value(value: f32, start1: f32, end1: f32, start2: f32, end2: f32) -> f32 {
    let remapped = ((value - start1) * (end2 - start2)) / (end1 - start1) + start2;
    if remapped > 0.0 {
        remapped
    } else {
        0.0
    }
}

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_to(value: f32, places: i32) -> f32 {
    let scale = 10f32.powi(places);
    (value * scale).round() / scale
}
