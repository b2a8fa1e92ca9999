use crate::geometry::Finger;

/// Fitts' law movement time: `a + b * log2(distance / width + 1)`.
#[inline(always)]
pub fn fitts_time(distance: f64, a: f64, b: f64, width: f64) -> f64 {
    a + b * (distance / width + 1.0).log2()
}

/// Movement time to reach a key, scaled by the strength of the finger
/// that presses it.
#[inline(always)]
pub fn weighted_move_time(
    distance: f64,
    a: f64,
    b: f64,
    width: f64,
    finger: Finger,
    strength_scale: &[f64; 5],
) -> f64 {
    fitts_time(distance, a, b, width) * strength_scale[finger as usize]
}
