/// 2D circular arc sampling utilities.
///
/// Angles are in radians, measured counter-clockwise from the +x axis.
/// A positive sweep runs counter-clockwise.
use std::f64::consts::TAU;

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(
    cx: f64, cy: f64,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    t: f64,
) -> (f64, f64) {
    let angle = start_angle + sweep * t;
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// Number of chords used for an arc of `sweep` radians when a full circle
/// is split into `segments_per_circle` chords. Never less than 1.
#[must_use]
pub fn arc_segment_count(segments_per_circle: u32, sweep: f64) -> u32 {
    let fraction = (sweep.abs() / TAU).min(1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (f64::from(segments_per_circle) * fraction).ceil() as u32;
    n.max(1)
}

/// Samples an arc into `segments + 1` points, both endpoints included.
#[must_use]
pub fn sample_arc(
    cx: f64, cy: f64,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    segments: u32,
) -> Vec<(f64, f64)> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|j| {
            let t = f64::from(j) / f64::from(segments);
            arc_point_at(cx, cy, radius, start_angle, sweep, t)
        })
        .collect()
}
