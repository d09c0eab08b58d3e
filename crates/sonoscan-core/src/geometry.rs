//! Scan line geometry helpers.

#![allow(clippy::cast_precision_loss)]

use glam::Vec3;

/// Returns the positions of `count` samples taken along the line from `p1` to `p2`.
///
/// The i-th sample sits at `p1 + (p2 - p1) * i / count`, so the first sample is
/// exactly `p1` and the last one stops one step short of `p2`. Both deposition
/// policies of [`VolumeGrid`](crate::VolumeGrid) rely on this spacing.
pub fn sample_positions(p1: Vec3, p2: Vec3, count: usize) -> impl Iterator<Item = Vec3> {
    let span = p2 - p1;
    let count_f = count as f32;
    (0..count).map(move |i| p1 + span * (i as f32 / count_f))
}

/// Distance from point `v` to the segment `a`-`b`.
///
/// Points projecting before `a` or past `b` measure to the nearer endpoint.
/// A degenerate segment (`a == b`) measures to `a`.
///
/// Deposition does not use this; it is a shading helper for callers that
/// tint cells by their distance to a scan line.
pub fn point_segment_distance(a: Vec3, b: Vec3, v: Vec3) -> f32 {
    let ab = b - a;
    let av = v - a;

    if av.dot(ab) <= 0.0 {
        return av.length();
    }

    let bv = v - b;
    if bv.dot(ab) >= 0.0 {
        return bv.length();
    }

    ab.cross(av).length() / ab.length()
}
