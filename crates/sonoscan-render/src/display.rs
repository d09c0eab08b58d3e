//! Placement of the voxel lattice in the display volume.

#![allow(clippy::cast_precision_loss)]

use glam::{Mat4, Vec3};

/// Number of vertices in [`bounding_cube_lines`] (12 edges, 2 vertices each).
pub const CUBE_LINE_VERTEX_COUNT: usize = 24;

/// Model matrix placing the lattice `[0, dimension-1]^3` in a cube of edge
/// `display_size` centered on the origin.
///
/// A single-voxel lattice collapses to the origin.
#[must_use]
pub fn model_matrix(dimension: u32, display_size: f32) -> Mat4 {
    let span = dimension.saturating_sub(1) as f32;
    if span == 0.0 {
        return Mat4::IDENTITY;
    }
    Mat4::from_scale(Vec3::splat(display_size / span))
        * Mat4::from_translation(Vec3::splat(-span / 2.0))
}

/// Line-list vertices of the wireframe cube `[-half_extent, half_extent]^3`.
///
/// Consecutive pairs are edges: first the four X-parallel edges, then the
/// Y-parallel ones, then the Z-parallel ones.
#[must_use]
pub fn bounding_cube_lines(half_extent: f32) -> [Vec3; CUBE_LINE_VERTEX_COUNT] {
    let h = half_extent;
    [
        // X-parallel
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(-h, h, h),
        Vec3::new(h, h, h),
        // Y-parallel
        Vec3::new(-h, -h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(-h, h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        // Z-parallel
        Vec3::new(-h, -h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, -h, h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, h, h),
        Vec3::new(h, h, -h),
        Vec3::new(h, h, h),
    ]
}
