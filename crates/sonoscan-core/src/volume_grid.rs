//! Dense voxel density field fed by scan lines.
//!
//! Scan lines arrive in normalized unit-cube coordinates and are rasterized into
//! an `N x N x N` grid of densities. Two deposition policies are available:
//! [`VolumeGrid::deposit_line_sharp`] writes each sample into a single voxel, and
//! [`VolumeGrid::deposit_line_smoothed`] splats an exponential glow around it.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use glam::Vec3;

use crate::cell_mesh::{self, CellMesh};
use crate::error::{Result, ScanError};
use crate::geometry::sample_positions;

/// Base of the exponential falloff used by smoothed deposition.
///
/// A voxel at distance `d` from the sample position receives `base^(-d)`.
pub const SPLAT_FALLOFF_BASE: f32 = 1.25;

/// Default splat radius for a grid of the given dimension: `dimension / 20 + 1`.
#[must_use]
pub fn proportional_splat_radius(dimension: u32) -> u32 {
    dimension / 20 + 1
}

/// A cubic voxel grid of density values.
///
/// Voxels are stored in a single flat buffer addressed by `x + y*N + z*N*N`.
/// Every stored value is finite. Writes addressing a voxel outside
/// `[0, N)^3` are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGrid {
    dimension: u32,
    cells: Vec<f32>,
}

impl VolumeGrid {
    /// Creates a zero-filled grid with `dimension` voxels per axis.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidArgument`] if `dimension` is zero or if the
    /// voxel count does not fit in memory addressing.
    pub fn new(dimension: u32) -> Result<Self> {
        if dimension == 0 {
            return Err(ScanError::invalid("grid dimension must be positive"));
        }

        let n = dimension as usize;
        let len = n
            .checked_mul(n)
            .and_then(|square| square.checked_mul(n))
            .ok_or_else(|| ScanError::invalid(format!("grid dimension {dimension} is too large")))?;

        log::debug!("created volume grid {dimension}^3 ({len} voxels)");

        Ok(Self {
            dimension,
            cells: vec![0.0; len],
        })
    }

    /// Returns the number of voxels per axis.
    #[must_use]
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Returns the total number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A grid always holds at least one voxel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the flat voxel buffer.
    #[must_use]
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Default splat radius for this grid, see [`proportional_splat_radius`].
    #[must_use]
    pub fn default_splat_radius(&self) -> u32 {
        proportional_splat_radius(self.dimension)
    }

    /// Resets every voxel to zero.
    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    /// Flattens a voxel coordinate, or `None` if it lies outside the grid.
    #[must_use]
    pub fn index_of(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        self.flat_index([i64::from(x), i64::from(y), i64::from(z)])
    }

    /// Returns the density at a voxel.
    #[must_use]
    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<f32> {
        self.index_of(x, y, z).map(|idx| self.cells[idx])
    }

    /// Stores a density at a voxel.
    ///
    /// Returns `false` (and leaves the grid untouched) when the voxel is out of
    /// bounds or `value` is not finite.
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.index_of(x, y, z) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Overwrites every voxel with `f(x, y, z)`.
    ///
    /// Non-finite results are stored as zero.
    pub fn fill_with(&mut self, mut f: impl FnMut(u32, u32, u32) -> f32) {
        let n = self.dimension;
        let mut idx = 0;
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let value = f(x, y, z);
                    self.cells[idx] = if value.is_finite() { value } else { 0.0 };
                    idx += 1;
                }
            }
        }
    }

    /// Returns the largest stored density.
    #[must_use]
    pub fn max_density(&self) -> f32 {
        self.cells.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Writes a scan line directly into the grid, one voxel per sample.
    ///
    /// `p1` and `p2` are in normalized `[0, 1]^3` space. Sample `i` lands at
    /// `p1 + (p2 - p1) * i / samples.len()` (the last sample stops short of
    /// `p2`), scaled by the grid dimension and truncated toward zero. Each
    /// sample overwrites its voxel; samples landing outside the grid and
    /// non-finite samples are dropped.
    ///
    /// Suited to dense data that is already smooth.
    pub fn deposit_line_sharp(&mut self, p1: Vec3, p2: Vec3, samples: &[f32]) {
        let scale = self.dimension as f32;
        let mut written = 0_usize;

        for (position, &value) in sample_positions(p1, p2, samples.len()).zip(samples) {
            if !value.is_finite() {
                log::trace!("skipping non-finite sample at {position}");
                continue;
            }
            let Some(idx) = voxel_of(position * scale).and_then(|v| self.flat_index(v)) else {
                continue;
            };
            self.cells[idx] = value;
            written += 1;
        }

        log::trace!("sharp deposit wrote {written}/{} samples", samples.len());
    }

    /// Splats a scan line into the grid with a spherical exponential glow.
    ///
    /// Samples are spaced as in [`deposit_line_sharp`](Self::deposit_line_sharp).
    /// Around each sample's voxel, every integer offset with
    /// `rx² + ry² + rz² <= radius²` receives `1.25^(-d)`, where `d` is the
    /// length of the exact (untruncated) scaled sample position shifted by the
    /// offset, measured from the sample's voxel. Per axis that is
    /// `|frac + r|`, so an off-lattice sample glows brighter on the side
    /// opposite its fractional shift. A voxel only ever gets brighter, so
    /// overlapping lines converge to the same envelope in any order.
    ///
    /// The sample values only gate the splat: brightness is purely geometric.
    /// Dense data blurs into an indistinct haze; use this for sparse lines.
    pub fn deposit_line_smoothed(&mut self, p1: Vec3, p2: Vec3, samples: &[f32], radius: u32) {
        let scale = self.dimension as f32;
        let n = i64::from(self.dimension);
        // Offsets past 2N cannot reach another voxel and never fail the sphere test.
        let radius = i64::from(radius.min(self.dimension.saturating_mul(2)));
        let radius_sq = radius * radius;

        for (position, &value) in sample_positions(p1, p2, samples.len()).zip(samples) {
            if !value.is_finite() {
                log::trace!("skipping non-finite sample at {position}");
                continue;
            }
            let exact = position * scale;
            let Some(center) = voxel_of(exact) else {
                continue;
            };
            let origin = Vec3::new(center[0] as f32, center[1] as f32, center[2] as f32);

            // Clip the offset cube to the grid up front.
            let lo = center.map(|c| (-radius).max(c.saturating_neg()));
            let hi = center.map(|c| radius.min((n - 1).saturating_sub(c)));

            for rz in lo[2]..=hi[2] {
                for ry in lo[1]..=hi[1] {
                    for rx in lo[0]..=hi[0] {
                        if rx * rx + ry * ry + rz * rz > radius_sq {
                            continue;
                        }
                        let target = [center[0] + rx, center[1] + ry, center[2] + rz];
                        let Some(idx) = self.flat_index(target) else {
                            continue;
                        };

                        let offset = Vec3::new(rx as f32, ry as f32, rz as f32);
                        let distance = (exact + offset).distance(origin);
                        let intensity = SPLAT_FALLOFF_BASE.powf(-distance);

                        if self.cells[idx] < intensity {
                            self.cells[idx] = intensity;
                        }
                    }
                }
            }
        }
    }

    /// Triangulates the grid into a flat-shaded cell mesh.
    ///
    /// See [`cell_mesh`](crate::cell_mesh) for the face layout.
    #[must_use]
    pub fn extract_mesh(&self) -> CellMesh {
        cell_mesh::extract_cell_mesh(self)
    }

    fn flat_index(&self, voxel: [i64; 3]) -> Option<usize> {
        let n = i64::from(self.dimension);
        if voxel.iter().any(|&c| c < 0 || c >= n) {
            return None;
        }
        let [x, y, z] = voxel;
        Some((x + y * n + z * n * n) as usize)
    }
}

/// Truncates a scaled sample position toward zero.
fn voxel_of(scaled: Vec3) -> Option<[i64; 3]> {
    if !scaled.is_finite() {
        return None;
    }
    Some([scaled.x as i64, scaled.y as i64, scaled.z as i64])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nonzero_voxels(grid: &VolumeGrid) -> Vec<usize> {
        grid.cells()
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_volume_grid_creation() {
        let grid = VolumeGrid::new(4).unwrap();
        assert_eq!(grid.dimension(), 4);
        assert_eq!(grid.len(), 64);
        assert!(grid.cells().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = VolumeGrid::new(0).unwrap_err();
        assert!(matches!(err, ScanError::InvalidArgument(_)));
    }

    #[test]
    fn test_index_layout() {
        let grid = VolumeGrid::new(5).unwrap();
        assert_eq!(grid.index_of(0, 0, 0), Some(0));
        assert_eq!(grid.index_of(1, 0, 0), Some(1));
        assert_eq!(grid.index_of(0, 1, 0), Some(5));
        assert_eq!(grid.index_of(0, 0, 1), Some(25));
        assert_eq!(grid.index_of(4, 4, 4), Some(124));
        assert_eq!(grid.index_of(5, 0, 0), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = VolumeGrid::new(3).unwrap();
        assert!(grid.set(1, 2, 0, 0.5));
        assert_eq!(grid.get(1, 2, 0), Some(0.5));
        assert!(!grid.set(3, 0, 0, 1.0));
        assert!(!grid.set(0, 0, 0, f32::NAN));
        assert_eq!(grid.get(0, 0, 0), Some(0.0));
        assert_eq!(grid.get(0, 3, 0), None);
    }

    #[test]
    fn test_clear() {
        let mut grid = VolumeGrid::new(3).unwrap();
        grid.fill_with(|x, y, z| (x + y + z) as f32);
        assert!(grid.max_density() > 0.0);

        grid.clear();
        assert!(grid.cells().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fill_with_replaces_non_finite() {
        let mut grid = VolumeGrid::new(2).unwrap();
        grid.fill_with(|x, _, _| if x == 0 { f32::INFINITY } else { 0.25 });
        assert_eq!(grid.get(0, 1, 1), Some(0.0));
        assert_eq!(grid.get(1, 1, 1), Some(0.25));
    }

    #[test]
    fn test_sharp_center_sample() {
        for n in [1_u32, 2, 5, 10, 11] {
            let mut grid = VolumeGrid::new(n).unwrap();
            let center = Vec3::splat(0.5);
            grid.deposit_line_sharp(center, center, &[0.7]);

            let c = n / 2;
            assert_eq!(grid.get(c, c, c), Some(0.7), "dimension {n}");
            assert_eq!(nonzero_voxels(&grid).len(), 1, "dimension {n}");
        }
    }

    #[test]
    fn test_sharp_origin_scenario() {
        let mut grid = VolumeGrid::new(3).unwrap();
        grid.deposit_line_sharp(Vec3::ZERO, Vec3::ZERO, &[1.0]);
        assert_eq!(grid.get(0, 0, 0), Some(1.0));
        assert_eq!(nonzero_voxels(&grid), vec![0]);
    }

    #[test]
    fn test_sharp_empty_samples_is_noop() {
        let mut grid = VolumeGrid::new(4).unwrap();
        grid.set(1, 1, 1, 0.3);
        let before = grid.clone();
        grid.deposit_line_sharp(Vec3::ZERO, Vec3::ONE, &[]);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_sharp_overwrites() {
        let mut grid = VolumeGrid::new(4).unwrap();
        grid.set(0, 0, 0, 0.9);
        grid.deposit_line_sharp(Vec3::ZERO, Vec3::ZERO, &[0.1]);
        assert_eq!(grid.get(0, 0, 0), Some(0.1));
    }

    #[test]
    fn test_sharp_line_along_x() {
        let mut grid = VolumeGrid::new(4).unwrap();
        // Samples at x = 0, 0.25, 0.5, 0.75 -> voxels 0..4; the end point is never reached.
        grid.deposit_line_sharp(Vec3::ZERO, Vec3::X, &[0.1, 0.2, 0.3, 0.4]);
        assert_eq!(grid.get(0, 0, 0), Some(0.1));
        assert_eq!(grid.get(1, 0, 0), Some(0.2));
        assert_eq!(grid.get(2, 0, 0), Some(0.3));
        assert_eq!(grid.get(3, 0, 0), Some(0.4));
        assert_eq!(nonzero_voxels(&grid).len(), 4);
    }

    #[test]
    fn test_sharp_drops_out_of_bounds() {
        let mut grid = VolumeGrid::new(4).unwrap();
        // x = 1.0 scales to voxel 4, just outside.
        grid.deposit_line_sharp(Vec3::X, Vec3::X, &[1.0]);
        grid.deposit_line_sharp(Vec3::splat(-0.5), Vec3::splat(-0.5), &[1.0]);
        grid.deposit_line_sharp(Vec3::splat(2.0), Vec3::splat(3.0), &[1.0, 1.0]);
        assert!(nonzero_voxels(&grid).is_empty());
    }

    #[test]
    fn test_sharp_skips_non_finite() {
        let mut grid = VolumeGrid::new(4).unwrap();
        grid.deposit_line_sharp(Vec3::ZERO, Vec3::ZERO, &[f32::NAN]);
        grid.deposit_line_sharp(Vec3::splat(f32::NAN), Vec3::ZERO, &[1.0]);
        assert!(nonzero_voxels(&grid).is_empty());
    }

    #[test]
    fn test_smoothed_radius_zero_hits_single_voxel() {
        let mut grid = VolumeGrid::new(10).unwrap();
        let center = Vec3::splat(0.5);
        grid.deposit_line_smoothed(center, center, &[1.0], 0);

        assert_eq!(grid.get(5, 5, 5), Some(1.0));
        assert_eq!(nonzero_voxels(&grid).len(), 1);
    }

    #[test]
    fn test_smoothed_brighten_only() {
        let mut grid = VolumeGrid::new(10).unwrap();
        let exact = Vec3::splat(0.5);
        let off_center = Vec3::splat(0.55);

        // Off-center first: distance sqrt(3 * 0.5^2) from voxel (5, 5, 5).
        grid.deposit_line_smoothed(off_center, off_center, &[1.0], 0);
        let dim = grid.get(5, 5, 5).unwrap();
        assert!(dim < 1.0 && dim > 0.7, "got {dim}");

        grid.deposit_line_smoothed(exact, exact, &[1.0], 0);
        assert_eq!(grid.get(5, 5, 5), Some(1.0));

        // A dimmer deposit afterwards must not darken the voxel.
        grid.deposit_line_smoothed(off_center, off_center, &[1.0], 0);
        assert_eq!(grid.get(5, 5, 5), Some(1.0));
    }

    #[test]
    fn test_smoothed_falloff() {
        let mut grid = VolumeGrid::new(20).unwrap();
        let center = Vec3::splat(0.5);
        grid.deposit_line_smoothed(center, center, &[1.0], 2);

        assert_eq!(grid.get(10, 10, 10), Some(1.0));
        let one_step = grid.get(11, 10, 10).unwrap();
        let two_steps = grid.get(12, 10, 10).unwrap();
        assert!((one_step - 1.0 / 1.25).abs() < 1e-6);
        assert!((two_steps - 1.0 / (1.25 * 1.25)).abs() < 1e-6);

        // (2, 1, 0) has squared offset 5 > 4 and is outside the sphere.
        assert_eq!(grid.get(12, 11, 10), Some(0.0));
        // (1, 1, 1) has squared offset 3 and is inside.
        let diagonal = grid.get(11, 11, 11).unwrap();
        assert!((diagonal - SPLAT_FALLOFF_BASE.powf(-(3.0_f32).sqrt())).abs() < 1e-6);
    }

    #[test]
    fn test_smoothed_falloff_off_lattice() {
        let mut grid = VolumeGrid::new(10).unwrap();
        // Scaled x is 5.3: voxel 5 with a 0.3 fractional shift.
        let sample = Vec3::new(0.53, 0.5, 0.5);
        grid.deposit_line_smoothed(sample, sample, &[1.0], 1);

        let expected = |d: f32| SPLAT_FALLOFF_BASE.powf(-d);
        let behind = grid.get(4, 5, 5).unwrap();
        let ahead = grid.get(6, 5, 5).unwrap();
        assert!((behind - expected(0.7)).abs() < 1e-5, "got {behind}");
        assert!((ahead - expected(1.3)).abs() < 1e-5, "got {ahead}");
        assert!(behind > ahead);

        let center = grid.get(5, 5, 5).unwrap();
        assert!((center - expected(0.3)).abs() < 1e-5, "got {center}");

        let side = expected(1.09_f32.sqrt());
        for (y, z) in [(4, 5), (6, 5), (5, 4), (5, 6)] {
            let value = grid.get(5, y, z).unwrap();
            assert!((value - side).abs() < 1e-5, "({y}, {z}) got {value}");
        }
    }

    #[test]
    fn test_smoothed_sphere_voxel_count() {
        let mut grid = VolumeGrid::new(20).unwrap();
        let center = Vec3::splat(0.5);
        grid.deposit_line_smoothed(center, center, &[1.0], 1);
        // Center plus its six face neighbours.
        assert_eq!(nonzero_voxels(&grid).len(), 7);
    }

    #[test]
    fn test_smoothed_huge_radius_stays_in_bounds() {
        let mut grid = VolumeGrid::new(4).unwrap();
        grid.deposit_line_smoothed(Vec3::ZERO, Vec3::ZERO, &[1.0], u32::MAX);
        assert_eq!(grid.len(), 64);
        assert!(grid.cells().iter().all(|&v| v > 0.0 && v <= 1.0));
    }

    #[test]
    fn test_smoothed_sample_outside_grid_reaches_inside() {
        let mut grid = VolumeGrid::new(10).unwrap();
        // Sample voxel 10 is just past the edge; radius 1 reaches voxel 9.
        let edge = Vec3::new(1.0, 0.5, 0.5);
        grid.deposit_line_smoothed(edge, edge, &[1.0], 1);
        assert_eq!(nonzero_voxels(&grid), vec![grid.index_of(9, 5, 5).unwrap()]);
        assert!((grid.get(9, 5, 5).unwrap() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_smoothed_order_independent() {
        let lines = [
            (Vec3::new(0.1, 0.2, 0.3), Vec3::new(0.9, 0.7, 0.4)),
            (Vec3::new(0.5, 0.9, 0.1), Vec3::new(0.4, 0.1, 0.8)),
        ];
        let samples = [1.0; 12];

        let mut forward = VolumeGrid::new(12).unwrap();
        for (a, b) in lines {
            forward.deposit_line_smoothed(a, b, &samples, 2);
        }
        let mut backward = VolumeGrid::new(12).unwrap();
        for (a, b) in lines.iter().rev() {
            backward.deposit_line_smoothed(*a, *b, &samples, 2);
        }
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_default_splat_radius() {
        assert_eq!(VolumeGrid::new(1).unwrap().default_splat_radius(), 1);
        assert_eq!(VolumeGrid::new(101).unwrap().default_splat_radius(), 6);
    }

    proptest! {
        #[test]
        fn prop_new_grid_is_zeroed(n in 1_u32..24) {
            let grid = VolumeGrid::new(n).unwrap();
            prop_assert_eq!(grid.len(), (n * n * n) as usize);
            prop_assert!(grid.cells().iter().all(|&v| v == 0.0));
        }

        #[test]
        fn prop_smoothed_values_bounded(
            n in 1_u32..12,
            radius in 0_u32..30,
            a in prop::array::uniform3(-0.5_f32..1.5),
            b in prop::array::uniform3(-0.5_f32..1.5),
            count in 0_usize..20,
        ) {
            let mut grid = VolumeGrid::new(n).unwrap();
            let samples = vec![1.0; count];
            grid.deposit_line_smoothed(Vec3::from(a), Vec3::from(b), &samples, radius);
            prop_assert_eq!(grid.len(), (n * n * n) as usize);
            prop_assert!(grid.cells().iter().all(|&v| v.is_finite() && (0.0..=1.0).contains(&v)));
        }

        #[test]
        fn prop_clear_zeroes_everything(
            n in 1_u32..10,
            a in prop::array::uniform3(0.0_f32..1.0),
            b in prop::array::uniform3(0.0_f32..1.0),
        ) {
            let mut grid = VolumeGrid::new(n).unwrap();
            grid.deposit_line_sharp(Vec3::from(a), Vec3::from(b), &[0.5, 0.25, 1.0]);
            grid.deposit_line_smoothed(Vec3::from(b), Vec3::from(a), &[1.0, 1.0], 2);
            grid.clear();
            prop_assert!(grid.cells().iter().all(|&v| v == 0.0));
        }
    }
}
