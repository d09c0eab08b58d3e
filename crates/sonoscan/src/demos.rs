//! Demo scans.
//!
//! Procedural content used to exercise the grid without real scan data.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use sonoscan_core::{DepositMode, Vec3, VolumeGrid};

/// Polar angle of the fan, in radians.
const FAN_POLAR_ANGLE: f32 = 1.0;
/// First and last azimuth of the fan sweep, in radians.
const FAN_AZIMUTH_RANGE: (f32, f32) = (1.0, 3.0);
/// Azimuth step between fan lines, in radians.
const FAN_AZIMUTH_STEP: f32 = 0.05;
/// Length of each fan line in normalized grid units.
const FAN_LINE_LENGTH: f32 = 0.3;
/// Samples per fan line.
const FAN_SAMPLES_PER_LINE: usize = 50;

/// Fills the grid with a radial falloff: full density at the center, fading
/// quadratically to zero at the corners.
pub fn sphere_demo(grid: &mut VolumeGrid) {
    let half = grid.dimension().saturating_sub(1) as f32 / 2.0;
    let center = Vec3::splat(half);
    let max_distance = center.length();

    grid.fill_with(|x, y, z| {
        if max_distance == 0.0 {
            return 1.0;
        }
        let distance = Vec3::new(x as f32, y as f32, z as f32).distance(center);
        let shade = (max_distance - distance) / max_distance;
        shade * shade
    });
}

/// Returns the scan lines of the fan demo as `(start, end)` pairs in
/// normalized grid space.
pub fn fan_lines() -> Vec<(Vec3, Vec3)> {
    let apex = Vec3::splat(0.5);
    let (first, last) = FAN_AZIMUTH_RANGE;
    let count = ((last - first) / FAN_AZIMUTH_STEP).round() as usize + 1;

    (0..count)
        .map(|i| {
            let azimuth = first + FAN_AZIMUTH_STEP * i as f32;
            let direction = Vec3::new(
                FAN_POLAR_ANGLE.sin() * azimuth.cos(),
                FAN_POLAR_ANGLE.sin() * azimuth.sin(),
                FAN_POLAR_ANGLE.cos(),
            );
            (apex, apex + direction * FAN_LINE_LENGTH)
        })
        .collect()
}

/// Sweeps a fan of scan lines out of the grid center.
///
/// Every line carries 50 samples of full density.
/// `radius` is only used by [`DepositMode::Smoothed`].
pub fn fan_demo(grid: &mut VolumeGrid, mode: DepositMode, radius: u32) {
    let samples = [1.0_f32; FAN_SAMPLES_PER_LINE];
    let lines = fan_lines();
    for &(start, end) in &lines {
        match mode {
            DepositMode::Sharp => grid.deposit_line_sharp(start, end, &samples),
            DepositMode::Smoothed => grid.deposit_line_smoothed(start, end, &samples, radius),
        }
    }
    log::debug!("fan demo deposited {} lines ({mode:?})", lines.len());
}
