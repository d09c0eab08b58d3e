//! Configuration options for sonoscan.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::volume_grid::proportional_splat_radius;

/// Scan viewer configuration.
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Voxels per grid axis.
    pub dimension: u32,

    /// Deposition policy used by scene-level deposits.
    pub deposit: DepositMode,

    /// Splat radius for smoothed deposition.
    pub splat_radius: SplatRadius,

    /// Edge length of the display cube the lattice is scaled into (world units).
    pub display_size: f32,

    /// Demo scan loaded at startup.
    pub demo: DemoKind,

    /// Background color.
    pub background_color: Vec3,

    /// Fly camera settings.
    pub camera: CameraOptions,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            dimension: 101,
            deposit: DepositMode::Sharp,
            splat_radius: SplatRadius::Proportional,
            display_size: 10.0,
            demo: DemoKind::Sphere,
            background_color: Vec3::splat(0.1),
            camera: CameraOptions::default(),
        }
    }
}

impl ScanOptions {
    /// Parses options from a JSON string and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file and validates them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&json)?;
        log::debug!("loaded scan options from {}", path.display());
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks value ranges that the type system cannot express.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidArgument`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|err| {
            log::warn!("rejected scan options: {err}");
            err
        })
    }

    fn check(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(ScanError::invalid("dimension must be positive"));
        }
        if !(self.display_size.is_finite() && self.display_size > 0.0) {
            return Err(ScanError::invalid(format!(
                "display_size must be positive, got {}",
                self.display_size
            )));
        }
        if !self.background_color.is_finite() {
            return Err(ScanError::invalid("background_color must be finite"));
        }
        self.camera.validate()
    }

    /// Resolves the splat radius for the configured dimension.
    #[must_use]
    pub fn resolved_splat_radius(&self) -> u32 {
        self.splat_radius.resolve(self.dimension)
    }
}

/// Line deposition policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DepositMode {
    /// One voxel per sample, last write wins.
    #[default]
    Sharp,
    /// Spherical exponential splat, brighten-only.
    Smoothed,
}

/// How the smoothed deposition radius is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplatRadius {
    /// `dimension / 20 + 1`.
    #[default]
    Proportional,
    /// A fixed radius in voxels.
    Fixed(u32),
}

impl SplatRadius {
    /// Returns the radius in voxels for a grid of the given dimension.
    #[must_use]
    pub fn resolve(self, dimension: u32) -> u32 {
        match self {
            SplatRadius::Proportional => proportional_splat_radius(dimension),
            SplatRadius::Fixed(radius) => radius,
        }
    }
}

/// Demo scan to populate the grid with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DemoKind {
    /// Leave the grid empty.
    Empty,
    /// Radial falloff from the grid center.
    #[default]
    Sphere,
    /// A fan of scan lines swept from the grid center.
    Fan,
}

/// Fly camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Starting position in world space.
    pub position: Vec3,
    /// Starting yaw in degrees (-90 looks down -Z).
    pub yaw: f32,
    /// Starting pitch in degrees.
    pub pitch: f32,
    /// Field of view in degrees.
    pub fov: f32,
    /// Field of view in degrees while the zoom binding is held.
    pub zoomed_fov: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Speed multiplier while sprinting.
    pub sprint_multiplier: f32,
    /// Degrees of rotation per pixel of mouse movement.
    pub mouse_sensitivity: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 15.0),
            yaw: -90.0,
            pitch: 0.0,
            fov: 70.0,
            zoomed_fov: 30.0,
            move_speed: 5.0,
            sprint_multiplier: 3.0,
            mouse_sensitivity: 0.1,
        }
    }
}

impl CameraOptions {
    /// Checks value ranges that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        for (name, fov) in [("camera.fov", self.fov), ("camera.zoomed_fov", self.zoomed_fov)] {
            if !(fov > 0.0 && fov < 180.0) {
                return Err(ScanError::invalid(format!(
                    "{name} must be in (0, 180) degrees, got {fov}"
                )));
            }
        }
        for (name, value) in [
            ("camera.move_speed", self.move_speed),
            ("camera.sprint_multiplier", self.sprint_multiplier),
            ("camera.mouse_sensitivity", self.mouse_sensitivity),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ScanError::invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if !(self.position.is_finite() && self.yaw.is_finite() && self.pitch.is_finite()) {
            return Err(ScanError::invalid("camera pose must be finite"));
        }
        Ok(())
    }
}
