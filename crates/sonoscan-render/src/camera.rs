//! Free-fly camera.
//!
//! Orientation is stored as yaw and pitch in degrees; the view direction is
//! rebuilt from them with plain trigonometry on every query.

use glam::{Mat4, Vec3};
use sonoscan_core::CameraOptions;

/// Pitch limit in degrees, keeps the view from flipping over the poles.
pub const MAX_PITCH: f32 = 89.0;

/// Narrowest field of view reachable through [`FlyCamera::zoom`], in degrees.
pub const MIN_FOV: f32 = 1.0;

/// Widest field of view reachable through [`FlyCamera::zoom`], in degrees.
pub const MAX_FOV: f32 = 90.0;

/// Direction of a keyboard movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along the view direction (W).
    Forward,
    /// Against the view direction (S).
    Backward,
    /// Strafe left (A).
    Left,
    /// Strafe right (D).
    Right,
    /// Along world up (E).
    Up,
    /// Against world up (Q).
    Down,
}

/// A first-person camera that flies freely through the scene.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Yaw in degrees, -90 looks down -Z.
    pub yaw: f32,
    /// Pitch in degrees, clamped to [`MAX_PITCH`].
    pub pitch: f32,
    /// Current field of view in degrees.
    pub fov: f32,
    /// Field of view when not zoomed.
    pub base_fov: f32,
    /// Field of view while zoomed.
    pub zoomed_fov: f32,
    /// World up vector.
    pub world_up: Vec3,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Speed multiplier while sprinting.
    pub sprint_multiplier: f32,
    /// Degrees of rotation per unit of mouse movement.
    pub mouse_sensitivity: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl FlyCamera {
    /// Creates a camera from configuration.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            position: options.position,
            yaw: options.yaw,
            pitch: options.pitch.clamp(-MAX_PITCH, MAX_PITCH),
            fov: options.fov,
            base_fov: options.fov,
            zoomed_fov: options.zoomed_fov,
            world_up: Vec3::Y,
            move_speed: options.move_speed,
            sprint_multiplier: options.sprint_multiplier,
            mouse_sensitivity: options.mouse_sensitivity,
            near: 0.01,
            far: 500.0,
        }
    }

    /// Returns the unit view direction.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    /// Returns the unit right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.front().cross(self.world_up).normalize()
    }

    /// Returns the camera-relative up direction.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalize()
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    /// Returns the perspective projection matrix for the given aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            aspect_ratio.max(f32::EPSILON),
            self.near,
            self.far,
        )
    }

    /// Moves the camera one keyboard step of `dt` seconds.
    pub fn process_keyboard(&mut self, movement: CameraMovement, sprinting: bool, dt: f32) {
        let multiplier = if sprinting { self.sprint_multiplier } else { 1.0 };
        let velocity = self.move_speed * multiplier * dt;
        let delta = match movement {
            CameraMovement::Forward => self.front(),
            CameraMovement::Backward => -self.front(),
            CameraMovement::Left => -self.right(),
            CameraMovement::Right => self.right(),
            CameraMovement::Up => self.world_up,
            CameraMovement::Down => -self.world_up,
        };
        self.position += delta * velocity;
    }

    /// Rotates the camera by a mouse delta. Positive `dy` looks up.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Narrows (positive `scroll`) or widens the field of view.
    pub fn zoom(&mut self, scroll: f32) {
        self.fov = (self.fov - scroll).clamp(MIN_FOV, MAX_FOV);
    }

    /// Applies the zoom binding: the zoomed field of view while held,
    /// the base one otherwise.
    pub fn set_zoomed(&mut self, zoomed: bool) {
        self.fov = if zoomed { self.zoomed_fov } else { self.base_fov };
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}
