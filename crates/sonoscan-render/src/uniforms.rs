//! Uniform blocks shared with the cell and line shaders.

use glam::{Mat4, Vec3};

/// Per-frame transforms.
/// Layout matches the shader `FrameUniforms` block: three column-major 4x4 matrices.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Projection matrix.
    pub projection: [[f32; 4]; 4],
    /// View matrix.
    pub view: [[f32; 4]; 4],
    /// Model matrix.
    pub model: [[f32; 4]; 4],
}

impl FrameUniforms {
    /// Packs the three matrices.
    #[must_use]
    pub fn new(projection: Mat4, view: Mat4, model: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }

    /// Same transforms with an identity model matrix, for world-space geometry
    /// such as the bounding cube.
    #[must_use]
    pub fn with_identity_model(&self) -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            ..*self
        }
    }

    /// Combined `projection * view * model`.
    #[must_use]
    pub fn model_view_projection(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.projection)
            * Mat4::from_cols_array_2d(&self.view)
            * Mat4::from_cols_array_2d(&self.model)
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// Clear color and line color for a frame.
/// Layout matches the shader `SceneColors` block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneColors {
    /// Background clear color (RGBA).
    pub background: [f32; 4],
    /// Wireframe line color (RGBA).
    pub line: [f32; 4],
}

impl SceneColors {
    /// Opaque background and line colors.
    #[must_use]
    pub fn new(background: Vec3, line: Vec3) -> Self {
        Self {
            background: background.extend(1.0).to_array(),
            line: line.extend(1.0).to_array(),
        }
    }
}

impl Default for SceneColors {
    fn default() -> Self {
        Self::new(Vec3::splat(0.1), Vec3::ONE)
    }
}
