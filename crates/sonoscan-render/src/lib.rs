//! CPU-side render contract for sonoscan.
//!
//! This crate prepares everything a GPU layer needs to draw a scan, without
//! depending on one:
//! - Free-fly camera and its view/projection matrices
//! - Model transform placing the voxel lattice in the display cube
//! - Wireframe geometry of the bounding cube
//! - Uniform blocks and vertex buffer layouts
//! - Frame timing

#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod display;
pub mod timer;
pub mod uniforms;
pub mod vertex_layout;

pub use camera::{CameraMovement, FlyCamera};
pub use display::{bounding_cube_lines, model_matrix, CUBE_LINE_VERTEX_COUNT};
pub use timer::FrameTimer;
pub use uniforms::{FrameUniforms, SceneColors};
pub use vertex_layout::{
    VertexAttribute, VertexFormat, VertexLayout, CELL_VERTEX_LAYOUT, LINE_VERTEX_LAYOUT,
};
