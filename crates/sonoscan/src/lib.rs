//! sonoscan: simulated ultrasound volume scans as shaded voxel cells.
//!
//! Scan lines are deposited into a [`VolumeGrid`], which is then triangulated
//! into a translucent cell mesh placed inside a wireframe cube and viewed
//! through a free-fly camera.
//!
//! # Quick Start
//!
//! ```
//! use sonoscan::*;
//!
//! fn main() -> Result<()> {
//!     let mut grid = VolumeGrid::new(32)?;
//!
//!     // A scan line through the middle of the volume
//!     grid.deposit_line_sharp(
//!         Vec3::new(0.5, 0.5, 0.0),
//!         Vec3::new(0.5, 0.5, 1.0),
//!         &[0.2, 0.4, 0.8, 0.4],
//!     );
//!
//!     // Interleaved x, y, z, density vertices, ready for upload
//!     let mesh = grid.extract_mesh();
//!     assert_eq!(mesh.as_floats().len(), mesh.num_vertices() * 4);
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! - `sonoscan-core` - the grid, deposition, mesh extraction, options
//! - `sonoscan-render` - camera, display transform, uniforms, vertex layouts
//! - `sonoscan` - [`ScanScene`] and demo scans

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod demos;
pub mod scene;

// Re-export core types
pub use sonoscan_core::{
    cell_mesh::{quad_count, FLOATS_PER_VERTEX, VERTICES_PER_QUAD},
    geometry::{point_segment_distance, sample_positions},
    CameraOptions, CellMesh, CellVertex, DemoKind, DepositMode, Mat4, Result, ScanError,
    ScanOptions, SplatRadius, Vec3, VolumeGrid,
};

// Re-export render types
pub use sonoscan_render::{
    bounding_cube_lines, model_matrix, CameraMovement, FlyCamera, FrameTimer, FrameUniforms,
    SceneColors, VertexAttribute, VertexFormat, VertexLayout, CELL_VERTEX_LAYOUT,
    LINE_VERTEX_LAYOUT,
};

pub use scene::ScanScene;
