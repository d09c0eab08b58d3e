//! Core abstractions for sonoscan.
//!
//! This crate provides the volumetric side of the scan viewer:
//! - [`VolumeGrid`], a dense voxel density field fed by scan lines
//! - Sharp and smoothed line deposition
//! - Cell mesh extraction into interleaved position + density vertices
//! - Configuration options and the shared error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod cell_mesh;
pub mod error;
pub mod geometry;
pub mod options;
pub mod volume_grid;

pub use cell_mesh::{CellMesh, CellVertex};
pub use error::{Result, ScanError};
pub use options::{CameraOptions, DemoKind, DepositMode, ScanOptions, SplatRadius};
pub use volume_grid::VolumeGrid;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec3};
