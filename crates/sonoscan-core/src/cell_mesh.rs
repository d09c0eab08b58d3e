//! Cell mesh extraction.
//!
//! Turns a [`VolumeGrid`] into a flat triangle list for translucent,
//! density-shaded rendering. This is not an isosurface: every unit face of the
//! voxel lattice becomes a quad, and each quad corner carries the density of
//! the voxel sitting on that lattice point.
//!
//! Lattice points are voxel indices, so an `N`-voxel grid spans `[0, N-1]^3`.
//! Quads are emitted in three passes:
//! 1. XY-facing, for every `k` layer: corners `(i,j,k) (i+1,j,k) (i,j+1,k) (i+1,j+1,k)`
//! 2. XZ-facing, for every `j` layer: corners `(i,j,k) (i+1,j,k) (i,j,k+1) (i+1,j,k+1)`
//! 3. YZ-facing, for every `i` layer: corners `(i,j,k) (i,j+1,k) (i,j,k+1) (i,j+1,k+1)`
//!
//! With corners `v1 v2 v3 v4` in that order, each quad becomes the triangles
//! `v1 v2 v4` and `v1 v3 v4`.

#![allow(clippy::cast_precision_loss)]

use glam::Vec3;

use crate::volume_grid::VolumeGrid;

/// Number of vertices emitted per quad (two triangles, no index buffer).
pub const VERTICES_PER_QUAD: usize = 6;

/// Number of `f32` values per vertex in the flat buffer.
pub const FLOATS_PER_VERTEX: usize = 4;

/// An interleaved cell mesh vertex: lattice position followed by density.
///
/// Layout matches a vertex buffer with stride 16: position at offset 0
/// (3 floats), density at offset 12 (1 float).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CellVertex {
    /// Lattice coordinates of the corner.
    pub position: [f32; 3],
    /// Density of the voxel at the corner.
    pub density: f32,
}

impl CellVertex {
    /// Creates a vertex.
    pub fn new(position: Vec3, density: f32) -> Self {
        Self {
            position: position.to_array(),
            density,
        }
    }

    /// Returns the position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Output of [`VolumeGrid::extract_mesh`].
///
/// Owns its vertices; later changes to the grid do not affect it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellMesh {
    /// Triangle list, six vertices per quad.
    pub vertices: Vec<CellVertex>,
}

impl CellMesh {
    /// Returns the number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the number of quads.
    #[must_use]
    pub fn num_quads(&self) -> usize {
        self.vertices.len() / VERTICES_PER_QUAD
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Views the mesh as a flat `x, y, z, density` float buffer.
    #[must_use]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Views the mesh as raw bytes, ready for a vertex buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Consumes the mesh into a flat `x, y, z, density` float buffer.
    #[must_use]
    pub fn into_floats(self) -> Vec<f32> {
        self.as_floats().to_vec()
    }
}

/// Number of quads produced for a grid with `dimension` voxels per axis.
#[must_use]
pub fn quad_count(dimension: u32) -> usize {
    let n = dimension as usize;
    let span = n.saturating_sub(1);
    3 * span * span * n
}

/// Extracts the cell mesh of `grid`. See the module docs for the face layout.
#[must_use]
pub fn extract_cell_mesh(grid: &VolumeGrid) -> CellMesh {
    let n = grid.dimension();
    let span = n - 1;
    let mut vertices = Vec::with_capacity(quad_count(n) * VERTICES_PER_QUAD);

    // XY-facing quads
    for i in 0..span {
        for j in 0..span {
            for k in 0..n {
                push_quad(
                    &mut vertices,
                    grid,
                    [[i, j, k], [i + 1, j, k], [i, j + 1, k], [i + 1, j + 1, k]],
                );
            }
        }
    }

    // XZ-facing quads
    for i in 0..span {
        for j in 0..n {
            for k in 0..span {
                push_quad(
                    &mut vertices,
                    grid,
                    [[i, j, k], [i + 1, j, k], [i, j, k + 1], [i + 1, j, k + 1]],
                );
            }
        }
    }

    // YZ-facing quads
    for i in 0..n {
        for j in 0..span {
            for k in 0..span {
                push_quad(
                    &mut vertices,
                    grid,
                    [[i, j, k], [i, j + 1, k], [i, j, k + 1], [i, j + 1, k + 1]],
                );
            }
        }
    }

    log::debug!(
        "extracted cell mesh: {} quads, {} vertices",
        vertices.len() / VERTICES_PER_QUAD,
        vertices.len()
    );

    CellMesh { vertices }
}

fn push_quad(vertices: &mut Vec<CellVertex>, grid: &VolumeGrid, corners: [[u32; 3]; 4]) {
    let [v1, v2, v3, v4] = corners.map(|[x, y, z]| {
        let position = Vec3::new(x as f32, y as f32, z as f32);
        CellVertex::new(position, grid.get(x, y, z).unwrap_or(0.0))
    });
    vertices.extend_from_slice(&[v1, v2, v4, v1, v3, v4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mesh: &CellMesh) -> Vec<[f32; 3]> {
        mesh.vertices.iter().map(|v| v.position).collect()
    }

    #[test]
    fn test_single_voxel_grid_is_empty() {
        let grid = VolumeGrid::new(1).unwrap();
        let mesh = grid.extract_mesh();
        assert!(mesh.is_empty());
        assert_eq!(quad_count(1), 0);
    }

    #[test]
    fn test_dimension_two_layout() {
        let grid = VolumeGrid::new(2).unwrap();
        let mesh = grid.extract_mesh();

        assert_eq!(mesh.num_quads(), 6);
        assert_eq!(mesh.num_vertices(), 36);
        assert_eq!(mesh.num_triangles(), 12);
        assert_eq!(mesh.as_floats().len(), 144);
        assert_eq!(quad_count(2), 6);

        #[rustfmt::skip]
        let expected: Vec<[f32; 3]> = vec![
            // XY, k = 0
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0],
            // XY, k = 1
            [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0],
            [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0],
            // XZ, j = 0
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0],
            [0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0],
            // XZ, j = 1
            [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0],
            [0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0],
            // YZ, i = 0
            [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0],
            [0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0],
            // YZ, i = 1
            [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0],
            [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0],
        ];
        assert_eq!(positions(&mesh), expected);
        assert!(mesh.vertices.iter().all(|v| v.density == 0.0));
    }

    #[test]
    fn test_quad_count_matches_extraction() {
        for n in 1..7 {
            let grid = VolumeGrid::new(n).unwrap();
            assert_eq!(grid.extract_mesh().num_quads(), quad_count(n), "dimension {n}");
        }
        assert_eq!(quad_count(101), 3 * 100 * 100 * 101);
    }

    #[test]
    fn test_flat_buffer_interleaves_density() {
        let mut grid = VolumeGrid::new(2).unwrap();
        grid.set(1, 0, 0, 0.5);
        let mesh = grid.extract_mesh();
        let floats = mesh.as_floats();

        // Second vertex of the first quad is lattice corner (1, 0, 0).
        assert_eq!(&floats[4..8], &[1.0, 0.0, 0.0, 0.5]);
        assert_eq!(mesh.as_bytes().len(), floats.len() * 4);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let mut grid = VolumeGrid::new(5).unwrap();
        grid.fill_with(|x, y, z| (x * 7 + y * 3 + z) as f32 / 50.0);

        let first = grid.extract_mesh().into_floats();
        let second = grid.extract_mesh().into_floats();
        let first_bits: Vec<u32> = first.iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u32> = second.iter().map(|v| v.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_densities_follow_lattice_corners() {
        let mut grid = VolumeGrid::new(4).unwrap();
        grid.fill_with(|x, y, z| (x + 4 * y + 16 * z) as f32);

        for vertex in &grid.extract_mesh().vertices {
            let [x, y, z] = vertex.position;
            let expected = x + 4.0 * y + 16.0 * z;
            assert_eq!(vertex.density, expected);
        }
    }

    #[test]
    fn test_mesh_does_not_alias_grid() {
        let mut grid = VolumeGrid::new(3).unwrap();
        grid.set(0, 0, 0, 1.0);
        let mesh = grid.extract_mesh();

        grid.clear();
        assert_eq!(mesh.vertices[0].density, 1.0);
        assert!(grid.extract_mesh().vertices.iter().all(|v| v.density == 0.0));
    }
}
