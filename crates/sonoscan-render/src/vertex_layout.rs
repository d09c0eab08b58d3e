//! Vertex buffer layouts for the cell mesh and the wireframe cube.
//!
//! Backend-neutral descriptions; a GPU layer maps them onto its own
//! attribute types.

/// Format of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    /// One `f32`.
    Float32,
    /// Three `f32`s.
    Float32x3,
}

impl VertexFormat {
    /// Number of `f32` components.
    #[must_use]
    pub fn components(self) -> u32 {
        match self {
            VertexFormat::Float32 => 1,
            VertexFormat::Float32x3 => 3,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(self) -> u64 {
        u64::from(self.components()) * 4
    }
}

/// A vertex attribute at a shader location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Attribute format.
    pub format: VertexFormat,
    /// Byte offset within the vertex.
    pub offset: u64,
}

/// Stride and attributes of an interleaved vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Bytes between consecutive vertices.
    pub stride: u64,
    /// Attributes in location order.
    pub attributes: &'static [VertexAttribute],
}

/// Layout of [`CellVertex`](sonoscan_core::CellVertex): position then density.
pub const CELL_VERTEX_LAYOUT: VertexLayout = VertexLayout {
    stride: 16,
    attributes: &[
        VertexAttribute {
            location: 0,
            format: VertexFormat::Float32x3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            format: VertexFormat::Float32,
            offset: 12,
        },
    ],
};

/// Layout of the wireframe cube: bare positions.
pub const LINE_VERTEX_LAYOUT: VertexLayout = VertexLayout {
    stride: 12,
    attributes: &[VertexAttribute {
        location: 0,
        format: VertexFormat::Float32x3,
        offset: 0,
    }],
};
