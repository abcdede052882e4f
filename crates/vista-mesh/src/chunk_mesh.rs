//! Pre-allocated chunk mesh buffer with a logical length.
//!
//! Positions, normals, and colors are index-aligned 1:1. Every three
//! consecutive vertices form one triangle. Rebuilds overwrite the buffer in
//! place; capacity only grows when a larger chunk is requested.

/// The mesh output of a chunk meshing pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    /// Number of live vertices. Entries past `len` are stale.
    len: usize,
}

impl ChunkMesh {
    /// Creates an empty mesh with no storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with storage for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        let mut mesh = Self::new();
        mesh.reset(vertices);
        mesh
    }

    /// Drops all live vertices and makes room for at least `vertices`.
    ///
    /// Existing storage is reused; nothing is freed.
    pub fn reset(&mut self, vertices: usize) {
        self.len = 0;
        if self.positions.len() < vertices {
            self.positions.resize(vertices, [0.0; 3]);
            self.normals.resize(vertices, [0.0; 3]);
            self.colors.resize(vertices, [0.0; 3]);
        }
    }

    /// Drops all live vertices, keeping storage.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Writes one vertex after the current logical end.
    pub fn push(&mut self, position: [f32; 3], normal: [f32; 3], color: [f32; 3]) {
        if self.len < self.positions.len() {
            self.positions[self.len] = position;
            self.normals[self.len] = normal;
            self.colors[self.len] = color;
        } else {
            self.positions.push(position);
            self.normals.push(normal);
            self.colors.push(color);
        }
        self.len += 1;
    }

    /// Live vertex positions, chunk-local.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions[..self.len]
    }

    /// Live per-vertex normals.
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals[..self.len]
    }

    /// Live per-vertex RGB colors.
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors[..self.len]
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` slice for GPU upload.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(self.positions())
    }

    /// Normals as a flat slice for GPU upload.
    pub fn flat_normals(&self) -> &[f32] {
        bytemuck::cast_slice(self.normals())
    }

    /// Colors as a flat slice for GPU upload.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(self.colors())
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.len
    }

    /// Number of live triangles.
    pub fn triangle_count(&self) -> usize {
        self.len / 3
    }

    /// Returns true if the mesh has no live vertices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of vertices the buffer holds without growing.
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }
}
