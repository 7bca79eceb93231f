//! Sanitization of untrusted mesh data.
//!
//! The generation service is free to send vertex arrays whose length is not a
//! multiple of three and indices that point past the last vertex. Both are fixed
//! up here, without touching any graphics API, so the rules can be tested in
//! isolation.
//!
//! Dropping out-of-range indices keeps the render going but can leave the mesh
//! topologically different from what the service intended.

/// Components per vertex position.
pub const COMPONENTS_PER_VERTEX: usize = 3;

/// Pad a flattened position array to whole `x, y, z` triples.
///
/// Missing trailing components of the final triple become `0.0`, as do NaN
/// components.
pub fn pad_vertices(vertices: &[f64]) -> Vec<f32> {
    let padded_len = vertices.len().div_ceil(COMPONENTS_PER_VERTEX) * COMPONENTS_PER_VERTEX;
    (0..padded_len)
        .map(|i| match vertices.get(i) {
            Some(v) if !v.is_nan() => *v as f32,
            _ => 0.0,
        })
        .collect()
}

/// Keep only the indices that address a vertex of `padded_vertices`.
///
/// `padded_vertices` must already be padded with [`pad_vertices`]. Indices are
/// truncated toward zero; negative, NaN, or out-of-range entries are dropped, as
/// are entries that do not fit in a 16-bit index buffer.
pub fn filter_indices(indices: &[f64], padded_vertices: &[f32]) -> Vec<u16> {
    let vertex_count = padded_vertices.len() / COMPONENTS_PER_VERTEX;
    indices
        .iter()
        .filter_map(|&raw| to_index(raw, vertex_count))
        .collect()
}

fn to_index(raw: f64, vertex_count: usize) -> Option<u16> {
    if raw.is_nan() {
        return None;
    }
    let index = raw.trunc();
    if index < 0.0 || index >= vertex_count as f64 || index > f64::from(u16::MAX) {
        return None;
    }
    Some(index as u16)
}

/// Sanitized geometry, ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Flattened positions, length is a multiple of three.
    pub positions: Vec<f32>,
    /// Every entry addresses a vertex in `positions`.
    pub indices: Vec<u16>,
}

impl Mesh {
    /// Sanitize raw service data into a mesh.
    pub fn from_raw(vertices: &[f64], indices: &[f64]) -> Self {
        let positions = pad_vertices(vertices);
        let indices = filter_indices(indices, &positions);
        Self { positions, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / COMPONENTS_PER_VERTEX
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Iterate positions as `[x, y, z]` triples.
    pub fn triples(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.positions
            .chunks_exact(COMPONENTS_PER_VERTEX)
            .map(|c| [c[0], c[1], c[2]])
    }
}
