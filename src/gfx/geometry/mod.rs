//! # Procedural Geometry Generation
//!
//! Generates primitive shapes procedurally so rooms can be populated without
//! model files. All shapes are Y-up and centred on the origin.
//!
//! ## Supported Primitives
//!
//! - **Cube**: Unit cube, one quad per face
//! - **Sphere**: UV sphere with configurable resolution
//! - **Plane**: Flat XZ plane with configurable size and subdivisions
//!
//! ## Usage
//!
//! ```rust
//! use xr_room::gfx::geometry::{generate_cube, generate_sphere};
//! use xr_room::gfx::scene::Mesh;
//!
//! let cube = Mesh::from_geometry(&generate_cube());
//! let sphere = Mesh::from_geometry(&generate_sphere(16, 8));
//! assert_eq!(cube.polygon_count(), 12.0);
//! assert!(sphere.polygon_count() > 0.0);
//! ```

pub mod primitives;

pub use primitives::*;

/// Generated triangle geometry
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), one per vertex
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Scale every vertex by `factor`
    pub fn scaled(mut self, factor: f32) -> Self {
        for vertex in &mut self.vertices {
            for component in vertex.iter_mut() {
                *component *= factor;
            }
        }
        self
    }
}
