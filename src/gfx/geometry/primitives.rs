//! # Primitive Shape Generation
//!
//! Functions generating common primitive shapes with outward normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Vertices span -0.5 to 0.5 on all axes. Faces do not share vertices so each
/// keeps a flat normal.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    #[rustfmt::skip]
    let positions = [
        // Front face (+Z)
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face (-Z)
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face (-X)
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face (+X)
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face (+Y)
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face (-Y)
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|normal| std::iter::repeat(*normal).take(4))
        .collect();

    // 2 triangles per face
    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere of radius 0.5
///
/// # Arguments
/// * `segments` - Number of longitude segments (minimum 3)
/// * `rings` - Number of latitude rings (minimum 2)
pub fn generate_sphere(segments: u32, rings: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segments = segments.max(3);
    let rings = rings.max(2);
    let radius = 0.5;

    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for segment in 0..=segments {
            let theta = 2.0 * PI * segment as f32 / segments as f32;
            let normal = [ring_radius * theta.cos(), y, ring_radius * theta.sin()];

            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * stride + segment;
            let next = current + stride;

            data.indices.extend_from_slice(&[current, current + 1, next]);
            data.indices.extend_from_slice(&[current + 1, next + 1, next]);
        }
    }

    data
}

/// Generate a flat plane on XZ facing +Y
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `subdivisions_x` - Number of quads along X
/// * `subdivisions_z` - Number of quads along Z
pub fn generate_plane(width: f32, depth: f32, subdivisions_x: u32, subdivisions_z: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let subdivisions_x = subdivisions_x.max(1);
    let subdivisions_z = subdivisions_z.max(1);

    for iz in 0..=subdivisions_z {
        for ix in 0..=subdivisions_x {
            let x = (ix as f32 / subdivisions_x as f32 - 0.5) * width;
            let z = (iz as f32 / subdivisions_z as f32 - 0.5) * depth;
            data.vertices.push([x, 0.0, z]);
            data.normals.push([0.0, 1.0, 0.0]);
        }
    }

    let stride = subdivisions_x + 1;
    for iz in 0..subdivisions_z {
        for ix in 0..subdivisions_x {
            let top_left = iz * stride + ix;
            let bottom_left = top_left + stride;

            data.indices
                .extend_from_slice(&[top_left, bottom_left, top_left + 1]);
            data.indices
                .extend_from_slice(&[top_left + 1, bottom_left, bottom_left + 1]);
        }
    }

    data
}
