//! # Object Picking System
//!
//! Ray-casting against the interactive objects of a scene. Controllers (or any
//! other pose) cast a ray along their forward axis; every mesh below the
//! interactive group is tested and hits come back sorted nearest first.
//!
//! ## How it works
//!
//! 1. **Broad phase**: the ray is tested against each mesh's world-space AABB
//! 2. **Narrow phase**: surviving meshes are tested triangle by triangle
//! 3. **Resolution**: a raw mesh hit is walked up to the top-level object, the
//!    direct child of the interactive group, which is the unit of selection
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use xr_room::gfx::geometry::generate_cube;
//! use xr_room::gfx::picking::{ObjectPicker, Ray};
//! use xr_room::gfx::scene::{Mesh, Node, SceneGraph, Transform};
//!
//! let mut scene = SceneGraph::new();
//! let group = scene.insert(Node::new("group"), Some(scene.root())).unwrap();
//! let model = scene
//!     .insert(Node::new("Model_1").with_transform(Transform::from_position(Vector3::new(0.0, 0.0, -3.0))), Some(group))
//!     .unwrap();
//! scene.insert(Node::new("body").with_mesh(Mesh::from_geometry(&generate_cube())), Some(model)).unwrap();
//!
//! let picker = ObjectPicker::new();
//! let ray = Ray::new(Vector3::new(0.1, 0.1, 0.0), Vector3::new(0.0, 0.0, -1.0));
//! let hits = picker.intersect(&scene, group, &ray);
//! assert_eq!(ObjectPicker::resolve_top_level(&scene, group, hits[0].node), Some(model));
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4, Zero};

use crate::gfx::scene::{NodeId, SceneGraph};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Möller-Trumbore ray/triangle test, both faces
    ///
    /// Returns the distance along the ray to the hit.
    pub fn intersect_triangle(
        &self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        c: Vector3<f32>,
    ) -> Option<f32> {
        const EPSILON: f32 = 1e-10;

        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Degenerate box at a single point
    pub fn from_point(point: Vector3<f32>) -> Self {
        Self::new(point, point)
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &AABB) -> Self {
        Self::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed_corners: Vec<[f32; 3]> = corners
            .iter()
            .map(|corner| {
                let p = transform_point(matrix, *corner);
                [p.x, p.y, p.z]
            })
            .collect();

        Self::from_vertices(&transformed_corners)
    }
}

fn transform_point(matrix: &Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    let homogeneous = matrix * Vector4::new(point.x, point.y, point.z, 1.0);
    Vector3::new(
        homogeneous.x / homogeneous.w,
        homogeneous.y / homogeneous.w,
        homogeneous.z / homogeneous.w,
    )
}

/// A single mesh hit
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Mesh node that was hit (not yet resolved to its top-level object)
    pub node: NodeId,
    /// Distance from the ray origin
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Ray picker for the interactive objects of a scene
#[derive(Debug, Clone)]
pub struct ObjectPicker {
    /// Hits closer than this are ignored
    pub near: f32,
    /// Hits farther than this are ignored
    pub far: f32,
}

impl ObjectPicker {
    pub fn new() -> Self {
        Self {
            near: 0.0,
            far: f32::INFINITY,
        }
    }

    /// All mesh hits below `group`, nearest first
    ///
    /// Each mesh contributes at most one hit, its nearest triangle.
    pub fn intersect(&self, scene: &SceneGraph, group: NodeId, ray: &Ray) -> Vec<Hit> {
        let mut hits = Vec::new();

        for &child in scene.children(group) {
            for node_id in scene.mesh_descendants(child) {
                if let Some(distance) = self.intersect_mesh(scene, node_id, ray) {
                    hits.push(Hit {
                        node: node_id,
                        distance,
                        point: ray.point_at(distance),
                    });
                }
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Nearest hit below `group`, if any
    pub fn intersect_first(&self, scene: &SceneGraph, group: NodeId, ray: &Ray) -> Option<Hit> {
        self.intersect(scene, group, ray).into_iter().next()
    }

    fn intersect_mesh(&self, scene: &SceneGraph, node_id: NodeId, ray: &Ray) -> Option<f32> {
        let mesh = scene.get(node_id)?.mesh.as_ref()?;
        let world = scene.world_matrix(node_id)?;

        // Cheap rejection before walking triangles
        mesh.local_bounds().transform(&world).intersect_ray(ray)?;

        mesh.triangles()
            .filter_map(|[a, b, c]| {
                ray.intersect_triangle(
                    transform_point(&world, a.into()),
                    transform_point(&world, b.into()),
                    transform_point(&world, c.into()),
                )
            })
            .filter(|&t| t >= self.near && t <= self.far)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Walks from a hit node up to the direct child of `group`
    ///
    /// Returns `None` if `node` does not live below `group`.
    pub fn resolve_top_level(scene: &SceneGraph, group: NodeId, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        // Bounded walk; the chain can be at most as long as the arena
        for _ in 0..=scene.len() {
            let parent = scene.parent(current)?;
            if parent == group {
                return Some(current);
            }
            current = parent;
        }
        None
    }
}

impl Default for ObjectPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use crate::gfx::scene::{Mesh, Node, Transform};

    fn scene_with_cubes(positions: &[Vector3<f32>]) -> (SceneGraph, NodeId, Vec<NodeId>) {
        let mut scene = SceneGraph::new();
        let group = scene.insert(Node::new("group"), Some(scene.root())).unwrap();
        let mut models = Vec::new();
        for (i, position) in positions.iter().enumerate() {
            let model = scene
                .insert(
                    Node::new(format!("Model_{}", i + 1))
                        .with_transform(Transform::from_position(*position)),
                    Some(group),
                )
                .unwrap();
            // Nest the mesh one level deeper than the top-level object
            let inner = scene.insert(Node::new("inner"), Some(model)).unwrap();
            scene
                .insert(
                    Node::new("body").with_mesh(Mesh::from_geometry(&generate_cube())),
                    Some(inner),
                )
                .unwrap();
            models.push(model);
        }
        (scene, group, models)
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.size(), Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_ray_triangle_intersection() {
        let ray = Ray::new(Vector3::new(0.25, 0.25, 1.0), Vector3::new(0.0, 0.0, -1.0));
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        let c = Vector3::new(0.0, 1.0, 0.0);

        assert_eq!(ray.intersect_triangle(a, b, c), Some(1.0));
        // Back face is hit too
        assert_eq!(ray.intersect_triangle(a, c, b), Some(1.0));

        let behind = Ray::new(Vector3::new(0.25, 0.25, -1.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(behind.intersect_triangle(a, b, c).is_none());
    }

    #[test]
    fn test_intersect_sorts_and_resolves_top_level() {
        let (scene, group, models) = scene_with_cubes(&[
            Vector3::new(0.0, 0.0, -6.0),
            Vector3::new(0.0, 0.0, -3.0),
        ]);
        let picker = ObjectPicker::new();
        let ray = Ray::new(Vector3::new(0.125, 0.125, 0.0), Vector3::new(0.0, 0.0, -1.0));

        let hits = picker.intersect(&scene, group, &ray);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].distance, 2.5);
        assert_eq!(hits[1].distance, 5.5);
        assert_eq!(
            ObjectPicker::resolve_top_level(&scene, group, hits[0].node),
            Some(models[1])
        );
        assert_eq!(
            ObjectPicker::resolve_top_level(&scene, group, hits[1].node),
            Some(models[0])
        );
    }

    #[test]
    fn test_intersect_miss_returns_empty() {
        let (scene, group, _) = scene_with_cubes(&[Vector3::new(0.0, 0.0, -3.0)]);
        let picker = ObjectPicker::new();
        let ray = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));

        assert!(picker.intersect(&scene, group, &ray).is_empty());
        assert!(picker.intersect_first(&scene, group, &ray).is_none());
    }

    #[test]
    fn test_resolve_outside_group() {
        let (mut scene, group, _) = scene_with_cubes(&[Vector3::new(0.0, 0.0, -3.0)]);
        let stray = scene.insert(Node::new("stray"), Some(scene.root())).unwrap();

        assert_eq!(ObjectPicker::resolve_top_level(&scene, group, stray), None);
    }
}
