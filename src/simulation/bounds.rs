//! Room bounds checking
//!
//! Movable objects are kept inside the room by clamping, never by rejecting a
//! move. X and Z are clamped on the object's origin using half its bounding
//! size; Y is corrected afterwards by translating the object until its
//! bounding box fits between floor and ceiling.

use cgmath::{Vector3, Zero};

use crate::gfx::picking::AABB;
use crate::gfx::scene::{NodeId, SceneError, SceneGraph};

/// Axis-aligned box every interactive object must stay inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl RoomBounds {
    /// Room centred on the origin in X/Z, standing on `floor_y`
    pub fn from_dimensions(width: f32, height: f32, depth: f32, floor_y: f32) -> Self {
        Self {
            min_x: -width / 2.0,
            max_x: width / 2.0,
            min_y: floor_y,
            max_y: floor_y + height,
            min_z: -depth / 2.0,
            max_z: depth / 2.0,
        }
    }

    pub fn contains(&self, aabb: &AABB) -> bool {
        aabb.min.x >= self.min_x
            && aabb.max.x <= self.max_x
            && aabb.min.y >= self.min_y
            && aabb.max.y <= self.max_y
            && aabb.min.z >= self.min_z
            && aabb.max.z <= self.max_z
    }

    /// Clamps a single point into the room
    pub fn clamp_point(&self, point: Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y.clamp(self.min_y, self.max_y),
            point.z.clamp(self.min_z, self.max_z),
        )
    }
}

/// World-space bounding box of an object and its dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectBounds {
    pub aabb: AABB,
    pub size: Vector3<f32>,
}

/// Bounding box of `id` and all of its descendants, in world space
///
/// An object without any geometry is treated as a point at its world
/// position. Returns `None` for a stale handle.
pub fn compute_bounds(scene: &SceneGraph, id: NodeId) -> Option<ObjectBounds> {
    let mut aabb: Option<AABB> = None;

    for node_id in scene.mesh_descendants(id) {
        let Some(mesh) = scene.get(node_id).and_then(|node| node.mesh.as_ref()) else {
            continue;
        };
        let Some(world) = scene.world_matrix(node_id) else {
            continue;
        };
        let mesh_box = mesh.local_bounds().transform(&world);
        aabb = Some(match aabb {
            Some(acc) => acc.union(&mesh_box),
            None => mesh_box,
        });
    }

    let aabb = match aabb {
        Some(aabb) => aabb,
        None => AABB::from_point(scene.world_position(id)?),
    };

    Some(ObjectBounds {
        aabb,
        size: aabb.size(),
    })
}

/// Pushes an object back inside the room
///
/// Returns whether the object moved. Applying it twice gives the same
/// position as applying it once. An object wider than the room ends up
/// against the min wall on X and Z; one taller than the room ends up with
/// its top at the ceiling.
pub fn constrain(scene: &mut SceneGraph, id: NodeId, room: &RoomBounds) -> Result<bool, SceneError> {
    let bounds = compute_bounds(scene, id).ok_or(SceneError::StaleNode(id))?;
    let start = scene.world_position(id).ok_or(SceneError::StaleNode(id))?;
    let half = bounds.size / 2.0;

    let mut position = start;
    position.x = clamp_max_then_min(position.x, half.x, room.min_x, room.max_x);
    position.z = clamp_max_then_min(position.z, half.z, room.min_z, room.max_z);
    if position != start {
        scene.set_world_position(id, position)?;
    }

    // Box moved with the X/Z shift
    let aabb = compute_bounds(scene, id)
        .ok_or(SceneError::StaleNode(id))?
        .aabb;
    let mut shift = Vector3::zero();
    if aabb.min.y < room.min_y {
        shift.y = room.min_y - aabb.min.y;
    }
    if aabb.max.y + shift.y > room.max_y {
        shift.y -= aabb.max.y + shift.y - room.max_y;
    }
    if shift.y != 0.0 {
        position.y += shift.y;
        scene.set_world_position(id, position)?;
    }

    Ok(position != start)
}

fn clamp_max_then_min(center: f32, half: f32, min: f32, max: f32) -> f32 {
    let mut center = center;
    if center + half > max {
        center = max - half;
    }
    if center - half < min {
        center = min + half;
    }
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FLOOR_Y, ROOM_DEPTH, ROOM_HEIGHT, ROOM_WIDTH};
    use crate::gfx::geometry::generate_cube;
    use crate::gfx::scene::{Mesh, Node, Transform};

    fn room() -> RoomBounds {
        RoomBounds::from_dimensions(ROOM_WIDTH, ROOM_HEIGHT, ROOM_DEPTH, FLOOR_Y)
    }

    fn add_cube(scene: &mut SceneGraph, position: Vector3<f32>, scale: f32) -> NodeId {
        let root = scene.root();
        let object = scene
            .insert(
                Node::new("cube")
                    .with_transform(Transform::from_position(position).with_scale(scale)),
                Some(root),
            )
            .unwrap();
        scene
            .insert(
                Node::new("cube_mesh").with_mesh(Mesh::from_geometry(&generate_cube())),
                Some(object),
            )
            .unwrap();
        object
    }

    #[test]
    fn test_room_from_dimensions() {
        let room = room();
        assert_eq!(room.min_x, -5.0);
        assert_eq!(room.max_x, 5.0);
        assert_eq!(room.min_y, -0.5);
        assert_eq!(room.max_y, 3.5);
        assert_eq!(room.min_z, -5.0);
        assert_eq!(room.max_z, 5.0);
    }

    #[test]
    fn test_compute_bounds_includes_descendants() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(1.0, 0.0, 1.0), 2.0);

        let bounds = compute_bounds(&scene, cube).unwrap();
        assert_eq!(bounds.aabb.min, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(bounds.aabb.max, Vector3::new(2.0, 1.0, 2.0));
        assert_eq!(bounds.size, Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_compute_bounds_without_geometry_is_a_point() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let empty = scene
            .insert(
                Node::new("empty")
                    .with_transform(Transform::from_position(Vector3::new(1.0, 2.0, 3.0))),
                Some(root),
            )
            .unwrap();

        let bounds = compute_bounds(&scene, empty).unwrap();
        assert_eq!(bounds.size, Vector3::zero());
        assert_eq!(bounds.aabb.min, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_constrain_clamps_to_walls() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(10.0, 0.0, -10.0), 1.0);

        assert!(constrain(&mut scene, cube, &room()).unwrap());
        assert_eq!(
            scene.world_position(cube).unwrap(),
            Vector3::new(4.5, 0.0, -4.5)
        );
    }

    #[test]
    fn test_constrain_translates_above_floor_and_below_ceiling() {
        let mut scene = SceneGraph::new();
        let low = add_cube(&mut scene, Vector3::new(0.0, -2.0, 0.0), 1.0);
        let high = add_cube(&mut scene, Vector3::new(0.0, 8.0, 0.0), 1.0);

        constrain(&mut scene, low, &room()).unwrap();
        constrain(&mut scene, high, &room()).unwrap();

        assert_eq!(scene.world_position(low).unwrap().y, 0.0);
        assert_eq!(scene.world_position(high).unwrap().y, 3.0);
    }

    #[test]
    fn test_constrain_inside_room_is_untouched() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(1.0, 0.0, 1.0), 1.0);

        assert!(!constrain(&mut scene, cube, &room()).unwrap());
        assert_eq!(
            scene.world_position(cube).unwrap(),
            Vector3::new(1.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_constrain_is_idempotent() {
        let mut scene = SceneGraph::new();
        // Wider than the room on X and taller than it on Y
        let huge = add_cube(&mut scene, Vector3::new(3.0, 0.0, 7.0), 12.0);

        constrain(&mut scene, huge, &room()).unwrap();
        let once = scene.world_position(huge).unwrap();
        constrain(&mut scene, huge, &room()).unwrap();
        let twice = scene.world_position(huge).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.x, 1.0);
        assert_eq!(once.z, 1.0);
        // Ceiling check runs last, so the top wins on Y
        assert_eq!(once.y, -2.5);
        let top = compute_bounds(&scene, huge).unwrap().aabb.max.y;
        assert_eq!(top, room().max_y);
    }

    #[test]
    fn test_constrain_point_object() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let marker = scene
            .insert(
                Node::new("marker")
                    .with_transform(Transform::from_position(Vector3::new(7.0, 0.0, 0.0))),
                Some(root),
            )
            .unwrap();

        constrain(&mut scene, marker, &room()).unwrap();
        assert_eq!(
            scene.world_position(marker).unwrap(),
            Vector3::new(5.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_constrain_stale_handle() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::zero(), 1.0);
        scene.remove(cube).unwrap();

        assert_eq!(
            constrain(&mut scene, cube, &room()),
            Err(SceneError::StaleNode(cube))
        );
    }
}
